use ferrous_split_application::ports::Logger;
use tracing::{error, info, warn};

/// [`Logger`] backed by `tracing`, tagged with the owning component.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(component = self.component, "{}", message);
    }

    fn warn(&self, message: &str) {
        warn!(component = self.component, "{}", message);
    }

    fn error(&self, message: &str) {
        error!(component = self.component, "{}", message);
    }
}
