use ferrous_split_domain::{Config, LogFormat};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logging(config: &Config) {
    let level = config.logging.level.parse().unwrap_or(Level::INFO);

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.logging.format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }

    info!(
        level = %level,
        format = ?config.logging.format,
        "Logging initialized"
    );
}
