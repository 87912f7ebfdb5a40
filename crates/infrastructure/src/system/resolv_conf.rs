use ferrous_split_application::ports::ResolvConfSource;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

const SYSTEM_RESOLV_CONF: &str = "/etc/resolv.conf";

/// Resolver configuration read from a file on disk.
#[derive(Debug, Clone)]
pub struct FileResolvConfSource {
    path: PathBuf,
}

impl FileResolvConfSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn system() -> Self {
        Self::new(SYSTEM_RESOLV_CONF)
    }
}

impl Default for FileResolvConfSource {
    fn default() -> Self {
        Self::system()
    }
}

impl ResolvConfSource for FileResolvConfSource {
    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(file))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
