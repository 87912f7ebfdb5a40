use std::io::{self, Read};

/// Where the host resolver configuration comes from.
///
/// Any `Fn() -> io::Result<Box<dyn Read + Send>>` closure is a source, which
/// keeps discovery testable without touching `/etc/resolv.conf`.
pub trait ResolvConfSource: Send + Sync {
    fn open(&self) -> io::Result<Box<dyn Read + Send>>;

    fn describe(&self) -> String {
        "resolver configuration".to_string()
    }
}

impl<F> ResolvConfSource for F
where
    F: Fn() -> io::Result<Box<dyn Read + Send>> + Send + Sync,
{
    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        self()
    }
}
