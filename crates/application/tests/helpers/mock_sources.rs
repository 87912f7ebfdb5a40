#![allow(dead_code)]

use ferrous_split_application::ports::ResolvConfSource;
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory resolv.conf that counts how often it was opened.
pub struct MockResolvConf {
    contents: String,
    opens: AtomicUsize,
}

impl MockResolvConf {
    pub fn new(contents: &str) -> Self {
        Self {
            contents: contents.to_string(),
            opens: AtomicUsize::new(0),
        }
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl ResolvConfSource for MockResolvConf {
    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(Cursor::new(self.contents.clone().into_bytes())))
    }

    fn describe(&self) -> String {
        "mock resolv.conf".to_string()
    }
}

/// Source whose file cannot be opened.
pub struct MissingResolvConf;

impl ResolvConfSource for MissingResolvConf {
    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Err(io::Error::new(io::ErrorKind::NotFound, "resolv.conf not found"))
    }
}

/// Reader that fails part-way through, like a file on a flaky mount.
pub struct BrokenReader {
    served: bool,
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::other("device went away"));
        }
        self.served = true;
        let line = b"nameserver 10.0.0.1\n";
        let n = line.len().min(buf.len());
        buf[..n].copy_from_slice(&line[..n]);
        Ok(n)
    }
}

pub fn broken_reader() -> io::Result<Box<dyn Read + Send>> {
    Ok(Box::new(BrokenReader { served: false }))
}
