//! Minimal resolv.conf(5) model.
//!
//! Only `nameserver`, `search` and the `ndots`/`timeout`/`attempts` options
//! are understood. Anything else, including malformed lines, is skipped.

use crate::bypass::{is_usable_resolver, normalize_domains};
use std::io::{self, BufRead};
use std::net::IpAddr;

pub const DEFAULT_NDOTS: u8 = 1;
pub const DEFAULT_TIMEOUT_SECS: u8 = 5;
pub const DEFAULT_ATTEMPTS: u8 = 2;

const MAX_NDOTS: u32 = 15;
const MAX_TIMEOUT_SECS: u32 = 30;
const MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvConf {
    pub nameservers: Vec<IpAddr>,
    pub search: Vec<String>,
    pub ndots: u8,
    pub timeout: u8,
    pub attempts: u8,
}

impl Default for ResolvConf {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            search: Vec::new(),
            ndots: DEFAULT_NDOTS,
            timeout: DEFAULT_TIMEOUT_SECS,
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl ResolvConf {
    /// Parses from a reader. Only I/O errors fail; bad lines, including lines
    /// that are not valid UTF-8, are ignored.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut conf = Self::default();
        for line in reader.split(b'\n') {
            conf.apply_line(&String::from_utf8_lossy(&line?));
        }
        Ok(conf)
    }

    /// First nameserver that can actually receive queries.
    pub fn primary_nameserver(&self) -> Option<IpAddr> {
        self.nameservers
            .iter()
            .copied()
            .find(is_usable_resolver)
    }

    fn apply_line(&mut self, line: &str) {
        let line = line.trim();
        if line.starts_with('#') || line.starts_with(';') {
            return;
        }

        let mut fields = line.split_whitespace();
        let Some(keyword) = fields.next() else {
            return;
        };

        match keyword {
            "nameserver" => {
                if let Some(addr) = fields.next().and_then(|f| f.parse::<IpAddr>().ok()) {
                    self.nameservers.push(addr);
                }
            }
            "search" => {
                let domains: Vec<&str> = fields.collect();
                if !domains.is_empty() {
                    // Last search line wins.
                    self.search = normalize_domains(&domains);
                }
            }
            "options" => {
                for option in fields {
                    self.apply_option(option);
                }
            }
            _ => {}
        }
    }

    fn apply_option(&mut self, option: &str) {
        let Some((name, value)) = option.split_once(':') else {
            return;
        };
        let Ok(value) = value.parse::<u32>() else {
            return;
        };

        match name {
            "ndots" => self.ndots = value.min(MAX_NDOTS) as u8,
            "timeout" => self.timeout = value.clamp(1, MAX_TIMEOUT_SECS) as u8,
            "attempts" => self.attempts = value.clamp(1, MAX_ATTEMPTS) as u8,
            _ => {}
        }
    }
}
