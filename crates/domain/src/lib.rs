//! Ferrous Split DNS Domain Layer
pub mod bypass;
pub mod config;
pub mod errors;
pub mod resolv_conf;

pub use bypass::{normalize_domains, BypassConfig, DomainPattern};
pub use config::{
    BypassSettings, CliOverrides, Config, ConfigError, DnsConfig, LogFormat,
};
pub use errors::DomainError;
pub use resolv_conf::ResolvConf;
