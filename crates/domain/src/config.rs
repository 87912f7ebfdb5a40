//! Configuration module for Ferrous Split DNS
//!
//! - `root`: Main configuration and CLI overrides
//! - `server`: Listener port and binding
//! - `dns`: Upstream forwarding and split-horizon bypass settings
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod dns;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;

pub use dns::{BypassSettings, DnsConfig};
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
