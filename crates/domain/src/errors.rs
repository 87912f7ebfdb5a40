use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("config discovery failed: {0}")]
    ConfigDiscoveryFailed(String),

    #[error("no bypass resolver could be determined")]
    NoBypassResolver,

    #[error("bypass resolver address is not valid: {0}")]
    InvalidResolver(String),

    #[error("no bypass domains specified")]
    NoBypassDomains,

    #[error("Invalid DNS request: {0}")]
    InvalidDnsRequest(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },
}
