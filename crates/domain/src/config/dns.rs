use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::errors::ConfigError;

const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    /// Upstream query timeout in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    #[serde(default)]
    pub bypass: BypassSettings,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_servers: default_upstream_servers(),
            query_timeout: default_query_timeout(),
            bypass: BypassSettings::default(),
        }
    }
}

impl DnsConfig {
    /// Parses `upstream_servers`; bare addresses get port 53.
    pub fn upstream_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.upstream_servers
            .iter()
            .map(|server| parse_server_addr(server))
            .collect()
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout)
    }
}

/// Split-horizon bypass settings as written by the operator.
///
/// An empty `domains` list disables the feature. `resolver` is optional: when
/// it is missing or not a valid address the resolver is discovered from
/// `resolv_conf_path` at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BypassSettings {
    #[serde(default)]
    pub domains: Vec<String>,

    #[serde(default)]
    pub resolver: Option<String>,

    /// Bypass query timeout in milliseconds; 0 selects the built-in default.
    #[serde(default)]
    pub timeout_ms: u64,

    #[serde(default = "default_resolv_conf_path")]
    pub resolv_conf_path: String,

    /// Abort startup when the bypass cannot be configured.
    #[serde(default)]
    pub required: bool,
}

impl Default for BypassSettings {
    fn default() -> Self {
        Self {
            domains: vec![],
            resolver: None,
            timeout_ms: 0,
            resolv_conf_path: default_resolv_conf_path(),
            required: false,
        }
    }
}

impl BypassSettings {
    pub fn is_enabled(&self) -> bool {
        self.domains.iter().any(|d| !d.trim().is_empty())
    }

    /// The configured resolver if it parses as an IP address.
    pub fn resolver_addr(&self) -> Option<IpAddr> {
        self.resolver
            .as_deref()
            .and_then(|r| r.trim().parse::<IpAddr>().ok())
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

fn parse_server_addr(server: &str) -> Result<SocketAddr, ConfigError> {
    let server = server.trim();
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }
    server
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DEFAULT_DNS_PORT))
        .map_err(|_| ConfigError::Validation(format!("Invalid upstream server '{}'", server)))
}

fn default_upstream_servers() -> Vec<String> {
    vec!["1.1.1.1:53".to_string(), "8.8.8.8:53".to_string()]
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_resolv_conf_path() -> String {
    "/etc/resolv.conf".to_string()
}
