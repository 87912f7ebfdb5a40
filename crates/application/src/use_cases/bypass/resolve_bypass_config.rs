use crate::ports::ResolvConfSource;
use ferrous_split_domain::bypass::is_usable_resolver;
use ferrous_split_domain::{normalize_domains, BypassConfig, DomainError, ResolvConf};
use std::io::BufReader;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// Use case: work out the split-horizon bypass settings at startup.
///
/// Returns `Ok(None)` when no bypass domains were requested. When no usable
/// resolver was given, the host resolver configuration is read once and its
/// first nameserver is used.
pub struct ResolveBypassConfigUseCase {
    resolv_conf: Arc<dyn ResolvConfSource>,
}

impl ResolveBypassConfigUseCase {
    pub fn new(resolv_conf: Arc<dyn ResolvConfSource>) -> Self {
        Self { resolv_conf }
    }

    pub fn execute<S: AsRef<str>>(
        &self,
        user_domains: &[S],
        user_resolver: Option<IpAddr>,
    ) -> Result<Option<BypassConfig>, DomainError> {
        let domains = normalize_domains(user_domains);
        if domains.is_empty() {
            debug!("No bypass domains configured, split DNS disabled");
            return Ok(None);
        }

        if let Some(resolver) = user_resolver.filter(is_usable_resolver) {
            info!(resolver = %resolver, domains = domains.len(), "Using configured bypass resolver");
            return BypassConfig::new(resolver, domains).map(Some);
        }

        let resolv_conf = self.discover()?;
        let resolver = resolv_conf
            .primary_nameserver()
            .ok_or(DomainError::NoBypassResolver)?;

        info!(
            resolver = %resolver,
            source = %self.resolv_conf.describe(),
            search = ?resolv_conf.search,
            "Discovered bypass resolver"
        );

        BypassConfig::new(resolver, domains)
            .map(|config| Some(config.with_resolv_conf(&resolv_conf)))
    }

    fn discover(&self) -> Result<ResolvConf, DomainError> {
        debug!(source = %self.resolv_conf.describe(), "Discovering bypass resolver");

        let reader = self
            .resolv_conf
            .open()
            .map_err(|e| DomainError::ConfigDiscoveryFailed(e.to_string()))?;

        ResolvConf::from_reader(BufReader::new(reader))
            .map_err(|e| DomainError::ConfigDiscoveryFailed(e.to_string()))
    }
}
