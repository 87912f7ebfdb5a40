//! Split-horizon middleware.
//!
//! Queries whose first question matches a bypass pattern are relayed as-is to
//! a plain-DNS bypass resolver (typically the one that knows private zones)
//! instead of continuing down the pipeline. Everything else is delegated to
//! the next handler untouched.

use crate::dns::pipeline::{DnsHandler, DnsRequest, Middleware, ResponseWriter};
use crate::dns::transport::{DnsTransport, UdpTransport};
use crate::dns::wire_response;
use async_trait::async_trait;
use ferrous_split_application::ports::Logger;
use ferrous_split_domain::bypass::{is_usable_resolver, normalize_query_name};
use ferrous_split_domain::{BypassConfig, DomainError, DomainPattern};
use hickory_proto::op::Message;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BYPASS_TIMEOUT: Duration = Duration::from_secs(3);

const DNS_PORT: u16 = 53;

pub struct SplitSettings {
    pub bypass_resolver: Option<IpAddr>,
    pub bypass_domains: Vec<String>,
    /// Per-query timeout; `None` or zero selects [`DEFAULT_BYPASS_TIMEOUT`].
    pub timeout: Option<Duration>,
    pub logger: Arc<dyn Logger>,
}

pub struct SplitMiddleware {
    bypass_addr: SocketAddr,
    patterns: Vec<DomainPattern>,
    client: UdpTransport,
    timeout: Duration,
    logger: Arc<dyn Logger>,
}

impl SplitMiddleware {
    pub fn new(settings: SplitSettings) -> Result<Self, DomainError> {
        let resolver = match settings.bypass_resolver {
            Some(addr) if is_usable_resolver(&addr) => addr,
            Some(addr) => return Err(DomainError::InvalidResolver(addr.to_string())),
            None => return Err(DomainError::InvalidResolver("<unset>".to_string())),
        };

        if settings.bypass_domains.is_empty() {
            return Err(DomainError::NoBypassDomains);
        }

        let timeout = settings
            .timeout
            .filter(|t| !t.is_zero())
            .unwrap_or(DEFAULT_BYPASS_TIMEOUT);

        let bypass_addr = SocketAddr::new(resolver, DNS_PORT);

        Ok(Self {
            bypass_addr,
            patterns: settings
                .bypass_domains
                .iter()
                .map(|d| DomainPattern::parse(d))
                .collect(),
            client: UdpTransport::new(bypass_addr),
            timeout,
            logger: settings.logger,
        })
    }

    pub fn from_config(
        config: &BypassConfig,
        timeout: Option<Duration>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, DomainError> {
        Self::new(SplitSettings {
            bypass_resolver: Some(config.resolver()),
            bypass_domains: config.domains().to_vec(),
            timeout,
            logger,
        })
    }

    /// Sends bypassed queries to `port` instead of 53.
    pub fn with_port(mut self, port: u16) -> Self {
        self.bypass_addr.set_port(port);
        self.client = UdpTransport::new(self.bypass_addr);
        self
    }

    pub fn bypass_addr(&self) -> SocketAddr {
        self.bypass_addr
    }

    pub fn patterns(&self) -> &[DomainPattern] {
        &self.patterns
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn should_bypass(&self, domain: &str) -> bool {
        let name = normalize_query_name(domain);
        self.patterns.iter().any(|pattern| pattern.matches(&name))
    }

    async fn handle_bypass(&self, writer: &mut dyn ResponseWriter, request: &DnsRequest, name: &str) {
        debug!(domain = %name, resolver = %self.bypass_addr, "Bypassing query");

        let response = match self.exchange(request).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.logger
                    .error(&format!("bypass DNS query failed for {}: {}", name, e));
                write_failure(writer, request).await;
                return;
            }
        };

        if let Err(e) = writer.write_response(&response).await {
            self.logger
                .error(&format!("failed to write DNS response: {}", e));
        }
    }

    async fn exchange(&self, request: &DnsRequest) -> Result<Vec<u8>, DomainError> {
        let response = self.client.send(request.raw(), self.timeout).await?;
        Message::from_vec(&response.bytes)
            .map_err(|e| DomainError::InvalidDnsResponse(e.to_string()))?;
        Ok(response.bytes)
    }
}

impl Middleware for SplitMiddleware {
    fn name(&self) -> &'static str {
        "split"
    }

    fn wrap(self: Arc<Self>, next: Arc<dyn DnsHandler>) -> Arc<dyn DnsHandler> {
        Arc::new(SplitHandler {
            middleware: self,
            next,
        })
    }
}

struct SplitHandler {
    middleware: Arc<SplitMiddleware>,
    next: Arc<dyn DnsHandler>,
}

#[async_trait]
impl DnsHandler for SplitHandler {
    async fn serve_dns(&self, writer: &mut dyn ResponseWriter, request: &DnsRequest) {
        let Some(name) = request.first_question_name() else {
            return self.next.serve_dns(writer, request).await;
        };

        if self.middleware.should_bypass(&name) {
            self.middleware.handle_bypass(writer, request, &name).await;
            return;
        }

        self.next.serve_dns(writer, request).await
    }
}

async fn write_failure(writer: &mut dyn ResponseWriter, request: &DnsRequest) {
    let Some(reply) = wire_response::build_servfail_response(request.raw()) else {
        return;
    };
    if let Err(e) = writer.write_response(&reply).await {
        debug!(client = %request.src(), error = %e, "Failed to write SERVFAIL");
    }
}
