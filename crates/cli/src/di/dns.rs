use ferrous_split_application::use_cases::ResolveBypassConfigUseCase;
use ferrous_split_domain::{BypassConfig, Config};
use ferrous_split_infrastructure::dns::{
    build_chain, DnsServerHandler, Middleware, SplitMiddleware, UpstreamForwarder,
};
use ferrous_split_infrastructure::logging::TracingLogger;
use ferrous_split_infrastructure::system::FileResolvConfSource;
use std::sync::Arc;
use tracing::{info, warn};

pub struct DnsServices {
    pub handler: DnsServerHandler,
    pub middlewares: Vec<Arc<dyn Middleware>>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS pipeline");

        let upstreams = config.dns.upstream_addrs()?;
        let forwarder = Arc::new(UpstreamForwarder::new(
            &upstreams,
            config.dns.query_timeout(),
        ));

        let mut middlewares: Vec<Arc<dyn Middleware>> = Vec::new();
        if let Some(split) = Self::build_split(config)? {
            middlewares.push(split);
        }

        let chain = build_chain(&middlewares, forwarder);

        info!(
            upstreams = upstreams.len(),
            middlewares = middlewares.len(),
            "DNS pipeline ready"
        );

        Ok(Self {
            handler: DnsServerHandler::new(chain),
            middlewares,
        })
    }

    pub fn stop(&self) {
        for middleware in &self.middlewares {
            if let Err(e) = middleware.stop() {
                warn!(middleware = middleware.name(), error = %e, "Middleware stop failed");
            }
        }
    }

    fn build_split(config: &Config) -> anyhow::Result<Option<Arc<dyn Middleware>>> {
        let bypass = &config.dns.bypass;
        if !bypass.is_enabled() {
            info!("DNS bypass disabled: no bypass domains configured");
            return Ok(None);
        }

        match Self::resolve_split(config) {
            Ok(split) => Ok(split),
            Err(e) if bypass.required => Err(e.context("DNS bypass is required")),
            Err(e) => {
                warn!(error = %e, "DNS bypass unavailable, continuing without it");
                Ok(None)
            }
        }
    }

    fn resolve_split(config: &Config) -> anyhow::Result<Option<Arc<dyn Middleware>>> {
        let bypass = &config.dns.bypass;
        let source = Arc::new(FileResolvConfSource::new(&bypass.resolv_conf_path));
        let use_case = ResolveBypassConfigUseCase::new(source);

        let Some(bypass_config) = use_case.execute(&bypass.domains, bypass.resolver_addr())? else {
            return Ok(None);
        };

        let split = SplitMiddleware::from_config(
            &bypass_config,
            bypass.timeout(),
            Arc::new(TracingLogger::new("split")),
        )?;

        Self::log_bypass(&bypass_config);

        Ok(Some(Arc::new(split)))
    }

    fn log_bypass(bypass_config: &BypassConfig) {
        info!(
            "DNS bypass enabled for domains: {:?} using resolver: {}",
            bypass_config.domains(),
            bypass_config.resolver()
        );
        if !bypass_config.search_domains().is_empty() {
            info!(
                search_domains = ?bypass_config.search_domains(),
                ndots = bypass_config.ndots(),
                "Resolver search list (informational, not merged into bypass domains)"
            );
        }
    }
}
