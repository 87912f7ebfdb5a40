use crate::errors::DomainError;
use crate::resolv_conf::{ResolvConf, DEFAULT_ATTEMPTS, DEFAULT_NDOTS, DEFAULT_TIMEOUT_SECS};
use std::fmt;
use std::net::IpAddr;

const WILDCARD_PREFIX: &str = "*.";

/// Split-horizon bypass settings resolved at startup.
///
/// Built once from user settings (and, when no resolver was given, the host
/// resolver configuration) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BypassConfig {
    resolver: IpAddr,
    domains: Vec<String>,
    search_domains: Vec<String>,
    ndots: u8,
    timeout_seconds: u8,
    attempts: u8,
}

impl BypassConfig {
    /// Creates a config for an explicit resolver.
    ///
    /// `domains` must already be normalized (see [`normalize_domains`]).
    /// Resolver metadata starts at the resolv.conf(5) defaults.
    pub fn new(resolver: IpAddr, domains: Vec<String>) -> Result<Self, DomainError> {
        if !is_usable_resolver(&resolver) {
            return Err(DomainError::InvalidResolver(resolver.to_string()));
        }
        if domains.is_empty() {
            return Err(DomainError::NoBypassDomains);
        }

        Ok(Self {
            resolver,
            domains,
            search_domains: Vec::new(),
            ndots: DEFAULT_NDOTS,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            attempts: DEFAULT_ATTEMPTS,
        })
    }

    /// Copies the advisory metadata (search list, ndots, timeout, attempts)
    /// from a parsed resolver configuration.
    pub fn with_resolv_conf(mut self, resolv_conf: &ResolvConf) -> Self {
        self.search_domains = resolv_conf.search.clone();
        self.ndots = resolv_conf.ndots;
        self.timeout_seconds = resolv_conf.timeout;
        self.attempts = resolv_conf.attempts;
        self
    }

    pub fn resolver(&self) -> IpAddr {
        self.resolver
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn search_domains(&self) -> &[String] {
        &self.search_domains
    }

    pub fn ndots(&self) -> u8 {
        self.ndots
    }

    pub fn timeout_seconds(&self) -> u8 {
        self.timeout_seconds
    }

    pub fn attempts(&self) -> u8 {
        self.attempts
    }
}

/// An address a query can actually be sent to.
pub fn is_usable_resolver(addr: &IpAddr) -> bool {
    !addr.is_unspecified()
}

/// Lower-cases, trims and strips trailing dots from every entry, dropping
/// entries that end up empty. Wildcard prefixes are kept as-is.
pub fn normalize_domains<S: AsRef<str>>(domains: &[S]) -> Vec<String> {
    domains
        .iter()
        .filter_map(|domain| {
            let domain = domain
                .as_ref()
                .trim()
                .to_lowercase()
                .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
                .to_string();
            (!domain.is_empty()).then_some(domain)
        })
        .collect()
}

/// Normalizes a query name for matching: lower-case, one trailing dot removed.
pub fn normalize_query_name(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

/// Compiled form of one bypass domain pattern.
///
/// Matching is substring based and does not check label boundaries, so
/// `ab.com` also matches `xab.com` and `*.internal` matches `xinternal`.
/// The embedded match (`<pattern>.` anywhere in the name) catches queries a
/// client has already expanded with one of its search suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPattern {
    Wildcard {
        suffix: String,
        embedded: String,
    },
    Plain {
        domain: String,
        subdomain_suffix: String,
        embedded: String,
    },
}

impl DomainPattern {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_prefix(WILDCARD_PREFIX) {
            Some(suffix) => Self::Wildcard {
                suffix: suffix.to_string(),
                embedded: format!("{}.", suffix),
            },
            None => Self::Plain {
                domain: pattern.to_string(),
                subdomain_suffix: format!(".{}", pattern),
                embedded: format!("{}.", pattern),
            },
        }
    }

    /// `name` must already be normalized with [`normalize_query_name`].
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Wildcard { suffix, embedded } => {
                name.ends_with(suffix.as_str()) || name.contains(embedded.as_str())
            }
            Self::Plain {
                domain,
                subdomain_suffix,
                embedded,
            } => {
                name == domain
                    || name.ends_with(subdomain_suffix.as_str())
                    || name.contains(embedded.as_str())
            }
        }
    }
}

impl fmt::Display for DomainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard { suffix, .. } => write!(f, "{}{}", WILDCARD_PREFIX, suffix),
            Self::Plain { domain, .. } => f.write_str(domain),
        }
    }
}
