//! DNS resolver adapter.
//!
//! Wraps a single-name lookup into the three-way [`Resolution`] outcome the
//! discovery engine works with: a name either definitively does not exist,
//! resolved to A records or a CNAME, or failed transiently.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::proto::rr::RecordType;
use trust_dns_resolver::TokioAsyncResolver;

use crate::model::Resolution;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// The one DNS capability the engine needs. Implementations must be safe to
/// call from many tasks at once.
#[async_trait]
pub trait Resolve: Send + Sync {
    async fn resolve(&self, name: &str) -> Resolution;
}

/// Production resolver backed by trust-dns.
pub struct DnsResolver {
    resolver: TokioAsyncResolver,
}

impl DnsResolver {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Build a resolver with a per-query timeout. Expiry surfaces as
    /// [`Resolution::Indeterminate`], so one hung lookup cannot stall a
    /// whole batch.
    pub fn with_timeout(timeout: Duration) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::google(), opts),
        }
    }

    async fn lookup_cname(&self, name: &str) -> Resolution {
        match self.resolver.lookup(name, RecordType::CNAME).await {
            Ok(lookup) => match lookup.iter().find_map(|r| r.as_cname()) {
                Some(cname) => Resolution::Resolved {
                    addresses: Vec::new(),
                    cname: Some(cname.0.to_utf8()),
                },
                None => Resolution::NotFound,
            },
            Err(err) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => Resolution::NotFound,
                _ => Resolution::Indeterminate,
            },
        }
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resolve for DnsResolver {
    async fn resolve(&self, name: &str) -> Resolution {
        match self.resolver.lookup(name, RecordType::A).await {
            Ok(lookup) => {
                let addresses: Vec<Ipv4Addr> =
                    lookup.iter().filter_map(|r| r.as_a()).map(|a| a.0).collect();
                if addresses.is_empty() {
                    // Answer section had no A records; the name may still
                    // alias elsewhere.
                    self.lookup_cname(name).await
                } else {
                    Resolution::Resolved {
                        addresses,
                        cname: None,
                    }
                }
            }
            Err(err) => match missing_kind(&err) {
                Missing::NxDomain => Resolution::NotFound,
                Missing::NoAnswer => self.lookup_cname(name).await,
                Missing::Transient => Resolution::Indeterminate,
            },
        }
    }
}

enum Missing {
    /// NXDOMAIN: the name does not exist at all, no point asking for CNAME.
    NxDomain,
    /// The name exists but holds no A record; a CNAME may.
    NoAnswer,
    /// Timeout or transport error.
    Transient,
}

fn missing_kind(err: &ResolveError) -> Missing {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            if *response_code == ResponseCode::NXDomain {
                Missing::NxDomain
            } else {
                Missing::NoAnswer
            }
        }
        _ => Missing::Transient,
    }
}
