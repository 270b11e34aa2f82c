//! DNS availability probe
//!
//! A single forward A-record resolution per candidate. Records found
//! means the domain is registered; any resolution failure (NXDOMAIN,
//! SERVFAIL, timeout) is read as availability. That optimistic-on-error
//! policy is a known heuristic weakness carried as-is; the WHOIS
//! cross-check exists to narrow it.

use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::Resolver;

use super::{AvailabilityProbe, DEFAULT_TLD};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// DNS prober backed by an upstream recursive resolver.
pub struct DnsProber {
    resolver: Resolver<TokioConnectionProvider>,
    tld: String,
}

impl DnsProber {
    pub fn new() -> Self {
        Self::with_tld(DEFAULT_TLD)
    }

    pub fn with_tld(tld: impl Into<String>) -> Self {
        let mut builder = Resolver::builder_with_config(
            ResolverConfig::default(),
            TokioConnectionProvider::default(),
        );
        builder.options_mut().timeout = LOOKUP_TIMEOUT;
        // One shot per candidate; the caller never retries probes.
        builder.options_mut().attempts = 0;

        Self {
            resolver: builder.build(),
            tld: tld.into(),
        }
    }

    /// Domain string probed for a candidate name.
    pub fn domain_for(&self, name: &str) -> String {
        format!("{}.{}", name.to_lowercase(), self.tld)
    }
}

impl Default for DnsProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilityProbe for DnsProber {
    async fn probe(&self, name: &str) -> bool {
        let domain = self.domain_for(name);

        match self.resolver.lookup(domain.as_str(), RecordType::A).await {
            Ok(records) => {
                tracing::debug!(
                    domain = %domain,
                    answers = records.iter().count(),
                    "domain resolves, treating as registered"
                );
                false
            }
            Err(e) => {
                tracing::debug!(
                    domain = %domain,
                    error = %e,
                    "resolution failed, treating as available"
                );
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::AvailabilityProbe;

    #[test]
    fn test_domain_building() {
        let prober = DnsProber::new();
        assert_eq!(prober.domain_for("Acme"), "acme.com");
        assert_eq!(prober.domain_for("Zeta Labs"), "zeta labs.com");

        let prober = DnsProber::with_tld("io");
        assert_eq!(prober.domain_for("Acme"), "acme.io");
    }

    #[tokio::test]
    async fn test_unresolvable_name_reads_as_available() {
        let prober = DnsProber::new();
        // An invalid hostname cannot resolve, with or without network
        // access, so the optimistic-on-error policy must report true.
        assert!(prober.probe("definitely not a hostname !!").await);
    }
}
