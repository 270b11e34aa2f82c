//! Availability verification module
//!
//! Two independent signals per candidate: a DNS resolution probe and a
//! WHOIS registration lookup, reconciled by the aggregator.

pub mod aggregate;
pub mod prober;
pub mod whois;

// Re-export main functionality
pub use aggregate::aggregate;
pub use prober::DnsProber;
pub use whois::WhoisClient;

use crate::types::RegistrationInfo;
use async_trait::async_trait;

/// Default TLD checked for every candidate.
pub const DEFAULT_TLD: &str = "com";

/// Fast heuristic: does the candidate's domain appear unregistered?
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// True means "appears available". Any resolution failure counts
    /// as availability; this never fails the caller.
    async fn probe(&self, name: &str) -> bool;
}

/// Registration metadata lookup for a fully-qualified domain.
#[async_trait]
pub trait RegistrationLookup: Send + Sync {
    /// Lookup errors are swallowed and yield an all-empty
    /// `RegistrationInfo`; this never fails the caller.
    async fn fetch_registration(&self, domain: &str) -> RegistrationInfo;
}
