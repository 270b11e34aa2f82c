//! Run loop controller
//!
//! Drives generation-through-aggregation passes until enough accepted
//! candidates have accumulated. The accepted set is owned here and
//! threaded through passes explicitly; there is no process-wide state.

use std::sync::Arc;

use futures::future::join_all;

use crate::check::{aggregate, AvailabilityProbe, DnsProber, RegistrationLookup, WhoisClient};
use crate::check::DEFAULT_TLD;
use crate::error::Result;
use crate::llm::BrandGenerator;
use crate::types::{AvailabilityRecord, GenerationConfig};

/// Run loop configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Stop once this many accepted candidates have accumulated.
    pub target_available: usize,
    /// Candidates requested from the model per pass.
    pub candidates_per_pass: usize,
    /// TLD checked for every candidate.
    pub tld: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_available: 20,
            candidates_per_pass: 10,
            tld: DEFAULT_TLD.to_string(),
        }
    }
}

/// Outcome of one full pass.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub candidates: usize,
    pub accepted: usize,
}

/// Orchestrates generate → probe → WHOIS → aggregate passes.
pub struct RunController {
    generator: BrandGenerator,
    prober: Arc<dyn AvailabilityProbe>,
    registry: Arc<dyn RegistrationLookup>,
    config: RunConfig,
}

impl RunController {
    /// Controller with the default DNS prober and WHOIS client.
    pub fn new(generator: BrandGenerator, config: RunConfig) -> Self {
        let prober = Arc::new(DnsProber::with_tld(config.tld.clone()));
        let registry = Arc::new(WhoisClient::new());
        Self::with_collaborators(generator, prober, registry, config)
    }

    /// Controller with injected probe and registration collaborators.
    pub fn with_collaborators(
        generator: BrandGenerator,
        prober: Arc<dyn AvailabilityProbe>,
        registry: Arc<dyn RegistrationLookup>,
        config: RunConfig,
    ) -> Self {
        Self {
            generator,
            prober,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run one full generation and verification pass, appending the
    /// accepted records to `accepted`.
    ///
    /// Both verification stages fan out over the whole candidate set
    /// and join before the next stage starts, so every record has its
    /// DNS flag set before its WHOIS lookup runs, and the aggregator
    /// only ever sees fully-verified records.
    pub async fn run_pass(
        &self,
        description: &str,
        accepted: &mut Vec<AvailabilityRecord>,
    ) -> Result<PassOutcome> {
        let generation = GenerationConfig {
            description: description.to_string(),
            count: self.config.candidates_per_pass,
        };

        let candidates = self.generator.generate_with_fallback(&generation).await?;

        let mut records: Vec<AvailabilityRecord> = candidates
            .iter()
            .map(|candidate| AvailabilityRecord::new(candidate, &self.config.tld))
            .collect();

        // DNS stage: launch all, await all.
        let flags = join_all(records.iter().map(|r| self.prober.probe(&r.name))).await;
        for (record, dns_available) in records.iter_mut().zip(flags) {
            record.dns_available = dns_available;
        }

        // WHOIS stage: launch all, await all.
        let infos = join_all(
            records
                .iter()
                .map(|r| self.registry.fetch_registration(&r.domain)),
        )
        .await;
        for (record, info) in records.iter_mut().zip(infos) {
            record.registration = info;
        }

        let candidate_count = records.len();
        let passed = aggregate(records);
        let outcome = PassOutcome {
            candidates: candidate_count,
            accepted: passed.len(),
        };
        accepted.extend(passed);

        tracing::info!(
            candidates = outcome.candidates,
            accepted_this_pass = outcome.accepted,
            total_accepted = accepted.len(),
            "pass completed"
        );

        Ok(outcome)
    }

    /// Repeat passes until the accepted set reaches the configured
    /// target. There is no upper bound on passes; the only exit paths
    /// are the threshold and a fatal generation error.
    pub async fn run_until_target(&self, description: &str) -> Result<Vec<AvailabilityRecord>> {
        let mut accepted = Vec::new();

        while accepted.len() < self.config.target_available {
            self.run_pass(description, &mut accepted).await?;
        }

        Ok(accepted)
    }
}
