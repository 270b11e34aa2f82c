//! Brand name generation using LLM
//!
//! Thread-safe provider registry wrapping the retry-aware invoker.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::llm::providers::build_brand_request;
use crate::llm::{create_provider, invoke_json, BrandNameBatch, LlmProvider, RetryPolicy};
use crate::types::{Candidate, GenerationConfig, LlmConfig};

/// Brand name generator backed by one or more LLM providers.
#[derive(Clone)]
pub struct BrandGenerator {
    providers: Arc<RwLock<HashMap<String, Arc<dyn LlmProvider>>>>,
    default_provider: Arc<RwLock<String>>,
    retry: RetryPolicy,
}

impl BrandGenerator {
    /// Create a new brand generator
    pub fn new() -> Self {
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
            default_provider: Arc::new(RwLock::new("openai".to_string())),
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry policy (mainly for tests).
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Add an LLM provider (thread-safe)
    pub fn add_provider(&self, config: &LlmConfig) -> Result<()> {
        let provider = create_provider(config)?;
        let mut providers = self.providers.write();
        providers.insert(config.provider.clone(), Arc::from(provider));
        Ok(())
    }

    /// Register an already-built provider under its own name.
    pub fn add_provider_instance(&self, provider: Arc<dyn LlmProvider>) {
        let name = provider.name().to_string();
        let mut providers = self.providers.write();
        providers.insert(name, provider);
    }

    /// Set default provider (thread-safe)
    pub fn set_default_provider(&self, provider: &str) {
        let providers = self.providers.read();
        if providers.contains_key(provider) {
            let mut default = self.default_provider.write();
            *default = provider.to_string();
        }
    }

    /// Generate brand name candidates using the default provider.
    pub async fn generate(&self, config: &GenerationConfig) -> Result<Vec<Candidate>> {
        let default_provider = self.default_provider.read().clone();
        self.generate_with_provider(config, &default_provider).await
    }

    /// Generate brand name candidates using a specific provider.
    pub async fn generate_with_provider(
        &self,
        config: &GenerationConfig,
        provider_name: &str,
    ) -> Result<Vec<Candidate>> {
        let start_time = Instant::now();

        // Clone the Arc so no lock is held across the await.
        let provider = {
            let providers = self.providers.read();
            providers
                .get(provider_name)
                .ok_or_else(|| {
                    crate::error::BrandSeekError::config(format!(
                        "Provider not configured: {}",
                        provider_name
                    ))
                })?
                .clone()
        };

        let request = build_brand_request(config);
        let batch: BrandNameBatch = invoke_json(provider.as_ref(), &request, &self.retry).await?;

        let mut candidates = Vec::with_capacity(batch.brand_names.len());
        for name in batch.brand_names {
            match Candidate::new(name) {
                Ok(candidate) => candidates.push(candidate),
                Err(e) => {
                    tracing::warn!(error = %e, "discarding invalid candidate from model output");
                }
            }
        }

        tracing::info!(
            provider = %provider_name,
            candidates = %candidates.len(),
            duration_ms = %start_time.elapsed().as_millis(),
            "Brand name generation completed"
        );

        Ok(candidates)
    }

    /// Generate with fallback to other configured providers.
    ///
    /// With a single provider configured this is equivalent to
    /// `generate`; the invoker's budget-exhaustion error propagates
    /// unchanged.
    pub async fn generate_with_fallback(&self, config: &GenerationConfig) -> Result<Vec<Candidate>> {
        let mut last_error = None;

        let default_provider = self.default_provider.read().clone();
        if self.has_provider(&default_provider) {
            match self.generate_with_provider(config, &default_provider).await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    tracing::warn!(provider = %default_provider, error = %e, "Default provider failed");
                    last_error = Some(e);
                }
            }
        }

        let other_providers: Vec<String> = {
            let providers = self.providers.read();
            providers
                .keys()
                .filter(|&name| name != &default_provider)
                .cloned()
                .collect()
        };

        for provider_name in other_providers {
            match self.generate_with_provider(config, &provider_name).await {
                Ok(result) => {
                    tracing::info!(provider = %provider_name, "Fallback provider succeeded");
                    return Ok(result);
                }
                Err(e) => {
                    tracing::warn!(provider = %provider_name, error = %e, "Fallback provider failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            crate::error::BrandSeekError::config("No providers configured".to_string())
        }))
    }

    /// Get available providers (thread-safe)
    pub fn available_providers(&self) -> Vec<String> {
        let providers = self.providers.read();
        providers.keys().cloned().collect()
    }

    /// Check if provider is available (thread-safe)
    pub fn has_provider(&self, provider: &str) -> bool {
        let providers = self.providers.read();
        providers.contains_key(provider)
    }

    /// Check if any providers are configured (thread-safe)
    pub fn is_ready(&self) -> bool {
        let providers = self.providers.read();
        !providers.is_empty()
    }
}

impl Default for BrandGenerator {
    fn default() -> Self {
        Self::new()
    }
}
