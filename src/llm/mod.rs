//! LLM (Large Language Model) integration module
//!
//! Schema-constrained brand name generation with retry-wrapped invocation.

pub mod generator;
pub mod invoker;
pub mod providers;

// Re-export main functionality
pub use generator::BrandGenerator;
pub use invoker::{invoke_json, RetryPolicy};

use crate::error::Result;
use crate::types::LlmConfig;
use async_trait::async_trait;
use serde::Deserialize;

/// One forced structured-output call: the model is instructed to emit
/// exactly one function-style result matching `schema`.
#[derive(Debug, Clone)]
pub struct SchemaRequest {
    pub system: String,
    pub user: String,
    pub function_name: String,
    pub schema: serde_json::Value,
}

/// The structured payload the generation schema describes.
#[derive(Debug, Clone, Deserialize)]
pub struct BrandNameBatch {
    #[serde(rename = "brandNames")]
    pub brand_names: Vec<String>,
}

/// JSON schema for a brand name batch.
pub fn brand_names_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "brandNames": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Array of brand names"
            }
        },
        "required": ["brandNames"]
    })
}

/// Core trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Issue a single schema-constrained call and return the raw
    /// arguments text of the forced function invocation, unparsed.
    async fn invoke(&self, request: &SchemaRequest) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Get model name being used
    fn model(&self) -> &str;

    /// Check if provider is configured and ready
    fn is_ready(&self) -> bool;
}

/// Get available LLM providers
pub fn available_providers() -> Vec<&'static str> {
    vec!["openai", "anthropic"]
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LlmProvider>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(providers::OpenAiProvider::new(config)?)),
        "anthropic" => Ok(Box::new(providers::AnthropicProvider::new(config)?)),
        _ => Err(crate::error::BrandSeekError::config(format!(
            "Unsupported LLM provider: {}. Supported providers: {}",
            config.provider,
            available_providers().join(", ")
        ))),
    }
}
