//! LLM provider implementations
//!
//! Each provider is implemented in its own module. All of them answer
//! the same request shape: one forced function-style call whose
//! arguments must match the supplied JSON schema.

pub mod anthropic;
pub mod openai;

// Re-export providers for easy access
pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

use crate::llm::{brand_names_schema, SchemaRequest};
use crate::types::GenerationConfig;

/// Name of the forced function the model must call.
pub const BRAND_FUNCTION_NAME: &str = "record_brand_names";

const BRAND_RULES: &str = "\
1. The brand name should be short, succinct, and clear.
2. The brand name should be memorable.
3. The brand name should be easy to pronounce.
4. The brand name should be easy to spell.
5. The brand name should be unique.
6. The brand name should be timeless.
7. The brand name should be versatile.
8. The brand name should not have more than 2 words.";

/// Build the schema-constrained generation request for one pass.
pub fn build_brand_request(config: &GenerationConfig) -> SchemaRequest {
    SchemaRequest {
        system: format!(
            "You are an expert brand namer. You come up with a list of {} possible \
             domain names for a brand we are creating.\n\n{}",
            config.count, BRAND_RULES
        ),
        user: format!(
            "Please generate a list of {} possible .com brand names for: {}",
            config.count, config.description
        ),
        function_name: BRAND_FUNCTION_NAME.to_string(),
        schema: brand_names_schema(),
    }
}
