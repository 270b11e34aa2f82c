//! Anthropic provider implementation
//!
//! Supports Anthropic's Claude API. The generation schema is attached
//! as a tool and tool choice forces the model to use it.

use crate::error::{BrandSeekError, Result};
use crate::llm::{LlmProvider, SchemaRequest};
use crate::types::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_OUTPUT_TOKENS: u32 = 3500;

/// Anthropic provider implementation
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl AnthropicProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(BrandSeekError::config("Anthropic API key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BrandSeekError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.anthropic.com/v1".to_string()),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn invoke(&self, request: &SchemaRequest) -> Result<String> {
        let body = AnthropicRequest {
            model: self.model.clone(),
            system: request.system.clone(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: request.user.clone(),
            }],
            tools: vec![AnthropicTool {
                name: request.function_name.clone(),
                input_schema: request.schema.clone(),
            }],
            tool_choice: serde_json::json!({
                "type": "tool",
                "name": request.function_name
            }),
            temperature: self.temperature,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let url = format!("{}/messages", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                BrandSeekError::network(
                    format!("Failed to connect to Anthropic API: {}", e),
                    None,
                    Some(url.clone()),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let error_msg = match status.as_u16() {
                401 => "Authentication failed (401). Please check your Anthropic API key".to_string(),
                403 => "Access forbidden (403). Your API key may not have permission".to_string(),
                429 => "Rate limit exceeded (429). Please try again later".to_string(),
                500..=599 => format!(
                    "Anthropic server error ({}). The API service is experiencing issues",
                    status
                ),
                _ => format!("Anthropic API request failed ({}): {}", status, error_text),
            };

            return Err(BrandSeekError::network(
                error_msg,
                Some(status.as_u16()),
                Some(url),
            ));
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| BrandSeekError::parse(e.to_string(), None))?;

        let input = anthropic_response
            .content
            .iter()
            .find(|block| block.kind == "tool_use")
            .and_then(|block| block.input.as_ref())
            .ok_or_else(|| {
                BrandSeekError::parse("Model returned no tool_use block".to_string(), None)
            })?;

        serde_json::to_string(input)
            .map_err(|e| BrandSeekError::parse(e.to_string(), None))
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// Anthropic API structures
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    system: String,
    messages: Vec<AnthropicMessage>,
    tools: Vec<AnthropicTool>,
    tool_choice: serde_json::Value,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct AnthropicTool {
    name: String,
    input_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    input: Option<serde_json::Value>,
}
