//! Retry-wrapped LLM invocation
//!
//! Wraps a single schema-constrained call with a bounded retry budget.
//! Transport failures back off linearly before the next attempt;
//! malformed output is retried immediately. Both failure kinds draw
//! from the same attempt budget.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{BrandSeekError, Result};
use crate::llm::{LlmProvider, SchemaRequest};

/// Retry policy shared by transport and parse failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts across both failure kinds.
    pub max_attempts: u32,
    /// Linear backoff step: attempt N waits N * base_delay.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_secs(5),
        }
    }
}

/// Invoke the provider until its output parses as `T` or the attempt
/// budget runs out.
///
/// The backoff is linear, not exponential: the wait before attempt
/// N+1 is N * base_delay, so the first retry happens immediately.
/// Exhausting the budget yields `MaxRetriesExceeded`, which no higher
/// layer recovers from.
pub async fn invoke_json<T: DeserializeOwned>(
    provider: &dyn LlmProvider,
    request: &SchemaRequest,
    policy: &RetryPolicy,
) -> Result<T> {
    let mut attempts: u32 = 0;

    while attempts < policy.max_attempts {
        match provider.invoke(request).await {
            Ok(text) => match serde_json::from_str::<T>(&text) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    attempts += 1;
                    tracing::warn!(
                        provider = %provider.name(),
                        attempt = attempts,
                        error = %e,
                        "model output failed schema validation, retrying without delay"
                    );
                }
            },
            Err(e) if e.is_malformed_output() => {
                attempts += 1;
                tracing::warn!(
                    provider = %provider.name(),
                    attempt = attempts,
                    error = %e,
                    "model returned no usable structured call, retrying without delay"
                );
            }
            Err(e) => {
                let wait = policy.base_delay * attempts;
                tracing::warn!(
                    provider = %provider.name(),
                    attempt = attempts + 1,
                    wait_secs = wait.as_secs(),
                    error = %e,
                    "LLM call failed, backing off before retry"
                );
                tokio::time::sleep(wait).await;
                attempts += 1;
            }
        }
    }

    Err(BrandSeekError::MaxRetriesExceeded { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::BrandNameBatch;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Provider that replays a scripted sequence of results.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<String>>>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn invoke(&self, _request: &SchemaRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(BrandSeekError::network("script exhausted", None, None)))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-model"
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    fn request() -> SchemaRequest {
        SchemaRequest {
            system: "system".to_string(),
            user: "user".to_string(),
            function_name: "record_brand_names".to_string(),
            schema: crate::llm::brand_names_schema(),
        }
    }

    #[tokio::test]
    async fn test_valid_payload_parses_on_first_attempt() {
        let provider =
            ScriptedProvider::new(vec![Ok(r#"{"brandNames":["Acme","Zeta"]}"#.to_string())]);

        let batch: BrandNameBatch = invoke_json(&provider, &request(), &RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(batch.brand_names, vec!["Acme", "Zeta"]);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_output_retries_without_delay() {
        let provider = ScriptedProvider::new(vec![
            Ok("not json".to_string()),
            Ok("not json".to_string()),
            Ok(r#"{"brandNames":["Acme","Zeta"]}"#.to_string()),
        ]);

        let start = tokio::time::Instant::now();
        let batch: BrandNameBatch = invoke_json(&provider, &request(), &RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(batch.brand_names.len(), 2);
        assert_eq!(provider.calls(), 3);
        // Parse failures bypass the backoff wait entirely.
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failures_exhaust_budget_after_ten_attempts() {
        let failures: Vec<Result<String>> = (0..25)
            .map(|_| Err(BrandSeekError::network("service down", None, None)))
            .collect();
        let provider = ScriptedProvider::new(failures);

        let result: Result<BrandNameBatch> =
            invoke_json(&provider, &request(), &RetryPolicy::default()).await;

        match result {
            Err(BrandSeekError::MaxRetriesExceeded { attempts }) => assert_eq!(attempts, 10),
            other => panic!("expected MaxRetriesExceeded, got {:?}", other),
        }
        assert_eq!(provider.calls(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_backoff_is_linear() {
        let provider = ScriptedProvider::new(vec![
            Err(BrandSeekError::network("down", None, None)),
            Err(BrandSeekError::network("down", None, None)),
            Err(BrandSeekError::network("down", None, None)),
            Ok(r#"{"brandNames":["Acme"]}"#.to_string()),
        ]);

        let start = tokio::time::Instant::now();
        let batch: BrandNameBatch = invoke_json(&provider, &request(), &RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(batch.brand_names, vec!["Acme"]);
        // Waits before retries: 0s, 5s, 10s.
        assert_eq!(start.elapsed(), Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_mixed_failures_share_one_budget() {
        let provider = ScriptedProvider::new(vec![
            Ok("not json".to_string()),
            Err(BrandSeekError::parse("no structured call in response", None)),
            Ok(r#"{"brandNames":["Acme"]}"#.to_string()),
        ]);

        let batch: BrandNameBatch = invoke_json(&provider, &request(), &RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(batch.brand_names, vec!["Acme"]);
        assert_eq!(provider.calls(), 3);
    }
}
