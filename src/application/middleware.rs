//! Robustness middleware around tool-backed API calls.
//!
//! Wraps each tool invocation: transient upstream failures are retried with
//! exponential backoff, a terminal 404 on designated read operations is
//! replaced with a neutral value, and every other terminal failure is
//! normalized into a consistent caller-facing message. Retries re-invoke the
//! underlying operation in full, headers included; callers issuing
//! non-idempotent operations accept the replay risk.

use crate::infrastructure::api::ApiError;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Message fragments that mark a failure as transient. Matched
/// case-insensitively against the classified error message.
const RETRYABLE_MARKERS: &[&str] = &[
    "502",
    "503",
    "504",
    "bad gateway",
    "service unavailable",
    "gateway timeout",
    "request error",
    "connection",
    "timed out",
    "timeout",
];

/// How often and how hard to retry a transient failure.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry `attempt` (zero-based): `base_delay * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Neutral substitute for a 404 on an operation where absence is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftFallback {
    /// The optional resource does not exist: report "no result".
    NoResult,
    /// The collection has no members yet.
    EmptyList,
}

/// Terminal failure of a tool invocation, with the normalized message the
/// caller-facing layer renders.
#[derive(Debug, Error)]
#[error("Upstream API error for {tool}: {detail}")]
pub struct ToolCallError {
    tool: String,
    detail: String,
    #[source]
    source: ApiError,
}

impl ToolCallError {
    fn new(tool: &str, source: ApiError) -> Self {
        let raw = source.to_string();
        let redundant_prefix = format!("Error calling tool '{tool}': ");
        let detail = raw
            .strip_prefix(&redundant_prefix)
            .unwrap_or(&raw)
            .to_string();
        Self {
            tool: tool.to_string(),
            detail,
            source,
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// The underlying classified error, for kind inspection.
    pub fn api_error(&self) -> &ApiError {
        &self.source
    }
}

/// Whether a classified error message indicates a transient failure worth
/// retrying: an upstream 502/503/504, a generic request error, a connection
/// error, or a timeout.
pub fn is_retryable(message: &str) -> bool {
    let lowered = message.to_lowercase();
    RETRYABLE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Executes tool-backed operations under the retry and fallback policy.
#[derive(Debug, Clone, Default)]
pub struct ToolGuard {
    policy: RetryPolicy,
}

impl ToolGuard {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `op` under the policy.
    ///
    /// `fallback` is the operation's entry in the soft-404 table: when the
    /// terminal failure is a 404 and a producer is registered, its neutral
    /// value is returned instead of the error. The producer is an infallible
    /// function pointer, so fallback computation itself cannot fail.
    pub async fn run<T, F, Fut>(
        &self,
        tool: &str,
        fallback: Option<fn() -> T>,
        mut op: F,
    ) -> Result<T, ToolCallError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            match op().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(tool, attempt, "Upstream call succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    let message = error.to_string();
                    if is_retryable(&message) && attempt < self.policy.max_retries {
                        let delay = self.policy.delay_for(attempt);
                        warn!(
                            tool,
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            %error,
                            "Transient upstream failure, retrying"
                        );
                        sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    if error.is_not_found() {
                        if let Some(produce) = fallback {
                            debug!(tool, "404 on optional resource, substituting neutral value");
                            return Ok(produce());
                        }
                    }

                    return Err(ToolCallError::new(tool, error));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_matches_gateway_statuses_and_transport_failures() {
        assert!(is_retryable("API Error: 502 - upstream reset"));
        assert!(is_retryable("API Error: 503 - try later"));
        assert!(is_retryable("Gateway Timeout"));
        assert!(is_retryable("Network error: connection refused"));
        assert!(is_retryable("Network error: operation timed out"));
        assert!(!is_retryable("Requested resource not found"));
        assert!(!is_retryable("Invalid or expired API token"));
        assert!(!is_retryable("API Error: 400 - bad request"));
    }

    #[test]
    fn delays_double_from_the_base() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
    }

    #[test]
    fn normalization_strips_the_redundant_prefix() {
        let error = ToolCallError::new(
            "sitebay_get_site",
            ApiError::api("Error calling tool 'sitebay_get_site': boom", Some(400), None),
        );
        assert_eq!(
            error.to_string(),
            "Upstream API error for sitebay_get_site: boom"
        );
    }

    #[test]
    fn normalization_keeps_other_messages_intact() {
        let error = ToolCallError::new(
            "sitebay_get_site",
            ApiError::not_found("Requested resource not found"),
        );
        assert_eq!(
            error.to_string(),
            "Upstream API error for sitebay_get_site: Requested resource not found"
        );
    }
}
