//! Bounded exponential-backoff retry for rate-limited calls.

use anyhow::{Result, anyhow};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Substrings that mark an error as a rate-limit rejection
const RATE_LIMIT_SIGNATURES: [&str; 3] = ["429", "RESOURCE_EXHAUSTED", "quota"];

/// Attempt budget and initial delay for [`with_retry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles after every retry
    pub initial_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
        }
    }

    /// Delay slept after the given failed attempt (0-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.initial_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(2000),
        }
    }
}

/// Whether an error (including its causes) carries a rate-limit signature
pub fn is_rate_limited(error: &anyhow::Error) -> bool {
    let rendered = format!("{error:#}");
    RATE_LIMIT_SIGNATURES
        .iter()
        .any(|signature| rendered.contains(signature))
}

/// Run `operation`, retrying rate-limited failures with exponential backoff.
///
/// Successes are returned untouched. Rate-limited failures are retried after
/// sleeping, the delay doubling each time, until the attempt budget runs out;
/// the final attempt's error is returned as is. Any other error is returned
/// immediately without retrying.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for attempt in 0..policy.max_attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                let is_last = attempt + 1 >= policy.max_attempts;
                if !is_rate_limited(&error) || is_last {
                    return Err(error);
                }

                let delay = policy.delay_after(attempt);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = policy.max_attempts,
                    ?delay,
                    "Rate limit hit, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }

    Err(anyhow!("Maximum retries exceeded"))
}
