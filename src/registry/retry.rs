//! Retry with exponential backoff for registry lookups.
//!
//! Only transient [`LookupError`]s are retried. Permanent and internal
//! errors end the loop on the first occurrence.

use std::future::Future;
use std::time::Duration;

use crate::core::LookupError;

const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// How many times to call the registry and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero is treated as one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled before each further one.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

impl RetryPolicy {
    /// A single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
        }
    }

    /// Delay to sleep after the failed attempt number `attempt` (1-based):
    /// `initial_delay * 2^(attempt - 1)`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.initial_delay.saturating_mul(factor)
    }
}

/// Run `operation` until it succeeds, fails permanently or the policy's
/// attempts are used up.
///
/// No delay follows the final attempt; its error is returned unchanged.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, LookupError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LookupError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if !err.is_retryable() {
            tracing::debug!(attempt, error = %err, "not retrying");
            return Err(err);
        }

        if attempt >= max_attempts {
            tracing::warn!(attempts = attempt, error = %err, "retry budget exhausted");
            return Err(err);
        }

        let delay = policy.delay_after(attempt);
        tracing::warn!(attempt, ?delay, error = %err, "transient lookup failure, retrying");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
