//! Retry logic with exponential backoff
//!
//! Transient failures are driven through an explicit outcome loop rather than
//! an exception chain: each attempt returns a `Result`, the error classifies
//! itself via [`IsTransient`], and the loop owns the backoff schedule.

use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as transient or terminal
///
/// Transient conditions (timeouts, connection failures, 429, 5xx) should
/// return `true`. Everything else is terminal and must not be retried.
pub trait IsTransient {
    /// Returns true if the error is temporary and the operation should be retried
    fn is_transient(&self) -> bool;
}

/// Backoff schedule for [`with_retry`]
///
/// `max_attempts` counts total attempts, including the first one.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts before the last error is surfaced
    pub max_attempts: u32,

    /// Delay before the second attempt
    pub initial_delay: Duration,

    /// Upper bound on any single delay
    pub max_delay: Duration,

    /// Factor applied to the delay after each attempt
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            backoff_multiplier: 2.0,
        }
    }
}

/// Executes an async operation under the given retry policy
///
/// Terminal errors and the last transient error after the budget is spent are
/// returned to the caller unchanged; nothing is swallowed.
///
/// # Arguments
///
/// * `policy` - Backoff schedule and attempt budget
/// * `operation` - Async closure returning `Result<T, E>` where `E: IsTransient`
pub async fn with_retry<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsTransient + std::fmt::Display,
{
    let mut attempt: u32 = 1;
    let mut delay = policy.initial_delay;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempts = attempt, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if e.is_transient() && attempt < policy.max_attempts => {
                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis(),
                    "transient failure, retrying"
                );

                tokio::time::sleep(delay).await;

                let next = delay.as_secs_f64() * policy.backoff_multiplier;
                delay = Duration::from_secs_f64(next.min(policy.max_delay.as_secs_f64()));
                attempt += 1;
            }
            Err(e) => {
                if e.is_transient() {
                    tracing::error!(
                        error = %e,
                        attempts = attempt,
                        "retry budget exhausted"
                    );
                } else {
                    tracing::error!(error = %e, "terminal failure, not retrying");
                }
                return Err(e);
            }
        }
    }
}
