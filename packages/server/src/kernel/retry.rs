//! Retry with exponential backoff for provider calls.
//!
//! Only errors for which [`ProviderError::is_retriable`] holds are retried.
//! Anything else ends the loop after the attempt that produced it.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use super::ProviderError;

/// Largest exponent applied to the base delay.
const MAX_BACKOFF_DOUBLINGS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further one
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Error)]
pub enum RetryError {
    /// A non-retriable failure; no further attempts were made
    #[error("attempt {attempt} failed permanently: {source}")]
    Permanent {
        attempt: u32,
        #[source]
        source: ProviderError,
    },

    /// Every attempt failed with a retriable error
    #[error("giving up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: ProviderError,
    },
}

impl RetryPolicy {
    /// Backoff to wait after the given failed attempt (1-based).
    ///
    /// `base_delay * 2^(attempt - 1)`: 2s, 4s, 8s, ... for a 2s base.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(MAX_BACKOFF_DOUBLINGS);
        self.base_delay.saturating_mul(1u32 << doublings)
    }

    /// Run `operation` until it succeeds, fails permanently, or the attempt
    /// budget is spent. `operation` receives the 1-based attempt number.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> Result<T, RetryError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retriable() => {
                    return Err(RetryError::Permanent { attempt, source: e });
                }
                Err(e) if attempt >= max_attempts => {
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                Err(e) => {
                    let delay = self.backoff(attempt);
                    warn!(
                        error = %e,
                        attempt = attempt,
                        max_attempts = max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "Retriable provider error, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    debug!(attempt = attempt, "Retrying provider call");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let p = policy();
        assert_eq!(p.backoff(1), Duration::from_secs(2));
        assert_eq!(p.backoff(2), Duration::from_secs(4));
        assert_eq!(p.backoff(3), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_saturates() {
        let p = RetryPolicy {
            max_attempts: 100,
            base_delay: Duration::from_secs(u64::MAX / 2),
        };
        assert_eq!(p.backoff(50), Duration::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = policy()
            .run(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 1 {
                        Err(ProviderError::Unavailable("overloaded".into()))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_error_stops_immediately() {
        let calls = AtomicU32::new(0);
        let err = policy()
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(ProviderError::Rejected("invalid request".into())) }
            })
            .await
            .unwrap_err();

        assert!(matches!(err, RetryError::Permanent { attempt: 1, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_waits_between_attempts() {
        let start = tokio::time::Instant::now();
        let err = policy()
            .run(|_| async { Err::<(), _>(ProviderError::Unavailable("503".into())) })
            .await
            .unwrap_err();

        assert!(matches!(err, RetryError::Exhausted { attempts: 3, .. }));
        // 2s after the first attempt, 4s after the second, none after the last
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(6), "waited {waited:?}");
        assert!(waited < Duration::from_secs(7), "waited {waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_tries_once() {
        let p = RetryPolicy {
            max_attempts: 0,
            base_delay: Duration::from_secs(2),
        };
        let err = p
            .run(|_| async { Err::<(), _>(ProviderError::EmptyResponse("".into())) })
            .await
            .unwrap_err();

        assert!(matches!(err, RetryError::Exhausted { attempts: 1, .. }));
    }
}
