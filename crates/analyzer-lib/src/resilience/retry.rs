//! Retry with exponential backoff and jitter
//!
//! Cancellation is drop-based: the retry loop only sleeps and awaits
//! the wrapped operation, so dropping the future aborts cleanly
//! between attempts without emitting partial results.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Backoff parameters for retried collaborator calls
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
    /// Add up to 10% random jitter to each delay
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Policy that never sleeps, for tests
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter: false,
        }
    }

    /// Run `op` until it succeeds or attempts are exhausted
    ///
    /// Returns the last error when every attempt fails.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> anyhow::Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let mut last_err = None;

        for attempt in 0..self.max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    debug!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        error = %err,
                        "Retryable call failed"
                    );
                    last_err = Some(err);
                }
            }

            // No sleep after the final attempt
            if attempt + 1 < self.max_attempts {
                let delay = self.delay_for_attempt(attempt);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("retry with zero attempts")))
    }

    /// Exponential delay for the given zero-based attempt index
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let mut delay =
            self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(attempt as i32);

        if self.jitter {
            delay += rand::thread_rng().gen::<f64>() * 0.1 * delay;
        }

        Duration::from_secs_f64(delay.min(self.max_backoff.as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let policy = RetryPolicy::immediate(3);
        let calls = AtomicU32::new(0);
        let result: anyhow::Result<u32> = policy
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(42) }
            })
            .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_then_succeeds() {
        let policy = RetryPolicy::immediate(3);
        let calls = AtomicU32::new(0);
        let result: anyhow::Result<&str> = policy
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(anyhow::anyhow!("transient"))
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_attempts_and_keeps_last_error() {
        let policy = RetryPolicy::immediate(3);
        let calls = AtomicU32::new(0);
        let result: anyhow::Result<()> = policy
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { Err(anyhow::anyhow!("failure {}", n)) }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(result.unwrap_err().to_string().contains("failure 2"));
    }

    #[test]
    fn test_delay_growth_capped() {
        let policy = RetryPolicy {
            max_attempts: 10,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: false,
        };
        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
        // 2^9 = 512s, capped at 30s
        assert_eq!(policy.delay_for_attempt(9), Duration::from_secs(30));
    }

    #[test]
    fn test_jitter_bounded() {
        let policy = RetryPolicy {
            jitter: true,
            ..RetryPolicy::default()
        };
        for _ in 0..100 {
            let delay = policy.delay_for_attempt(0);
            assert!(delay >= Duration::from_secs(1));
            assert!(delay <= Duration::from_secs_f64(1.1));
        }
    }
}
