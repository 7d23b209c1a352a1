//! Resilience layer guarding collaborator calls
//!
//! Every metrics, allocation and billing fetch crosses the core
//! boundary through this layer: retry with exponential backoff and
//! jitter, behind a circuit breaker that short-circuits calls to a
//! persistently failing dependency.

mod breaker;
mod retry;

pub use breaker::{BreakerConfig, BreakerState, CircuitBreaker};
pub use retry::RetryPolicy;

use std::future::Future;

use crate::error::AnalyzerError;

/// Combined breaker admission + retry around one collaborator call
#[derive(Debug, Default)]
pub struct ResilienceLayer {
    retry: RetryPolicy,
    breaker: CircuitBreaker,
}

impl ResilienceLayer {
    pub fn new(retry: RetryPolicy, breaker: CircuitBreaker) -> Self {
        Self { retry, breaker }
    }

    /// Breaker state, exposed for observability
    pub fn breaker_state(&self) -> BreakerState {
        self.breaker.state()
    }

    /// Run a collaborator call with breaker admission and retries
    ///
    /// The breaker records the overall outcome, so one exhausted retry
    /// sequence counts as a single failure toward opening the circuit.
    pub async fn call<T, F, Fut>(&self, op: F) -> Result<T, AnalyzerError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        self.breaker.try_acquire()?;

        match self.retry.run(op).await {
            Ok(value) => {
                self.breaker.record_success();
                Ok(value)
            }
            Err(err) => {
                self.breaker.record_failure();
                Err(AnalyzerError::Provider(err))
            }
        }
    }
}
