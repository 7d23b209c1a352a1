//! Circuit breaker with explicit tagged states
//!
//! The three states live in one enum behind a mutex so every
//! transition, including the half-open trial counting, is atomic.

use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::AnalyzerError;

/// Breaker state machine
///
/// Closed admits all calls and counts consecutive failures. Open
/// rejects calls until the cooldown elapses, then moves to half-open.
/// Half-open admits trial calls; enough successes close the circuit,
/// any failure reopens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed { consecutive_failures: u32 },
    Open { since: Instant },
    HalfOpen { successes: u32 },
}

/// Configuration for the circuit breaker
#[derive(Debug, Clone)]
pub struct BreakerConfig {
    /// Consecutive failures that open the circuit
    pub failure_threshold: u32,
    /// How long the circuit stays open before trial calls are allowed
    pub cooldown: Duration,
    /// Half-open successes required to close the circuit
    pub success_threshold: u32,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            cooldown: Duration::from_secs(30),
            success_threshold: 3,
        }
    }
}

/// Guards collaborator calls against a persistently failing dependency
#[derive(Debug)]
pub struct CircuitBreaker {
    config: BreakerConfig,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            state: Mutex::new(BreakerState::Closed {
                consecutive_failures: 0,
            }),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> BreakerState {
        *self.state.lock().expect("breaker lock poisoned")
    }

    /// Admit or reject a call, transitioning open -> half-open after
    /// the cooldown
    pub fn try_acquire(&self) -> Result<(), AnalyzerError> {
        let mut state = self.state.lock().expect("breaker lock poisoned");
        match *state {
            BreakerState::Closed { .. } | BreakerState::HalfOpen { .. } => Ok(()),
            BreakerState::Open { since } => {
                if since.elapsed() >= self.config.cooldown {
                    info!("Circuit breaker cooldown elapsed, moving to half-open");
                    *state = BreakerState::HalfOpen { successes: 0 };
                    Ok(())
                } else {
                    Err(AnalyzerError::CircuitOpen)
                }
            }
        }
    }

    /// Record a successful call
    pub fn record_success(&self) {
        let mut state = self.state.lock().expect("breaker lock poisoned");
        match *state {
            BreakerState::Closed { .. } => {
                *state = BreakerState::Closed {
                    consecutive_failures: 0,
                };
            }
            BreakerState::HalfOpen { successes } => {
                let successes = successes + 1;
                if successes >= self.config.success_threshold {
                    info!("Circuit breaker closed after successful trial calls");
                    *state = BreakerState::Closed {
                        consecutive_failures: 0,
                    };
                } else {
                    *state = BreakerState::HalfOpen { successes };
                }
            }
            BreakerState::Open { .. } => {}
        }
    }

    /// Record a failed call
    pub fn record_failure(&self) {
        let mut state = self.state.lock().expect("breaker lock poisoned");
        match *state {
            BreakerState::Closed {
                consecutive_failures,
            } => {
                let consecutive_failures = consecutive_failures + 1;
                if consecutive_failures >= self.config.failure_threshold {
                    warn!(
                        failures = consecutive_failures,
                        "Circuit breaker opened after consecutive failures"
                    );
                    *state = BreakerState::Open {
                        since: Instant::now(),
                    };
                } else {
                    *state = BreakerState::Closed {
                        consecutive_failures,
                    };
                }
            }
            BreakerState::HalfOpen { .. } => {
                warn!("Circuit breaker reopened after half-open trial failure");
                *state = BreakerState::Open {
                    since: Instant::now(),
                };
            }
            BreakerState::Open { .. } => {}
        }
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(BreakerConfig::default())
    }
}
