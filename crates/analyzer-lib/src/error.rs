//! Error types for the analyzer core
//!
//! Insufficient samples and waste-gate suppression are expected
//! outcomes and surface as absent values, not errors.

use crate::models::WorkloadId;
use thiserror::Error;

/// Errors surfaced by analysis and simulation entry points
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// A collaborator call failed after the resilience layer gave up
    #[error("provider call failed: {0}")]
    Provider(#[source] anyhow::Error),

    /// The circuit breaker is open and short-circuited the call
    #[error("circuit breaker is open")]
    CircuitOpen,

    /// No current allocation row exists for the workload
    #[error("no current allocation for workload {0}")]
    MissingAllocation(WorkloadId),

    /// Unrecognized simulation period
    #[error("invalid simulation period: {0:?} (expected daily, monthly or yearly)")]
    InvalidPeriod(String),
}

impl AnalyzerError {
    /// Whether a namespace run may skip this workload and continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AnalyzerError::MissingAllocation(_))
    }
}

pub type Result<T, E = AnalyzerError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_allocation_is_recoverable() {
        let err = AnalyzerError::MissingAllocation(WorkloadId::new("ns", "pod", "app"));
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("ns/pod/app"));
    }

    #[test]
    fn test_provider_error_not_recoverable() {
        let err = AnalyzerError::Provider(anyhow::anyhow!("connection refused"));
        assert!(!err.is_recoverable());
    }
}
