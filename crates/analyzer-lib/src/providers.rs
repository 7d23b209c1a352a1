//! Collaborator interfaces consumed by the analyzer core
//!
//! The core is a pure transformation layer: utilization samples, the
//! allocation store and billing data all live behind these traits.
//! Implementations are expected to be wrapped by the resilience layer
//! before the analyzer calls them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{ResourceAllocation, ResourceKind, UtilizationSummary, WorkloadId};

/// Half-open time window over which samples are summarized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AnalysisWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Trailing window ending now
    pub fn trailing(duration: chrono::Duration) -> Self {
        let end = Utc::now();
        Self {
            start: end - duration,
            end,
        }
    }

    /// Window length in hours
    pub fn hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }
}

/// Supplies percentile/mean/stddev summaries per workload and resource
///
/// Percentiles use continuous (interpolated) estimation. `summarize`
/// must return `None` rather than a summary when fewer than the
/// configured minimum number of samples fall in the window; callers
/// treat `None` as "skip this workload/resource", never as zero usage.
#[async_trait]
pub trait MetricsProvider: Send + Sync {
    async fn summarize(
        &self,
        workload: &WorkloadId,
        resource: ResourceKind,
        window: AnalysisWindow,
    ) -> anyhow::Result<Option<UtilizationSummary>>;

    /// Workloads with samples in the window for a namespace
    async fn list_workloads(&self, namespace: &str) -> anyhow::Result<Vec<WorkloadId>>;
}

/// Read access to the most recent resource allocation per workload
#[async_trait]
pub trait AllocationStore: Send + Sync {
    /// Latest allocation row, or `None` when the workload is unknown
    async fn current_allocation(
        &self,
        workload: &WorkloadId,
    ) -> anyhow::Result<Option<ResourceAllocation>>;
}

/// Supplies accrued namespace cost over a trailing window
#[async_trait]
pub trait CostSource: Send + Sync {
    /// Total cost in USD accrued by the namespace during the window
    async fn namespace_baseline_cost(
        &self,
        namespace: &str,
        window: AnalysisWindow,
    ) -> anyhow::Result<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_window_length() {
        let window = AnalysisWindow::trailing(chrono::Duration::hours(1));
        assert!((window.hours() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_window_hours() {
        let end = Utc::now();
        let start = end - chrono::Duration::days(7);
        let window = AnalysisWindow::new(start, end);
        assert!((window.hours() - 168.0).abs() < 0.01);
    }
}
