//! Snapshot-file providers
//!
//! A snapshot is a JSON export of the collaborator state the analyzer
//! normally reads live: utilization summaries, allocation rows and
//! per-namespace baseline costs. Backing the provider traits with a
//! file keeps the CLI fully offline.

use std::collections::HashMap;
use std::path::Path;

use analyzer_lib::{
    AllocationStore, AnalysisWindow, CostSource, MetricsProvider, ResourceAllocation,
    ResourceKind, UtilizationSummary, WorkloadId,
};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// On-disk snapshot of collaborator state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub summaries: Vec<UtilizationSummary>,
    #[serde(default)]
    pub allocations: Vec<ResourceAllocation>,
    /// USD per hour, keyed by namespace
    #[serde(default)]
    pub baseline_hourly_costs: HashMap<String, f64>,
}

impl Snapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))
    }
}

/// Implements the analyzer's provider traits over a loaded snapshot
///
/// Summaries in a snapshot are already computed over their capture
/// window, so the requested window is not re-applied; the minimum
/// sample gate still is.
pub struct SnapshotProvider {
    snapshot: Snapshot,
    min_data_points: u64,
}

impl SnapshotProvider {
    pub fn new(snapshot: Snapshot, min_data_points: u64) -> Self {
        Self {
            snapshot,
            min_data_points,
        }
    }
}

#[async_trait]
impl MetricsProvider for SnapshotProvider {
    async fn summarize(
        &self,
        workload: &WorkloadId,
        resource: ResourceKind,
        _window: AnalysisWindow,
    ) -> anyhow::Result<Option<UtilizationSummary>> {
        let summary = self
            .snapshot
            .summaries
            .iter()
            .find(|s| s.workload == *workload && s.resource == resource);

        Ok(summary
            .filter(|s| s.sample_count >= self.min_data_points)
            .cloned())
    }

    async fn list_workloads(&self, namespace: &str) -> anyhow::Result<Vec<WorkloadId>> {
        let mut workloads: Vec<WorkloadId> = Vec::new();
        for summary in &self.snapshot.summaries {
            if summary.workload.namespace == namespace && !workloads.contains(&summary.workload) {
                workloads.push(summary.workload.clone());
            }
        }
        Ok(workloads)
    }
}

#[async_trait]
impl AllocationStore for SnapshotProvider {
    async fn current_allocation(
        &self,
        workload: &WorkloadId,
    ) -> anyhow::Result<Option<ResourceAllocation>> {
        // Latest-wins across duplicate rows
        Ok(self
            .snapshot
            .allocations
            .iter()
            .filter(|a| a.workload == *workload)
            .max_by_key(|a| a.observed_at)
            .cloned())
    }
}

#[async_trait]
impl CostSource for SnapshotProvider {
    async fn namespace_baseline_cost(
        &self,
        namespace: &str,
        window: AnalysisWindow,
    ) -> anyhow::Result<f64> {
        match self.snapshot.baseline_hourly_costs.get(namespace) {
            Some(hourly) => Ok(hourly * window.hours()),
            None => {
                warn!(namespace, "No baseline cost in snapshot, assuming zero");
                Ok(0.0)
            }
        }
    }
}
