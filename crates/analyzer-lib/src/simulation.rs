//! What-if cost simulation
//!
//! Projects namespace cost for a hypothetical set of allocation and
//! replica changes without committing anything. Reads the same
//! allocation snapshots and cost model as the recommender, mutates no
//! state, and yields identical results for identical inputs.

use std::sync::Arc;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::cost::CostModel;
use crate::error::AnalyzerError;
use crate::models::{
    CostBreakdown, ResourceKind, SimulationChange, SimulationPeriod, SimulationResult,
};
use crate::providers::{AllocationStore, AnalysisWindow, CostSource};
use crate::resilience::ResilienceLayer;

/// Trailing window used to sample the namespace baseline cost
const BASELINE_WINDOW_HOURS: i64 = 1;

// Fixed cost-attribution ratios. A heuristic approximation of how
// projected spend splits across infrastructure, not a derived figure.
const COMPUTE_RATIO: f64 = 0.60;
const STORAGE_RATIO: f64 = 0.20;
const NETWORK_RATIO: f64 = 0.15;
const OTHER_RATIO: f64 = 0.05;

/// Projects cost deltas for hypothetical allocation changes
pub struct SimulationEngine {
    cost: CostModel,
    allocations: Arc<dyn AllocationStore>,
    costs: Arc<dyn CostSource>,
    allocation_guard: ResilienceLayer,
    cost_guard: ResilienceLayer,
}

impl SimulationEngine {
    pub fn new(
        config: &AnalyzerConfig,
        allocations: Arc<dyn AllocationStore>,
        costs: Arc<dyn CostSource>,
    ) -> Self {
        Self {
            cost: CostModel::from_config(config),
            allocations,
            costs,
            allocation_guard: ResilienceLayer::default(),
            cost_guard: ResilienceLayer::default(),
        }
    }

    /// Replace the resilience layers guarding collaborator calls
    pub fn with_resilience(
        mut self,
        allocation_guard: ResilienceLayer,
        cost_guard: ResilienceLayer,
    ) -> Self {
        self.allocation_guard = allocation_guard;
        self.cost_guard = cost_guard;
        self
    }

    /// Project namespace cost under the proposed changes
    pub async fn simulate(
        &self,
        namespace: &str,
        changes: &[SimulationChange],
        period: SimulationPeriod,
    ) -> Result<SimulationResult, AnalyzerError> {
        let window = AnalysisWindow::trailing(chrono::Duration::hours(BASELINE_WINDOW_HOURS));
        let baseline = self
            .cost_guard
            .call(|| self.costs.namespace_baseline_cost(namespace, window))
            .await?;
        let baseline_hourly = baseline / window.hours();

        let mut hourly_delta = 0.0;
        for change in changes {
            hourly_delta += self.change_delta(change).await?;
        }

        let multiplier = period.hours();
        let current_cost = baseline_hourly * multiplier;
        let projected_cost = (baseline_hourly + hourly_delta) * multiplier;
        let savings = current_cost - projected_cost;
        let savings_percent = if current_cost > 0.0 {
            savings / current_cost * 100.0
        } else {
            0.0
        };

        Ok(SimulationResult {
            current_cost,
            projected_cost,
            cost_delta: hourly_delta * multiplier,
            savings,
            savings_percent,
            breakdown: CostBreakdown {
                compute: projected_cost * COMPUTE_RATIO,
                storage: projected_cost * STORAGE_RATIO,
                network: projected_cost * NETWORK_RATIO,
                other: projected_cost * OTHER_RATIO,
            },
        })
    }

    /// Hourly cost delta for one change against the current allocation
    ///
    /// An unknown workload contributes its full proposed cost: the
    /// current request counts as zero rather than failing the run.
    async fn change_delta(&self, change: &SimulationChange) -> Result<f64, AnalyzerError> {
        let current = self
            .allocation_guard
            .call(|| self.allocations.current_allocation(&change.workload))
            .await?;

        let (current_cpu, current_memory) = match &current {
            Some(alloc) => (alloc.cpu_request_millicores, alloc.memory_request_bytes),
            None => {
                debug!(
                    workload = %change.workload,
                    "No current allocation, treating proposed change as net-new"
                );
                (0.0, 0.0)
            }
        };

        let replicas = change.replicas as f64;
        let cpu_delta = self.cost.cost(
            ResourceKind::Cpu,
            change.cpu_request_millicores - current_cpu,
            1.0,
        ) * replicas;
        let memory_delta = self.cost.cost(
            ResourceKind::Memory,
            change.memory_request_bytes - current_memory,
            1.0,
        ) * replicas;

        Ok(cpu_delta + memory_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceAllocation, WorkloadId};
    use crate::providers::AllocationStore;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;

    struct FixedAllocations {
        rows: HashMap<WorkloadId, ResourceAllocation>,
    }

    #[async_trait]
    impl AllocationStore for FixedAllocations {
        async fn current_allocation(
            &self,
            workload: &WorkloadId,
        ) -> anyhow::Result<Option<ResourceAllocation>> {
            Ok(self.rows.get(workload).cloned())
        }
    }

    struct FixedCosts {
        hourly: f64,
    }

    #[async_trait]
    impl CostSource for FixedCosts {
        async fn namespace_baseline_cost(
            &self,
            _namespace: &str,
            window: AnalysisWindow,
        ) -> anyhow::Result<f64> {
            Ok(self.hourly * window.hours())
        }
    }

    fn workload() -> WorkloadId {
        WorkloadId::new("default", "web-7f9c", "app")
    }

    fn engine(hourly: f64) -> SimulationEngine {
        let mut rows = HashMap::new();
        rows.insert(
            workload(),
            ResourceAllocation {
                workload: workload(),
                cpu_request_millicores: 1000.0,
                cpu_limit_millicores: 2000.0,
                memory_request_bytes: 1024.0 * 1024.0 * 1024.0,
                memory_limit_bytes: 2048.0 * 1024.0 * 1024.0,
                observed_at: Utc::now(),
            },
        );
        SimulationEngine::new(
            &AnalyzerConfig::default(),
            Arc::new(FixedAllocations { rows }),
            Arc::new(FixedCosts { hourly }),
        )
    }

    fn shrink_change() -> SimulationChange {
        SimulationChange {
            workload: workload(),
            cpu_request_millicores: 500.0,
            cpu_limit_millicores: 1000.0,
            memory_request_bytes: 512.0 * 1024.0 * 1024.0,
            memory_limit_bytes: 1024.0 * 1024.0 * 1024.0,
            replicas: 2,
        }
    }

    #[tokio::test]
    async fn test_no_changes_is_baseline() {
        let engine = engine(1.0);
        let result = engine
            .simulate("default", &[], SimulationPeriod::Monthly)
            .await
            .unwrap();

        assert!((result.current_cost - 720.0).abs() < 1e-9);
        assert!((result.projected_cost - 720.0).abs() < 1e-9);
        assert_eq!(result.savings, 0.0);
        assert_eq!(result.savings_percent, 0.0);
    }

    #[tokio::test]
    async fn test_shrinking_saves() {
        let engine = engine(1.0);
        let result = engine
            .simulate("default", &[shrink_change()], SimulationPeriod::Monthly)
            .await
            .unwrap();

        // Per hour: cpu -500m * 1e-5 * 2 = -0.01;
        // memory -512Mi * 1e-8 * 2 = -10.73741824
        let expected_delta = (-500.0 * 0.00001 * 2.0
            + -(512.0 * 1024.0 * 1024.0) * 0.00000001 * 2.0)
            * 720.0;
        assert!((result.cost_delta - expected_delta).abs() < 1e-6);
        assert!(result.savings > 0.0);
        assert!((result.savings - (result.current_cost - result.projected_cost)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_period_multipliers() {
        let engine = engine(2.0);
        let daily = engine
            .simulate("default", &[], SimulationPeriod::Daily)
            .await
            .unwrap();
        let yearly = engine
            .simulate("default", &[], SimulationPeriod::Yearly)
            .await
            .unwrap();

        assert!((daily.current_cost - 48.0).abs() < 1e-9);
        assert!((yearly.current_cost - 17520.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_breakdown_ratios_sum_to_projected() {
        let engine = engine(1.0);
        let result = engine
            .simulate("default", &[shrink_change()], SimulationPeriod::Monthly)
            .await
            .unwrap();

        let b = &result.breakdown;
        assert!((b.compute - result.projected_cost * 0.60).abs() < 1e-9);
        assert!((b.storage - result.projected_cost * 0.20).abs() < 1e-9);
        assert!((b.network - result.projected_cost * 0.15).abs() < 1e-9);
        assert!((b.other - result.projected_cost * 0.05).abs() < 1e-9);
        let total = b.compute + b.storage + b.network + b.other;
        assert!((total - result.projected_cost).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_unknown_workload_counts_as_net_new() {
        let engine = engine(1.0);
        let change = SimulationChange {
            workload: WorkloadId::new("default", "new-pod", "app"),
            cpu_request_millicores: 100.0,
            cpu_limit_millicores: 200.0,
            memory_request_bytes: 0.0,
            memory_limit_bytes: 0.0,
            replicas: 1,
        };
        let result = engine
            .simulate("default", &[change], SimulationPeriod::Daily)
            .await
            .unwrap();

        assert!(result.projected_cost > result.current_cost);
        assert!(result.savings < 0.0);
    }

    #[tokio::test]
    async fn test_simulation_is_pure() {
        let engine = engine(1.5);
        let changes = [shrink_change()];
        let first = engine
            .simulate("default", &changes, SimulationPeriod::Yearly)
            .await
            .unwrap();
        let second = engine
            .simulate("default", &changes, SimulationPeriod::Yearly)
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_zero_baseline_no_percent_blowup() {
        let engine = engine(0.0);
        let result = engine
            .simulate("default", &[shrink_change()], SimulationPeriod::Monthly)
            .await
            .unwrap();

        assert_eq!(result.savings_percent, 0.0);
        assert!(result.savings_percent.is_finite());
    }
}
