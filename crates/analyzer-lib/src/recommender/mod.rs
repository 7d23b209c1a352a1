//! Rightsizing recommender
//!
//! Consumes utilization summaries and current allocations through the
//! resilience layer and emits zero, one or two recommendations per
//! workload (CPU and/or memory). Namespace runs collect per-workload
//! failures instead of aborting, so callers choose between fail-fast
//! and best-effort aggregation.

mod rightsizing;

pub use rightsizing::{confidence_score, recommend, risk_tier};

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AnalyzerConfig;
use crate::cost::CostModel;
use crate::error::AnalyzerError;
use crate::models::{OptimizationSummary, Recommendation, ResourceKind, WorkloadId};
use crate::providers::{AllocationStore, AnalysisWindow, MetricsProvider};
use crate::resilience::ResilienceLayer;
use crate::summary::summarize_recommendations;

/// Outcome of analyzing a single workload within a namespace run
#[derive(Debug)]
pub struct WorkloadOutcome {
    pub workload: WorkloadId,
    pub result: Result<Vec<Recommendation>, AnalyzerError>,
}

/// Result of a namespace analysis run
///
/// Keeps per-workload successes and failures side by side rather than
/// swallowing errors into logs.
#[derive(Debug)]
pub struct NamespaceAnalysis {
    pub namespace: String,
    pub outcomes: Vec<WorkloadOutcome>,
}

impl NamespaceAnalysis {
    /// All emitted recommendations across successful workloads
    pub fn recommendations(&self) -> Vec<&Recommendation> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flatten()
            .collect()
    }

    /// Consume the analysis, keeping only the recommendations
    pub fn into_recommendations(self) -> Vec<Recommendation> {
        self.outcomes
            .into_iter()
            .filter_map(|o| o.result.ok())
            .flatten()
            .collect()
    }

    /// Workloads whose analysis failed, with the error
    pub fn failures(&self) -> Vec<(&WorkloadId, &AnalyzerError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.workload, e)))
            .collect()
    }
}

/// Produces rightsizing recommendations from collaborator snapshots
pub struct Recommender {
    config: AnalyzerConfig,
    cost: CostModel,
    metrics: Arc<dyn MetricsProvider>,
    allocations: Arc<dyn AllocationStore>,
    metrics_guard: ResilienceLayer,
    allocation_guard: ResilienceLayer,
}

impl Recommender {
    pub fn new(
        config: AnalyzerConfig,
        metrics: Arc<dyn MetricsProvider>,
        allocations: Arc<dyn AllocationStore>,
    ) -> Self {
        let cost = CostModel::from_config(&config);
        Self {
            config,
            cost,
            metrics,
            allocations,
            metrics_guard: ResilienceLayer::default(),
            allocation_guard: ResilienceLayer::default(),
        }
    }

    /// Replace the resilience layers guarding collaborator calls
    pub fn with_resilience(
        mut self,
        metrics_guard: ResilienceLayer,
        allocation_guard: ResilienceLayer,
    ) -> Self {
        self.metrics_guard = metrics_guard;
        self.allocation_guard = allocation_guard;
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one workload, returning 0-2 recommendations
    ///
    /// A missing allocation row surfaces as a recoverable
    /// `MissingAllocation` error; an absent summary for a resource kind
    /// skips that kind silently.
    pub async fn analyze_workload(
        &self,
        workload: &WorkloadId,
    ) -> Result<Vec<Recommendation>, AnalyzerError> {
        let window = AnalysisWindow::trailing(self.config.analysis_window());

        let allocation = self
            .allocation_guard
            .call(|| self.allocations.current_allocation(workload))
            .await?
            .ok_or_else(|| AnalyzerError::MissingAllocation(workload.clone()))?;

        let mut recommendations = Vec::new();

        for resource in ResourceKind::ALL {
            let summary = self
                .metrics_guard
                .call(|| self.metrics.summarize(workload, resource, window))
                .await?;

            let Some(summary) = summary else {
                debug!(
                    workload = %workload,
                    resource = %resource,
                    "Insufficient samples, skipping resource kind"
                );
                continue;
            };

            if let Some(rec) = recommend(&self.config, &self.cost, &summary, &allocation) {
                info!(
                    workload = %workload,
                    resource = %resource,
                    recommended_request = rec.recommended_request,
                    recommended_limit = rec.recommended_limit,
                    confidence = rec.confidence,
                    risk = %rec.risk_level,
                    "Emitting rightsizing recommendation"
                );
                recommendations.push(rec);
            }
        }

        Ok(recommendations)
    }

    /// Analyze every workload with samples in the namespace
    ///
    /// Per-workload failures are collected, never fatal for the run;
    /// only a failure to enumerate workloads aborts.
    pub async fn analyze_namespace(
        &self,
        namespace: &str,
    ) -> Result<NamespaceAnalysis, AnalyzerError> {
        let workloads = self
            .metrics_guard
            .call(|| self.metrics.list_workloads(namespace))
            .await?;

        let mut outcomes = Vec::with_capacity(workloads.len());

        for workload in workloads {
            let result = self.analyze_workload(&workload).await;
            if let Err(err) = &result {
                warn!(
                    workload = %workload,
                    error = %err,
                    "Workload analysis failed, continuing namespace run"
                );
            }
            outcomes.push(WorkloadOutcome { workload, result });
        }

        Ok(NamespaceAnalysis {
            namespace: namespace.to_string(),
            outcomes,
        })
    }

    /// Aggregate a namespace run into totals and buckets
    pub async fn optimization_summary(
        &self,
        namespace: &str,
    ) -> Result<OptimizationSummary, AnalyzerError> {
        let analysis = self.analyze_namespace(namespace).await?;
        Ok(summarize_recommendations(
            namespace,
            &analysis.into_recommendations(),
        ))
    }
}
