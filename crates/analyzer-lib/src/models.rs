//! Core data models for the rightsizing analyzer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource kind under analysis
///
/// Serialized as "CPU" / "Memory", matching the Display output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "CPU")]
    Cpu,
    Memory,
}

impl ResourceKind {
    /// Kinds in the order they are analyzed per workload
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Cpu, ResourceKind::Memory];
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Cpu => write!(f, "CPU"),
            ResourceKind::Memory => write!(f, "Memory"),
        }
    }
}

/// Pod + container identity being analyzed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkloadId {
    pub namespace: String,
    pub pod_name: String,
    pub container_name: String,
}

impl WorkloadId {
    pub fn new(
        namespace: impl Into<String>,
        pod_name: impl Into<String>,
        container_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            pod_name: pod_name.into(),
            container_name: container_name.into(),
        }
    }
}

impl fmt::Display for WorkloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.namespace, self.pod_name, self.container_name
        )
    }
}

/// Statistical summary of utilization samples over an analysis window
///
/// Produced by the metrics provider, recomputed per analysis run and
/// never persisted here. Quantities are millicores for CPU and bytes
/// for memory. Percentiles are continuous (interpolated) estimates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationSummary {
    pub workload: WorkloadId,
    pub resource: ResourceKind,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
    pub mean: f64,
    pub stddev: f64,
    pub sample_count: u64,
}

impl UtilizationSummary {
    /// Coefficient of variation, a unit-free measure of volatility
    ///
    /// Defined as 0 for a zero mean to avoid division by zero.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.stddev / self.mean
        }
    }
}

/// Latest-wins snapshot of a workload's resource requests and limits
///
/// CPU values are millicores, memory values are bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceAllocation {
    pub workload: WorkloadId,
    pub cpu_request_millicores: f64,
    pub cpu_limit_millicores: f64,
    pub memory_request_bytes: f64,
    pub memory_limit_bytes: f64,
    pub observed_at: DateTime<Utc>,
}

impl ResourceAllocation {
    /// Current request for the given resource kind, in its native unit
    pub fn request(&self, resource: ResourceKind) -> f64 {
        match resource {
            ResourceKind::Cpu => self.cpu_request_millicores,
            ResourceKind::Memory => self.memory_request_bytes,
        }
    }

    /// Current limit for the given resource kind, in its native unit
    pub fn limit(&self, resource: ResourceKind) -> f64 {
        match resource {
            ResourceKind::Cpu => self.cpu_limit_millicores,
            ResourceKind::Memory => self.memory_limit_bytes,
        }
    }
}

/// Risk tier assigned to a recommendation based on workload volatility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// A rightsizing recommendation for one workload/resource pair
///
/// Immutable once produced by an analysis run; a later run may emit a
/// new recommendation for the same workload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub workload: WorkloadId,
    pub resource: ResourceKind,
    pub current_request: f64,
    pub current_limit: f64,
    pub recommended_request: f64,
    pub recommended_limit: f64,
    pub p50_usage: f64,
    pub p95_usage: f64,
    pub p99_usage: f64,
    pub max_usage: f64,
    /// Estimated monthly savings in USD
    pub potential_savings: f64,
    /// Confidence score in [0.1, 0.95]
    pub confidence: f64,
    pub risk_level: RiskLevel,
    pub reasoning: String,
    pub created_at: DateTime<Utc>,
}

/// One hypothetical allocation change fed into the simulation engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationChange {
    pub workload: WorkloadId,
    pub cpu_request_millicores: f64,
    pub cpu_limit_millicores: f64,
    pub memory_request_bytes: f64,
    pub memory_limit_bytes: f64,
    pub replicas: u32,
}

/// Projection period for cost simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationPeriod {
    Daily,
    Monthly,
    Yearly,
}

impl SimulationPeriod {
    /// Hours covered by the period
    pub fn hours(&self) -> f64 {
        match self {
            SimulationPeriod::Daily => 24.0,
            SimulationPeriod::Monthly => 720.0,
            SimulationPeriod::Yearly => 8760.0,
        }
    }
}

impl std::str::FromStr for SimulationPeriod {
    type Err = crate::error::AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(SimulationPeriod::Daily),
            "monthly" => Ok(SimulationPeriod::Monthly),
            "yearly" => Ok(SimulationPeriod::Yearly),
            other => Err(crate::error::AnalyzerError::InvalidPeriod(
                other.to_string(),
            )),
        }
    }
}

/// Projected cost split across infrastructure categories
///
/// The split uses fixed ratios (60/20/15/5). It is a heuristic
/// approximation, not a derived allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub compute: f64,
    pub storage: f64,
    pub network: f64,
    pub other: f64,
}

/// Result of one cost simulation call; never persisted by the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub current_cost: f64,
    pub projected_cost: f64,
    pub cost_delta: f64,
    pub savings: f64,
    pub savings_percent: f64,
    pub breakdown: CostBreakdown,
}

/// Counts of recommendations bucketed by confidence or risk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Namespace-level aggregate of an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationSummary {
    pub namespace: String,
    pub total_recommendations: usize,
    /// Monthly savings in USD across all recommendations
    pub total_savings: f64,
    pub annual_savings: f64,
    pub cpu_savings: f64,
    pub memory_savings: f64,
    pub confidence_buckets: BucketCounts,
    pub risk_buckets: BucketCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cv_zero_mean() {
        let summary = UtilizationSummary {
            workload: WorkloadId::new("default", "pod", "app"),
            resource: ResourceKind::Cpu,
            window_start: Utc::now(),
            window_end: Utc::now(),
            p50: 0.0,
            p95: 0.0,
            p99: 0.0,
            max: 0.0,
            mean: 0.0,
            stddev: 5.0,
            sample_count: 200,
        };
        assert_eq!(summary.coefficient_of_variation(), 0.0);
    }

    #[test]
    fn test_cv_normal() {
        let summary = UtilizationSummary {
            workload: WorkloadId::new("default", "pod", "app"),
            resource: ResourceKind::Cpu,
            window_start: Utc::now(),
            window_end: Utc::now(),
            p50: 100.0,
            p95: 180.0,
            p99: 220.0,
            max: 250.0,
            mean: 120.0,
            stddev: 30.0,
            sample_count: 500,
        };
        assert!((summary.coefficient_of_variation() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_resource_kind_json_matches_display() {
        for kind in ResourceKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.to_string()));
            let back: ResourceKind = serde_json::from_value(json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_period_hours() {
        assert_eq!(SimulationPeriod::Daily.hours(), 24.0);
        assert_eq!(SimulationPeriod::Monthly.hours(), 720.0);
        assert_eq!(SimulationPeriod::Yearly.hours(), 8760.0);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(
            "monthly".parse::<SimulationPeriod>().unwrap(),
            SimulationPeriod::Monthly
        );
        assert!("weekly".parse::<SimulationPeriod>().is_err());
    }

    #[test]
    fn test_allocation_accessors() {
        let alloc = ResourceAllocation {
            workload: WorkloadId::new("default", "pod", "app"),
            cpu_request_millicores: 400.0,
            cpu_limit_millicores: 800.0,
            memory_request_bytes: 512.0 * 1024.0 * 1024.0,
            memory_limit_bytes: 1024.0 * 1024.0 * 1024.0,
            observed_at: Utc::now(),
        };
        assert_eq!(alloc.request(ResourceKind::Cpu), 400.0);
        assert_eq!(alloc.limit(ResourceKind::Cpu), 800.0);
        assert_eq!(alloc.request(ResourceKind::Memory), 512.0 * 1024.0 * 1024.0);
    }
}
