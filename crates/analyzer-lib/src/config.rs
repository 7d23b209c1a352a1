//! Analyzer configuration
//!
//! All thresholds are injected at construction so tests can vary them
//! without cross-test interference.

use chrono::Duration;
use serde::Deserialize;

use crate::models::ResourceKind;

/// Tunable parameters for analysis, cost modeling and simulation
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Fractional waste below which a recommendation may be suppressed
    #[serde(default = "default_waste_threshold")]
    pub waste_threshold: f64,

    /// Analysis window in days for utilization summaries
    #[serde(default = "default_analysis_window_days")]
    pub analysis_window_days: i64,

    /// Minimum sample count required to analyze a resource kind
    #[serde(default = "default_min_data_points")]
    pub min_data_points: u64,

    /// Confidence above which low-waste workloads are suppressed
    #[serde(default = "default_confidence_suppression_threshold")]
    pub confidence_suppression_threshold: f64,

    /// USD per millicore-hour
    #[serde(default = "default_cpu_cost")]
    pub cpu_cost_per_millicore_hour: f64,

    /// USD per byte-hour
    #[serde(default = "default_memory_cost")]
    pub memory_cost_per_byte_hour: f64,

    /// Safety margin applied over p95 for CPU requests
    #[serde(default = "default_cpu_safety_margin")]
    pub cpu_safety_margin: f64,

    /// Safety margin applied over p95 for memory requests
    #[serde(default = "default_memory_safety_margin")]
    pub memory_safety_margin: f64,

    /// Buffer over the highest observed memory usage for limits
    #[serde(default = "default_oom_buffer")]
    pub oom_buffer: f64,

    /// Smallest CPU request the analyzer will recommend, in millicores
    #[serde(default = "default_min_cpu_request")]
    pub min_cpu_request_millicores: f64,

    /// Smallest memory request the analyzer will recommend, in bytes
    #[serde(default = "default_min_memory_request")]
    pub min_memory_request_bytes: f64,

    /// Hours used to convert hourly savings to monthly figures
    #[serde(default = "default_hours_per_month")]
    pub hours_per_month: f64,
}

fn default_waste_threshold() -> f64 {
    0.30
}

fn default_analysis_window_days() -> i64 {
    7
}

fn default_min_data_points() -> u64 {
    100
}

fn default_confidence_suppression_threshold() -> f64 {
    0.70
}

fn default_cpu_cost() -> f64 {
    0.00001
}

fn default_memory_cost() -> f64 {
    0.00000001
}

fn default_cpu_safety_margin() -> f64 {
    1.15
}

fn default_memory_safety_margin() -> f64 {
    1.10
}

fn default_oom_buffer() -> f64 {
    1.20
}

fn default_min_cpu_request() -> f64 {
    10.0
}

fn default_min_memory_request() -> f64 {
    64.0 * 1024.0 * 1024.0
}

fn default_hours_per_month() -> f64 {
    720.0
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            waste_threshold: default_waste_threshold(),
            analysis_window_days: default_analysis_window_days(),
            min_data_points: default_min_data_points(),
            confidence_suppression_threshold: default_confidence_suppression_threshold(),
            cpu_cost_per_millicore_hour: default_cpu_cost(),
            memory_cost_per_byte_hour: default_memory_cost(),
            cpu_safety_margin: default_cpu_safety_margin(),
            memory_safety_margin: default_memory_safety_margin(),
            oom_buffer: default_oom_buffer(),
            min_cpu_request_millicores: default_min_cpu_request(),
            min_memory_request_bytes: default_min_memory_request(),
            hours_per_month: default_hours_per_month(),
        }
    }
}

impl AnalyzerConfig {
    /// Unit cost for the given resource kind, per native unit per hour
    pub fn unit_cost(&self, resource: ResourceKind) -> f64 {
        match resource {
            ResourceKind::Cpu => self.cpu_cost_per_millicore_hour,
            ResourceKind::Memory => self.memory_cost_per_byte_hour,
        }
    }

    /// Analysis window as a chrono duration
    pub fn analysis_window(&self) -> Duration {
        Duration::days(self.analysis_window_days)
    }
}
