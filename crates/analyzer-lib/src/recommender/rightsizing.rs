//! Per-resource rightsizing math
//!
//! Pure functions from a utilization summary and current allocation to
//! an optional recommendation. Memory is deliberately more
//! conservative than CPU: exceeding a memory limit kills the process,
//! exceeding a CPU limit only throttles it.

use chrono::Utc;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::cost::CostModel;
use crate::models::{
    Recommendation, ResourceAllocation, ResourceKind, RiskLevel, UtilizationSummary,
};

const MIB: f64 = 1024.0 * 1024.0;

/// Confidence score derived from sample volume and variability
///
/// More samples raise confidence up to a saturation point of 1000;
/// higher variability lowers it, floored at 0.3 because some signal is
/// still better than none. The result is clamped to [0.1, 0.95].
pub fn confidence_score(sample_count: u64, cv: f64) -> f64 {
    let volume_factor = (sample_count as f64 / 1000.0).min(1.0);
    let variability_factor = (1.0 - cv * 0.5).max(0.3);
    (volume_factor * variability_factor).clamp(0.1, 0.95)
}

/// Risk tier from the coefficient of variation
pub fn risk_tier(cv: f64) -> RiskLevel {
    if cv < 0.3 {
        RiskLevel::Low
    } else if cv < 0.6 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// Fractional gap between the current request and observed p95 usage
///
/// An unset (zero) request has no measurable waste.
fn waste_fraction(current_request: f64, p95: f64) -> f64 {
    if current_request <= 0.0 {
        0.0
    } else {
        (current_request - p95) / current_request
    }
}

/// Compute a recommendation for one workload/resource pair
///
/// Returns `None` when the waste gate suppresses: low apparent waste
/// AND high confidence. A low-confidence waste estimate never
/// suppresses, so uncertain workloads are always surfaced for review.
pub fn recommend(
    config: &AnalyzerConfig,
    cost: &CostModel,
    summary: &UtilizationSummary,
    allocation: &ResourceAllocation,
) -> Option<Recommendation> {
    let cv = summary.coefficient_of_variation();
    let confidence = confidence_score(summary.sample_count, cv);
    let risk_level = risk_tier(cv);

    let (recommended_request, recommended_limit, mut reasoning) = match summary.resource {
        ResourceKind::Cpu => cpu_sizing(config, summary, cv),
        ResourceKind::Memory => memory_sizing(config, summary),
    };

    let (recommended_request, recommended_limit, floor_notes) = apply_floors(
        config,
        summary.resource,
        recommended_request,
        recommended_limit,
    );
    reasoning.push_str(&floor_notes);

    let current_request = allocation.request(summary.resource);
    let waste = waste_fraction(current_request, summary.p95);
    if waste < config.waste_threshold && confidence > config.confidence_suppression_threshold {
        debug!(
            workload = %summary.workload,
            resource = %summary.resource,
            waste,
            confidence,
            "Suppressing recommendation: low waste with high confidence"
        );
        return None;
    }

    let potential_savings = cost.monthly_savings(
        summary.resource,
        current_request,
        recommended_request,
        config.hours_per_month,
    );

    Some(Recommendation {
        workload: summary.workload.clone(),
        resource: summary.resource,
        current_request,
        current_limit: allocation.limit(summary.resource),
        recommended_request,
        recommended_limit,
        p50_usage: summary.p50,
        p95_usage: summary.p95,
        p99_usage: summary.p99,
        max_usage: summary.max,
        potential_savings,
        confidence,
        risk_level,
        reasoning,
        created_at: Utc::now(),
    })
}

/// CPU sizing: p95 + safety margin for the request, limit by risk tier
fn cpu_sizing(config: &AnalyzerConfig, summary: &UtilizationSummary, cv: f64) -> (f64, f64, String) {
    let request = summary.p95 * config.cpu_safety_margin;

    let (limit, reasoning) = if cv < 0.3 {
        (
            summary.p99 * 1.2,
            "Low variability workload, using P99 + 20% for limit".to_string(),
        )
    } else if cv < 0.6 {
        (
            (summary.p99 * 1.5).max(summary.max),
            "Medium variability workload, using max(P99*1.5, max) for limit".to_string(),
        )
    } else {
        (
            summary.max * 1.3,
            "High variability workload, using max + 30% for limit".to_string(),
        )
    };

    (request, limit, reasoning)
}

/// Memory sizing: limit buffers the highest observed peak, not a
/// percentile, and both values round up to whole MiB
fn memory_sizing(config: &AnalyzerConfig, summary: &UtilizationSummary) -> (f64, f64, String) {
    let request = ceil_to_mib(summary.p95 * config.memory_safety_margin);
    let limit = ceil_to_mib(summary.max * config.oom_buffer);
    (
        request,
        limit,
        "Memory recommendation with OOM prevention buffer".to_string(),
    )
}

fn ceil_to_mib(bytes: f64) -> f64 {
    (bytes / MIB).ceil() * MIB
}

/// Enforce minimum request and limit >= 1.5x request, annotating the
/// reasoning when an adjustment was made
fn apply_floors(
    config: &AnalyzerConfig,
    resource: ResourceKind,
    mut request: f64,
    mut limit: f64,
) -> (f64, f64, String) {
    let mut notes = String::new();

    let (min_request, min_note) = match resource {
        ResourceKind::Cpu => (
            config.min_cpu_request_millicores,
            " (adjusted to minimum 10m CPU)",
        ),
        ResourceKind::Memory => (
            config.min_memory_request_bytes,
            " (adjusted to minimum 64Mi memory)",
        ),
    };

    if request < min_request {
        request = min_request;
        notes.push_str(min_note);
    }

    if limit < request * 1.5 {
        limit = request * 1.5;
        notes.push_str(" (adjusted limit to 1.5x request)");
    }

    (request, limit, notes)
}
