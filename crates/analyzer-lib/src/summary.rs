//! Namespace-level aggregation of recommendation output

use crate::models::{
    BucketCounts, OptimizationSummary, Recommendation, ResourceKind, RiskLevel,
};

/// Confidence at or above this counts as a high-confidence bucket
const HIGH_CONFIDENCE: f64 = 0.8;
/// Confidence at or above this counts as a medium-confidence bucket
const MEDIUM_CONFIDENCE: f64 = 0.6;

/// Roll a set of recommendations up into namespace totals and buckets
pub fn summarize_recommendations(
    namespace: &str,
    recommendations: &[Recommendation],
) -> OptimizationSummary {
    let mut total_savings = 0.0;
    let mut cpu_savings = 0.0;
    let mut memory_savings = 0.0;
    let mut confidence_buckets = BucketCounts::default();
    let mut risk_buckets = BucketCounts::default();

    for rec in recommendations {
        total_savings += rec.potential_savings;
        match rec.resource {
            ResourceKind::Cpu => cpu_savings += rec.potential_savings,
            ResourceKind::Memory => memory_savings += rec.potential_savings,
        }

        if rec.confidence >= HIGH_CONFIDENCE {
            confidence_buckets.high += 1;
        } else if rec.confidence >= MEDIUM_CONFIDENCE {
            confidence_buckets.medium += 1;
        } else {
            confidence_buckets.low += 1;
        }

        match rec.risk_level {
            RiskLevel::Low => risk_buckets.low += 1,
            RiskLevel::Medium => risk_buckets.medium += 1,
            RiskLevel::High => risk_buckets.high += 1,
        }
    }

    OptimizationSummary {
        namespace: namespace.to_string(),
        total_recommendations: recommendations.len(),
        total_savings,
        annual_savings: total_savings * 12.0,
        cpu_savings,
        memory_savings,
        confidence_buckets,
        risk_buckets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkloadId;
    use chrono::Utc;

    fn rec(resource: ResourceKind, savings: f64, confidence: f64, risk: RiskLevel) -> Recommendation {
        Recommendation {
            workload: WorkloadId::new("default", "pod", "app"),
            resource,
            current_request: 400.0,
            current_limit: 800.0,
            recommended_request: 207.0,
            recommended_limit: 310.5,
            p50_usage: 100.0,
            p95_usage: 180.0,
            p99_usage: 220.0,
            max_usage: 250.0,
            potential_savings: savings,
            confidence,
            risk_level: risk,
            reasoning: "test".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize_recommendations("default", &[]);
        assert_eq!(summary.total_recommendations, 0);
        assert_eq!(summary.total_savings, 0.0);
        assert_eq!(summary.annual_savings, 0.0);
        assert_eq!(summary.confidence_buckets, BucketCounts::default());
    }

    #[test]
    fn test_savings_split_by_resource() {
        let recs = vec![
            rec(ResourceKind::Cpu, 10.0, 0.9, RiskLevel::Low),
            rec(ResourceKind::Memory, 5.0, 0.5, RiskLevel::High),
            rec(ResourceKind::Cpu, 2.5, 0.7, RiskLevel::Medium),
        ];
        let summary = summarize_recommendations("default", &recs);

        assert_eq!(summary.total_recommendations, 3);
        assert!((summary.total_savings - 17.5).abs() < 1e-9);
        assert!((summary.annual_savings - 210.0).abs() < 1e-9);
        assert!((summary.cpu_savings - 12.5).abs() < 1e-9);
        assert!((summary.memory_savings - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_bucket_boundaries() {
        let recs = vec![
            rec(ResourceKind::Cpu, 0.0, 0.8, RiskLevel::Low),
            rec(ResourceKind::Cpu, 0.0, 0.6, RiskLevel::Medium),
            rec(ResourceKind::Cpu, 0.0, 0.59, RiskLevel::High),
        ];
        let summary = summarize_recommendations("default", &recs);

        assert_eq!(summary.confidence_buckets.high, 1);
        assert_eq!(summary.confidence_buckets.medium, 1);
        assert_eq!(summary.confidence_buckets.low, 1);
        assert_eq!(summary.risk_buckets.low, 1);
        assert_eq!(summary.risk_buckets.medium, 1);
        assert_eq!(summary.risk_buckets.high, 1);
    }
}
