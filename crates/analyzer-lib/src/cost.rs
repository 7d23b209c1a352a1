//! Linear cost model shared by the recommender and simulation engine
//!
//! Pricing is a configured constant per resource kind, deliberately
//! linear with no tiering or discounts. Both savings estimates and
//! simulation deltas go through this model so the two figures stay
//! internally consistent.

use crate::config::AnalyzerConfig;
use crate::models::ResourceKind;

/// Maps (resource kind, quantity, duration) to USD
#[derive(Debug, Clone)]
pub struct CostModel {
    cpu_cost_per_millicore_hour: f64,
    memory_cost_per_byte_hour: f64,
}

impl CostModel {
    pub fn new(cpu_cost_per_millicore_hour: f64, memory_cost_per_byte_hour: f64) -> Self {
        Self {
            cpu_cost_per_millicore_hour,
            memory_cost_per_byte_hour,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(
            config.cpu_cost_per_millicore_hour,
            config.memory_cost_per_byte_hour,
        )
    }

    /// Unit cost per native unit (millicore or byte) per hour
    pub fn unit_cost(&self, resource: ResourceKind) -> f64 {
        match resource {
            ResourceKind::Cpu => self.cpu_cost_per_millicore_hour,
            ResourceKind::Memory => self.memory_cost_per_byte_hour,
        }
    }

    /// Cost of holding `quantity` of a resource for `hours`
    pub fn cost(&self, resource: ResourceKind, quantity: f64, hours: f64) -> f64 {
        quantity * self.unit_cost(resource) * hours
    }

    /// Monthly savings from shrinking an allocation
    pub fn monthly_savings(
        &self,
        resource: ResourceKind,
        current: f64,
        recommended: f64,
        hours_per_month: f64,
    ) -> f64 {
        self.cost(resource, current - recommended, hours_per_month)
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }
}
