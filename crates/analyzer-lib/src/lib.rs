//! Analyzer library for workload rightsizing and cost simulation
//!
//! This crate provides the core functionality for:
//! - Statistical rightsizing recommendations from utilization summaries
//! - Variability-based risk tiering and confidence scoring
//! - Linear cost modeling and monthly savings estimates
//! - What-if cost simulation for proposed allocation changes
//! - Retry and circuit-breaker guards around collaborator calls
//!
//! Metrics collection, persistence and transport live behind the
//! traits in [`providers`]; the core only transforms their snapshots.

pub mod config;
pub mod cost;
pub mod error;
pub mod models;
pub mod providers;
pub mod recommender;
pub mod resilience;
pub mod simulation;
pub mod summary;

pub use config::AnalyzerConfig;
pub use cost::CostModel;
pub use error::AnalyzerError;
pub use models::*;
pub use providers::{AllocationStore, AnalysisWindow, CostSource, MetricsProvider};
pub use recommender::{NamespaceAnalysis, Recommender, WorkloadOutcome};
pub use simulation::SimulationEngine;
pub use summary::summarize_recommendations;
