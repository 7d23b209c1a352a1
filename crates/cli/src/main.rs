//! Workload Rightsizing CLI
//!
//! A command-line tool for analyzing workload utilization snapshots,
//! producing rightsizing recommendations, and simulating cost changes.

mod commands;
mod config;
mod output;
mod snapshot;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use analyzer_lib::{
    AllocationStore, CostSource, MetricsProvider, Recommender, SimulationEngine, SimulationPeriod,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use snapshot::{Snapshot, SnapshotProvider};

/// Workload Rightsizing CLI
#[derive(Parser)]
#[command(name = "rsz")]
#[command(author, version, about = "Workload rightsizing and cost simulation", long_about = None)]
pub struct Cli {
    /// Path to a utilization snapshot file (JSON)
    #[arg(long, short, env = "RSZ_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, env = "RSZ_LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Produce rightsizing recommendations for a namespace
    Analyze {
        /// Namespace to analyze
        namespace: String,
    },

    /// Show the namespace optimization summary
    Summary {
        /// Namespace to summarize
        namespace: String,
    },

    /// Simulate the cost impact of proposed allocation changes
    Simulate {
        /// Namespace to simulate against
        namespace: String,

        /// Path to a JSON file with proposed changes
        #[arg(long, short)]
        changes: PathBuf,

        /// Projection period (daily, monthly, yearly)
        #[arg(long, short, default_value = "monthly")]
        period: String,
    },
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);

    let analyzer_config = config::load_analyzer_config()?;
    let snapshot = Snapshot::load(&cli.snapshot)?;
    let provider = Arc::new(SnapshotProvider::new(
        snapshot,
        analyzer_config.min_data_points,
    ));

    let metrics: Arc<dyn MetricsProvider> = provider.clone();
    let allocations: Arc<dyn AllocationStore> = provider.clone();
    let costs: Arc<dyn CostSource> = provider;

    match cli.command {
        Commands::Analyze { namespace } => {
            let recommender = Recommender::new(analyzer_config, metrics, allocations);
            commands::analyze::run(&recommender, &namespace, cli.format).await?;
        }
        Commands::Summary { namespace } => {
            let recommender = Recommender::new(analyzer_config, metrics, allocations);
            commands::summary::run(&recommender, &namespace, cli.format).await?;
        }
        Commands::Simulate {
            namespace,
            changes,
            period,
        } => {
            let period = SimulationPeriod::from_str(&period)?;
            let changes = commands::simulate::load_changes(&changes)?;
            let engine = SimulationEngine::new(&analyzer_config, allocations, costs);
            commands::simulate::run(&engine, &namespace, &changes, period, cli.format).await?;
        }
    }

    Ok(())
}
