//! Cost simulation command

use std::path::Path;

use analyzer_lib::{SimulationChange, SimulationEngine, SimulationPeriod};
use anyhow::{Context, Result};
use colored::Colorize;
use tabled::Tabled;

use crate::output::{format_currency, OutputFormat};

/// Row for the cost breakdown table
#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Projected")]
    projected: String,
}

/// Load proposed changes from a JSON file
pub fn load_changes(path: &Path) -> Result<Vec<SimulationChange>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read changes file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse changes file {}", path.display()))
}

/// Simulate proposed changes against the namespace baseline
pub async fn run(
    engine: &SimulationEngine,
    namespace: &str,
    changes: &[SimulationChange],
    period: SimulationPeriod,
    format: OutputFormat,
) -> Result<()> {
    let result = engine.simulate(namespace, changes, period).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            println!("{}", "Cost Simulation".bold());
            println!("{}", "=".repeat(50));
            println!("Namespace:              {}", namespace.cyan());
            println!("Changes:                {}", changes.len());
            println!();

            println!(
                "Current cost:           {}",
                format_currency(result.current_cost)
            );
            println!(
                "Projected cost:         {}",
                format_currency(result.projected_cost)
            );
            println!(
                "Delta:                  {}",
                format_currency(result.cost_delta)
            );

            let savings = format!(
                "{} ({:.1}%)",
                format_currency(result.savings),
                result.savings_percent
            );
            if result.savings >= 0.0 {
                println!("{}  {}", "Savings:".bold(), savings.green().bold());
            } else {
                println!("{}  {}", "Savings:".bold(), savings.red().bold());
            }
            println!();

            println!("{}", "Breakdown (heuristic split)".bold());
            let rows = vec![
                BreakdownRow {
                    category: "Compute".to_string(),
                    projected: format_currency(result.breakdown.compute),
                },
                BreakdownRow {
                    category: "Storage".to_string(),
                    projected: format_currency(result.breakdown.storage),
                },
                BreakdownRow {
                    category: "Network".to_string(),
                    projected: format_currency(result.breakdown.network),
                },
                BreakdownRow {
                    category: "Other".to_string(),
                    projected: format_currency(result.breakdown.other),
                },
            ];
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }

    Ok(())
}
