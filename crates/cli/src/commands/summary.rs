//! Optimization summary command

use analyzer_lib::Recommender;
use anyhow::Result;
use colored::Colorize;

use crate::output::{format_currency, OutputFormat};

/// Print the namespace optimization summary
pub async fn run(recommender: &Recommender, namespace: &str, format: OutputFormat) -> Result<()> {
    let summary = recommender.optimization_summary(namespace).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Table => {
            println!("{}", "Optimization Summary".bold());
            println!("{}", "=".repeat(50));
            println!("Namespace:              {}", summary.namespace.cyan());
            println!("Recommendations:        {}", summary.total_recommendations);
            println!();

            println!("{}", "Potential Savings".bold());
            println!("{}", "-".repeat(50));
            println!(
                "Monthly:                {}",
                format_currency(summary.total_savings).green().bold()
            );
            println!(
                "Annual:                 {}",
                format_currency(summary.annual_savings).green()
            );
            println!(
                "CPU:                    {}",
                format_currency(summary.cpu_savings)
            );
            println!(
                "Memory:                 {}",
                format_currency(summary.memory_savings)
            );
            println!();

            let c = &summary.confidence_buckets;
            println!("{}", "Confidence".bold());
            println!("{}", "-".repeat(50));
            println!(
                "High: {}  Medium: {}  Low: {}",
                c.high.to_string().green(),
                c.medium.to_string().yellow(),
                c.low.to_string().red()
            );
            println!();

            let r = &summary.risk_buckets;
            println!("{}", "Risk".bold());
            println!("{}", "-".repeat(50));
            println!(
                "Low: {}  Medium: {}  High: {}",
                r.low.to_string().green(),
                r.medium.to_string().yellow(),
                r.high.to_string().red()
            );
        }
    }

    Ok(())
}
