//! Namespace analysis command

use analyzer_lib::Recommender;
use anyhow::Result;
use tabled::Tabled;

use crate::output::{
    color_confidence, color_risk, format_currency, format_quantity, print_warning, OutputFormat,
};

/// Row for the recommendations table
#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "Workload")]
    workload: String,
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Current Req")]
    current_request: String,
    #[tabled(rename = "New Req")]
    recommended_request: String,
    #[tabled(rename = "New Lim")]
    recommended_limit: String,
    #[tabled(rename = "Savings/mo")]
    savings: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Risk")]
    risk: String,
}

/// Analyze a namespace and print its recommendations
pub async fn run(recommender: &Recommender, namespace: &str, format: OutputFormat) -> Result<()> {
    let analysis = recommender.analyze_namespace(namespace).await?;

    for (workload, error) in analysis.failures() {
        print_warning(&format!("skipped {}: {}", workload, error));
    }

    let recommendations = analysis.recommendations();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&recommendations)?);
        }
        OutputFormat::Table => {
            if recommendations.is_empty() {
                print_warning("No recommendations: allocations look right-sized");
                return Ok(());
            }

            let rows: Vec<RecommendationRow> = recommendations
                .iter()
                .map(|r| RecommendationRow {
                    workload: format!("{}/{}", r.workload.pod_name, r.workload.container_name),
                    resource: r.resource.to_string(),
                    current_request: format_quantity(r.resource, r.current_request),
                    recommended_request: format_quantity(r.resource, r.recommended_request),
                    recommended_limit: format_quantity(r.resource, r.recommended_limit),
                    savings: format_currency(r.potential_savings),
                    confidence: color_confidence(r.confidence),
                    risk: color_risk(r.risk_level),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nTotal: {} recommendations", recommendations.len());
        }
    }

    Ok(())
}
