//! Output formatting utilities

use analyzer_lib::{ResourceKind, RiskLevel};
use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a warning message to stderr, keeping stdout machine-readable
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Format a quantity in the resource's native unit
pub fn format_quantity(resource: ResourceKind, value: f64) -> String {
    match resource {
        ResourceKind::Cpu => format_cpu(value),
        ResourceKind::Memory => format_bytes(value),
    }
}

/// Format millicores as human-readable string
pub fn format_cpu(millicores: f64) -> String {
    if millicores >= 1000.0 {
        format!("{:.1}", millicores / 1000.0)
    } else {
        format!("{:.0}m", millicores)
    }
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: f64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    if bytes >= GB {
        format!("{:.2}Gi", bytes / GB)
    } else if bytes >= MB {
        format!("{:.2}Mi", bytes / MB)
    } else if bytes >= KB {
        format!("{:.2}Ki", bytes / KB)
    } else {
        format!("{:.0}B", bytes)
    }
}

/// Format a USD amount
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format confidence as percentage
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// Color confidence based on value
pub fn color_confidence(confidence: f64) -> String {
    let formatted = format_confidence(confidence);
    if confidence >= 0.8 {
        formatted.green().to_string()
    } else if confidence >= 0.6 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}

/// Color a risk level
pub fn color_risk(risk: RiskLevel) -> String {
    match risk {
        RiskLevel::Low => risk.to_string().green().to_string(),
        RiskLevel::Medium => risk.to_string().yellow().to_string(),
        RiskLevel::High => risk.to_string().red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cpu() {
        assert_eq!(format_cpu(207.0), "207m");
        assert_eq!(format_cpu(1500.0), "1.5");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512.0), "512B");
        assert_eq!(format_bytes(64.0 * 1024.0 * 1024.0), "64.00Mi");
        assert_eq!(format_bytes(2.5 * 1024.0 * 1024.0 * 1024.0), "2.50Gi");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1.389), "$1.39");
    }
}
