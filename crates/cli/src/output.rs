//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use optimizer_lib::{Confidence, Severity, UtilizationBadge};
use serde::{Deserialize, Serialize};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a dollar amount
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Format storage size, or a dash when not reported
pub fn format_storage(storage_gb: Option<f64>) -> String {
    match storage_gb {
        Some(gb) if gb > 0.0 => format!("{}GB", gb),
        _ => "-".to_string(),
    }
}

/// Color a utilization badge by severity, or a dash when not reported
pub fn color_badge(badge: Option<&UtilizationBadge>) -> String {
    let Some(badge) = badge else {
        return "-".dimmed().to_string();
    };
    let label = badge.label();
    match badge.severity {
        Severity::Alerting => label.red().to_string(),
        Severity::Neutral => label.yellow().to_string(),
        Severity::Nominal => label.green().to_string(),
    }
}

/// Color confidence level
pub fn color_confidence(confidence: &Confidence) -> String {
    match confidence {
        Confidence::High => confidence.as_str().green().to_string(),
        Confidence::Medium => confidence.as_str().yellow().to_string(),
        Confidence::Low => confidence.as_str().red().to_string(),
        Confidence::Other(raw) => raw.clone(),
    }
}

/// Truncate long free text for table cells
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
