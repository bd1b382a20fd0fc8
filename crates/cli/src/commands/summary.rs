//! Cost summary rendering

use anyhow::Result;
use colored::Colorize;
use optimizer_lib::Summary;

use crate::output::{format_currency, print_json, OutputFormat};

/// Render the summary cards. Figures are shown exactly as the API reported
/// them.
pub fn render_summary(summary: &Summary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(summary)?,
        OutputFormat::Table => {
            println!("{}", "Cloud Optimization Dashboard".bold());
            println!("{}", "=".repeat(50));
            println!("Total Resources:        {}", summary.total_resources);
            println!(
                "Monthly Cost:           {}",
                format_currency(summary.total_monthly_cost)
            );

            let savings_pct = if summary.total_monthly_cost > 0.0 {
                (summary.total_potential_savings / summary.total_monthly_cost) * 100.0
            } else {
                0.0
            };
            println!(
                "{}      {} ({:.1}%)",
                "Potential Savings:".bold(),
                format_currency(summary.total_potential_savings)
                    .green()
                    .bold(),
                savings_pct
            );
            println!(
                "Opportunities:          {}",
                summary.optimization_opportunities.to_string().yellow()
            );
            println!();
        }
    }

    Ok(())
}
