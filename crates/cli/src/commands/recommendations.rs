//! Recommendation listing

use anyhow::Result;
use colored::Colorize;
use optimizer_lib::{RecommendationView, RecommendationsView};
use tabled::Tabled;

use crate::output::{
    color_confidence, format_currency, print_info, print_json, print_success, truncate,
    OutputFormat,
};

/// Row for recommendations table
#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Recommended")]
    recommended: String,
    #[tabled(rename = "Reason")]
    reasoning: String,
    #[tabled(rename = "Savings/mo")]
    savings: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl RecommendationRow {
    fn new(index: usize, view: &RecommendationView) -> Self {
        let rec = &view.recommendation;
        Self {
            index,
            id: view.id.to_string(),
            resource: rec.resource_name.clone(),
            confidence: color_confidence(&rec.confidence),
            current: truncate(&rec.current_config, 40),
            recommended: truncate(&rec.recommended_config, 40),
            reasoning: truncate(&rec.reasoning, 50),
            savings: format_currency(rec.monthly_savings).green().to_string(),
            status: if view.implemented {
                "✓ Implemented".green().to_string()
            } else {
                "pending".yellow().to_string()
            },
        }
    }
}

/// Render recommendations, or the fully-optimized notice when there are none
pub fn render_recommendations(
    recommendations: &RecommendationsView,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(recommendations)?,
        OutputFormat::Table => {
            println!("{}", "Optimization Recommendations".bold());
            println!("{}", "-".repeat(50));

            match recommendations {
                RecommendationsView::FullyOptimized => {
                    print_success("Great! No optimization opportunities found.");
                    print_info("Your resources are well-optimized.");
                }
                RecommendationsView::Items(items) => {
                    let rows: Vec<RecommendationRow> = items
                        .iter()
                        .enumerate()
                        .map(|(i, view)| RecommendationRow::new(i + 1, view))
                        .collect();

                    let table = tabled::Table::new(rows)
                        .with(tabled::settings::Style::rounded())
                        .to_string();
                    println!("{}", table);

                    let implemented = items.iter().filter(|v| v.implemented).count();
                    println!(
                        "\nTotal: {} recommendations ({} implemented)\n",
                        items.len(),
                        implemented
                    );
                }
            }
        }
    }

    Ok(())
}
