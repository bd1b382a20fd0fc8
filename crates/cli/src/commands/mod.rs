//! CLI commands

pub mod interactive;
pub mod recommendations;
pub mod resources;
pub mod summary;

#[cfg(test)]
mod testing;

use anyhow::Result;
use colored::Colorize;
use optimizer_lib::{Dashboard, DashboardView, DataSource};

use crate::output::{print_error, print_info, print_json, print_success, OutputFormat};

/// Part of the dashboard to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Resources,
    Recommendations,
    All,
}

/// Render the projected view. Returns `false` when the view is a failure.
pub fn render_view(view: &DashboardView, section: Section, format: OutputFormat) -> Result<bool> {
    match view {
        DashboardView::Loading => {
            print_info("Loading dashboard data...");
            Ok(true)
        }
        DashboardView::Failed { reason } => {
            if format == OutputFormat::Json {
                print_json(view)?;
            }
            print_error(reason);
            Ok(false)
        }
        DashboardView::Ready {
            summary: figures,
            resources: items,
            recommendations: recs,
        } => {
            if format == OutputFormat::Json && section == Section::All {
                print_json(view)?;
                return Ok(true);
            }
            if matches!(section, Section::Summary | Section::All) {
                summary::render_summary(figures, format)?;
            }
            if matches!(section, Section::Resources | Section::All) {
                resources::render_resources(items, format)?;
            }
            if matches!(section, Section::Recommendations | Section::All) {
                recommendations::render_recommendations(recs, format)?;
            }
            Ok(true)
        }
    }
}

/// Load once and render `section`
pub async fn show(dashboard: &Dashboard, section: Section, format: OutputFormat) -> Result<()> {
    dashboard.refresh().await;
    let view = dashboard.view().await;

    if !render_view(&view, section, format)? {
        anyhow::bail!("dashboard data unavailable");
    }
    Ok(())
}

/// Probe the API's health endpoint
pub async fn health(dashboard: &Dashboard, format: OutputFormat) -> Result<()> {
    let source = dashboard.source();
    let status = source.health().await?;

    match format {
        OutputFormat::Json => print_json(&status)?,
        OutputFormat::Table => {
            let line = format!("{} is {}", source.describe(), status.status.bold());
            if status.status.eq_ignore_ascii_case("healthy") {
                print_success(&line);
            } else {
                print_error(&line);
            }
            if let Some(message) = &status.message {
                println!("  {}", message.dimmed());
            }
        }
    }

    Ok(())
}
