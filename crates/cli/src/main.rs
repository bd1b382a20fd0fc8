//! Cloud Optimization Dashboard CLI
//!
//! A command-line front end for the cloud optimization API: cost summary,
//! resource utilization and rightsizing recommendations.

mod commands;
mod config;
mod output;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::Section;
use optimizer_lib::{Dashboard, HttpDataSource};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Cloud Optimization Dashboard CLI
#[derive(Parser)]
#[command(name = "cod")]
#[command(author, version, about = "CLI for the Cloud Optimization Dashboard", long_about = None)]
pub struct Cli {
    /// API base URL (can also be set via COD_API_URL env var)
    #[arg(long, env = "COD_API_URL")]
    pub api_url: Option<String>,

    /// Output format (defaults to the configured format)
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the cost summary
    Summary,

    /// List resources with utilization bands
    Resources,

    /// List optimization recommendations
    Recommendations,

    /// Show summary, resources and recommendations together
    Dashboard,

    /// Start an interactive session where recommendations can be marked implemented
    Interactive,

    /// Check that the API is reachable
    Health,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let mut settings = config::Config::load()?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    let format = cli.format.unwrap_or(settings.default_format);
    debug!(api_url = %settings.api_url, "CLI configured");

    let source = HttpDataSource::new(&settings.client_config())
        .with_context(|| format!("Invalid API URL: {}", settings.api_url))?;
    let dashboard = Dashboard::new(Arc::new(source));

    match cli.command {
        Commands::Summary => commands::show(&dashboard, Section::Summary, format).await?,
        Commands::Resources => commands::show(&dashboard, Section::Resources, format).await?,
        Commands::Recommendations => {
            commands::show(&dashboard, Section::Recommendations, format).await?
        }
        Commands::Dashboard => commands::show(&dashboard, Section::All, format).await?,
        Commands::Interactive => commands::interactive::run(&dashboard, format).await?,
        Commands::Health => commands::health(&dashboard, format).await?,
    }

    Ok(())
}
