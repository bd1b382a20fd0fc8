//! Interactive dashboard session
//!
//! Keeps one [`Dashboard`] alive across commands read from stdin, so
//! recommendations marked as implemented stay marked until the process exits.

use anyhow::Result;
use colored::Colorize;
use optimizer_lib::{Dashboard, DashboardView, ImplementationNotice, LoadState, RecommendationId};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{render_view, Section};
use crate::output::{print_info, print_success, print_warning, OutputFormat};

/// Target of an `implement` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based row number in the recommendations table
    Row(usize),
    Id(RecommendationId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(Section),
    Implement(Target),
    Retry,
    Refresh,
    Metrics,
    Help,
    Quit,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(Command::Show(Section::All));
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "show" | "dashboard" => Command::Show(Section::All),
        "summary" => Command::Show(Section::Summary),
        "resources" => Command::Show(Section::Resources),
        "recommendations" | "recs" => Command::Show(Section::Recommendations),
        "implement" | "done" => {
            let arg = parts
                .next()
                .ok_or_else(|| "usage: implement <row | resource_id::type>".to_string())?;
            Command::Implement(parse_target(arg)?)
        }
        "retry" => Command::Retry,
        "refresh" | "reload" => Command::Refresh,
        "metrics" => Command::Metrics,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{}', type 'help'", other)),
    };
    Ok(command)
}

fn parse_target(arg: &str) -> Result<Target, String> {
    if let Ok(row) = arg.parse::<usize>() {
        if row == 0 {
            return Err("rows are numbered from 1".to_string());
        }
        return Ok(Target::Row(row));
    }
    arg.parse::<RecommendationId>().map(Target::Id)
}

/// Resolve a target against the current view
pub fn resolve_target(view: &DashboardView, target: &Target) -> Option<RecommendationId> {
    match target {
        Target::Id(id) => Some(id.clone()),
        Target::Row(row) => match view {
            DashboardView::Ready {
                recommendations, ..
            } => recommendations
                .items()
                .get(row.checked_sub(1)?)
                .map(|item| item.id.clone()),
            _ => None,
        },
    }
}

/// What an `implement` command did
#[derive(Debug, Clone, PartialEq)]
pub enum ImplementOutcome {
    Implemented(ImplementationNotice),
    AlreadyImplemented(RecommendationId),
    /// Identity not among the recommendations currently shown
    Unknown(RecommendationId),
    NoSuchRow,
}

/// Resolve `target` against the current view and mark it implemented
pub async fn implement(dashboard: &Dashboard, target: &Target) -> ImplementOutcome {
    let view = dashboard.view().await;
    let Some(id) = resolve_target(&view, target) else {
        return ImplementOutcome::NoSuchRow;
    };

    if dashboard.is_implemented(&id).await {
        return ImplementOutcome::AlreadyImplemented(id);
    }
    match dashboard.mark_implemented(&id).await {
        Some(notice) => ImplementOutcome::Implemented(notice),
        None => ImplementOutcome::Unknown(id),
    }
}

fn print_help() {
    println!("{}", "Commands".bold());
    println!("  show | summary | resources | recommendations");
    println!("  implement <row | resource_id::type>   mark a recommendation as implemented");
    println!("  retry                                  reload after a failed load");
    println!("  refresh                                reload all data");
    println!("  metrics                                print session metrics");
    println!("  help | quit");
}

fn prompt() -> Result<()> {
    print!("{} ", "cod>".cyan().bold());
    std::io::stdout().flush()?;
    Ok(())
}

async fn reload(dashboard: &Dashboard, format: OutputFormat) -> Result<()> {
    print_info("Loading dashboard data...");
    dashboard.refresh().await;
    if !render_view(&dashboard.view().await, Section::All, format)? {
        print_info("Type 'retry' to try again.");
    }
    Ok(())
}

/// Execute one command. Returns `false` when the session should end.
pub async fn execute(dashboard: &Dashboard, command: Command, format: OutputFormat) -> Result<bool> {
    match command {
        Command::Quit => return Ok(false),
        Command::Help => print_help(),
        Command::Show(section) => {
            if !render_view(&dashboard.view().await, section, format)? {
                print_info("Type 'retry' to try again.");
            }
        }
        Command::Retry => {
            if !matches!(dashboard.state().await, LoadState::Failed { .. }) {
                print_info("Last load did not fail, refreshing instead.");
            }
            reload(dashboard, format).await?;
        }
        Command::Refresh => reload(dashboard, format).await?,
        Command::Metrics => print!("{}", dashboard.metrics().encode_text()),
        Command::Implement(target) => match implement(dashboard, &target).await {
            ImplementOutcome::Implemented(notice) => print_success(&notice.to_string()),
            ImplementOutcome::AlreadyImplemented(id) => {
                print_info(&format!("{} is already marked as implemented.", id))
            }
            ImplementOutcome::Unknown(id) => {
                print_warning(&format!("{} is not in the current recommendations.", id))
            }
            ImplementOutcome::NoSuchRow => {
                print_warning("No such recommendation in the current view.")
            }
        },
    }
    Ok(true)
}

/// Run the interactive session until `quit` or end of input
pub async fn run(dashboard: &Dashboard, format: OutputFormat) -> Result<()> {
    reload(dashboard, format).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(command) => {
                if !execute(dashboard, command, format).await? {
                    break;
                }
            }
            Err(message) => print_warning(&message),
        }
        prompt()?;
    }

    Ok(())
}
