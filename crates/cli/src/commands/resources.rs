//! Resource listing

use anyhow::Result;
use colored::Colorize;
use optimizer_lib::ResourceView;
use tabled::Tabled;

use crate::output::{
    color_badge, format_currency, format_storage, print_json, print_warning, OutputFormat,
};

/// Row for resources table
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Instance")]
    instance_type: String,
    #[tabled(rename = "Storage")]
    storage: String,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "Memory")]
    memory: String,
    #[tabled(rename = "Cost/mo")]
    cost: String,
}

impl From<&ResourceView> for ResourceRow {
    fn from(view: &ResourceView) -> Self {
        let r = &view.resource;
        Self {
            id: r.id,
            name: r.name.clone(),
            kind: r.resource_type.to_string(),
            provider: r.provider.to_string(),
            instance_type: r.instance_type.clone(),
            storage: format_storage(r.storage_gb),
            cpu: color_badge(view.cpu.as_ref()),
            memory: color_badge(view.memory.as_ref()),
            cost: format_currency(r.monthly_cost),
        }
    }
}

/// Render the resource list with utilization bands
pub fn render_resources(resources: &[ResourceView], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(resources)?,
        OutputFormat::Table => {
            println!("{}", "Cloud Resources".bold());
            println!("{}", "-".repeat(50));

            if resources.is_empty() {
                print_warning("No resources found");
                return Ok(());
            }

            let rows: Vec<ResourceRow> = resources.iter().map(ResourceRow::from).collect();
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            println!("\nTotal: {} resources\n", resources.len());
        }
    }

    Ok(())
}
