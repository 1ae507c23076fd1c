//! @acp:module "Tools Command"
//! @acp:summary "Browse the tool catalog"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use console::style;

use crate::catalog::query::DEFAULT_PAGE_SIZE;
use crate::catalog::{CatalogStore, ToolPage, ToolQuery};
use crate::config::Config;
use crate::recommend::{ScoreDimension, Tool};

/// Tools subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ToolsSubcommand {
    /// List catalog tools, best total score first
    List {
        /// Case-insensitive match on name or description
        #[arg(short, long)]
        query: Option<String>,

        /// Exact category name
        #[arg(long)]
        category: Option<String>,

        /// Minimum total score
        #[arg(long)]
        min_score: Option<f64>,

        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Tools per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single tool
    Show {
        /// Tool id
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute a tools subcommand
pub fn execute_tools(
    catalog: Option<PathBuf>,
    cmd: ToolsSubcommand,
    config: &Config,
) -> Result<()> {
    let catalog_path = catalog.unwrap_or_else(|| config.catalog_path.clone());
    let store = CatalogStore::open(&catalog_path)
        .with_context(|| format!("Failed to open catalog {:?}", catalog_path))?;

    match cmd {
        ToolsSubcommand::List {
            query,
            category,
            min_score,
            page,
            page_size,
            json,
        } => {
            let query = ToolQuery {
                text: query,
                category,
                min_score,
                page,
                page_size,
            };
            let result = store.list(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_page(&result, store.updated_at());
            }
        }
        ToolsSubcommand::Show { id, json } => {
            let tool = store.require(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(tool)?);
            } else {
                print_tool(tool);
            }
        }
    }

    Ok(())
}

fn print_page(page: &ToolPage, updated_at: Option<DateTime<Utc>>) {
    if page.items.is_empty() {
        println!("No tools found ({} total)", page.total);
        return;
    }

    println!("{}:\n", style(page_header(page, updated_at)).bold());
    for tool in &page.items {
        let score = tool
            .total_score
            .map(|s| format!("{:.2}", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:16} {:28} {:24} {:>8}",
            tool.tool_id, tool.name, tool.category, score
        );
    }
}

fn page_header(page: &ToolPage, updated_at: Option<DateTime<Utc>>) -> String {
    let mut header = format!("Tools (page {}, {} total", page.page, page.total);
    if let Some(at) = updated_at {
        header.push_str(&format!(", updated {}", at.format("%Y-%m-%d %H:%M UTC")));
    }
    header.push(')');
    header
}

fn print_tool(tool: &Tool) {
    println!("{} ({})", style(&tool.name).bold(), tool.tool_id);
    println!("  Category:  {}", tool.category);
    if let Some(ref desc) = tool.description_short {
        println!("  About:     {}", desc);
    }
    if let Some(ref url) = tool.homepage_url {
        println!("  Homepage:  {}", url);
    }
    match (tool.price_low_usd, tool.price_high_usd) {
        (Some(low), Some(high)) => println!("  Price:     ${:.2} - ${:.2}/mo", low, high),
        (Some(low), None) => println!("  Price:     from ${:.2}/mo", low),
        _ => println!("  Price:     unknown"),
    }

    let mut connectors = Vec::new();
    if tool.zapier {
        connectors.push("zapier");
    }
    if tool.make {
        connectors.push("make");
    }
    if tool.n8n {
        connectors.push("n8n");
    }
    if tool.webhooks {
        connectors.push("webhooks");
    }
    if tool.api_available {
        connectors.push("api");
    }
    if !connectors.is_empty() {
        println!("  Connects:  {}", connectors.join(", "));
    }
    let integrations = tool.integrations();
    if !integrations.is_empty() {
        println!("  Integrates: {}", integrations.join(", "));
    }

    println!("\n  Scores:");
    for dim in ScoreDimension::all() {
        let value = match tool.dimension(*dim) {
            v if v > 0.0 => format!("{:.1}", v),
            _ => "-".to_string(),
        };
        println!("    {:16} {}", dim.short_name(), value);
    }
    if let Some(total) = tool.total_score {
        println!("    {:16} {}", "total", style(format!("{:.2}", total)).green());
    }
}
