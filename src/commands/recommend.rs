//! @acp:module "Recommend Command"
//! @acp:summary "Recommend a budget-bounded tool stack from survey answers"
//! @acp:domain cli
//! @acp:layer handler

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use crate::catalog::{CatalogSource, CatalogStore, CsvCatalog};
use crate::config::Config;
use crate::recommend::{
    self, preferred_categories, Answers, RankedTool, Recommendation, RecommendRequest, Tool,
};

/// Options for the recommend command
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    /// JSON file with survey answers
    pub answers: Option<PathBuf>,
    /// Channels given on the command line, in priority order
    pub channels: Vec<String>,
    /// Monthly budget in USD
    pub budget: Option<f64>,
    /// Integrations at least one tool must support
    pub integrate: Vec<String>,
    /// Prefer self-hostable tools (n8n/webhook heuristic)
    pub self_host: bool,
    /// Maximum stack size (config default when absent)
    pub max_tools: Option<usize>,
    /// Weight preset name
    pub preset: Option<String>,
    /// Catalog file override
    pub catalog: Option<PathBuf>,
    /// Output as JSON
    pub json: bool,
    /// Show per-tool scoring details
    pub explain: bool,
}

/// JSON output for a recommendation
#[derive(Debug, Clone, Serialize)]
pub struct RecommendOutput {
    pub tools: Vec<StackItem>,
    pub alternates: Vec<StackItem>,
    pub total_monthly_estimate: f64,
    pub rationale: String,
    pub fallback_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StackItem {
    pub tool_id: String,
    pub name: String,
    pub category: String,
    pub price_low_usd: Option<f64>,
    pub total_score: Option<f64>,
    pub score: f64,
    pub boost: f64,
    pub utility_per_dollar: f64,
}

impl From<&RankedTool> for StackItem {
    fn from(ranked: &RankedTool) -> Self {
        Self {
            tool_id: ranked.tool.tool_id.clone(),
            name: ranked.tool.name.clone(),
            category: ranked.tool.category.clone(),
            price_low_usd: ranked.tool.price_low_usd,
            total_score: ranked.tool.total_score,
            score: ranked.score,
            boost: ranked.boost,
            utility_per_dollar: ranked.utility_per_dollar,
        }
    }
}

/// Execute the recommend command
pub fn execute_recommend(options: RecommendOptions, config: &Config) -> Result<()> {
    let request = build_request(&options, config)?;
    run_recommendation(&request, &options, config)
}

/// Load the catalog, run the engine and print the result
pub fn run_recommendation(
    request: &RecommendRequest,
    options: &RecommendOptions,
    config: &Config,
) -> Result<()> {
    let catalog_path = options
        .catalog
        .clone()
        .unwrap_or_else(|| config.catalog_path.clone());
    let catalog = load_catalog(&catalog_path)
        .with_context(|| format!("Failed to open catalog {:?}", catalog_path))?;

    if catalog.is_empty() {
        eprintln!(
            "{} Catalog {:?} is empty",
            style("!").yellow(),
            catalog_path
        );
        eprintln!("  Run 'toolstack ingest <file.csv>' to load tools");
    }

    let weights = config.weights(options.preset.as_deref());
    let result = recommend::recommend(&catalog, request, &weights);

    if options.json {
        let output = to_output(&result, request, options.explain);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_recommendation(&result, request, options.explain);
    }

    Ok(())
}

/// A `.csv` path is read directly; anything else is a catalog store
fn load_catalog(path: &Path) -> crate::Result<Vec<Tool>> {
    if CsvCatalog::handles(path) {
        CsvCatalog::new(path).fetch_catalog()
    } else {
        CatalogStore::open(path)?.fetch_catalog()
    }
}

/// Merge answers file, CLI flags and config into a sanitized request.
///
/// Command-line values win over the answers file.
pub fn build_request(options: &RecommendOptions, config: &Config) -> Result<RecommendRequest> {
    let mut request = match options.answers {
        Some(ref path) => load_answers_file(path, config.default_max_tool_count)?,
        None => RecommendRequest {
            max_tool_count: config.default_max_tool_count,
            ..Default::default()
        },
    };

    if !options.channels.is_empty() {
        request.answers.set_channels(options.channels.iter().cloned());
    }
    if options.budget.is_some() {
        request.budget_monthly = options.budget;
    }
    if !options.integrate.is_empty() {
        request.must_integrate_with = options.integrate.clone();
    }
    if options.self_host {
        request.prefer_self_hostable = true;
    }
    if let Some(max) = options.max_tools {
        request.max_tool_count = max;
    }

    Ok(request.sanitized())
}

/// Read an answers file.
///
/// Accepts either a full request (`{"answers": {...}, "budget_monthly": ..}`)
/// or a bare answers object (`{"channels": [...]}`).
fn load_answers_file(path: &Path, default_max_tool_count: usize) -> Result<RecommendRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers from {:?}", path))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse answers from {:?}", path))?;

    if value.get("answers").is_some() {
        serde_json::from_value(value)
            .with_context(|| format!("Invalid recommendation request in {:?}", path))
    } else {
        let answers: Answers = serde_json::from_value(value)
            .with_context(|| format!("Invalid answers in {:?}", path))?;
        Ok(RecommendRequest {
            answers,
            max_tool_count: default_max_tool_count,
            ..Default::default()
        })
    }
}

fn to_output(result: &Recommendation, request: &RecommendRequest, explain: bool) -> RecommendOutput {
    RecommendOutput {
        tools: result.stack.iter().map(StackItem::from).collect(),
        alternates: result.alternates.iter().map(StackItem::from).collect(),
        total_monthly_estimate: result.total_monthly_cost,
        rationale: result.rationale.clone(),
        fallback_used: result.fallback_used,
        preferred_categories: explain.then(|| preferred_categories(&request.answers)),
    }
}

fn print_recommendation(result: &Recommendation, request: &RecommendRequest, explain: bool) {
    if result.is_empty() {
        println!("{} No tools match these constraints", style("✗").red());
        println!("  {}", result.rationale);
        return;
    }

    println!("{}\n", style("Recommended stack").bold());
    for (idx, ranked) in result.stack.iter().enumerate() {
        print_item(idx + 1, ranked, explain);
    }

    if !result.alternates.is_empty() {
        println!("\n{}", style("Alternates").bold());
        for (idx, ranked) in result.alternates.iter().enumerate() {
            print_item(idx + 1, ranked, explain);
        }
    }

    let budget = match request.budget_monthly {
        Some(b) => format!(" (budget ${:.2})", b),
        None => String::new(),
    };
    println!(
        "\nEstimated monthly cost: {}{}",
        style(format!("${:.2}", result.total_monthly_cost)).green(),
        budget
    );
    if result.fallback_used {
        println!("{} Nothing fit the budget; showing the best single tool", style("!").yellow());
    }
    println!("{}", style(&result.rationale).dim());

    if explain {
        let preferred = preferred_categories(&request.answers);
        println!("\nPreferred categories: {}", preferred.join(" > "));
    }
}

fn print_item(rank: usize, ranked: &RankedTool, explain: bool) {
    let price = match ranked.tool.price_low_usd {
        Some(p) if p > 0.0 => format!("${:.2}/mo", p),
        _ => "free/unknown".to_string(),
    };
    println!(
        "  {:>2}. {:30} {:28} {}",
        rank,
        style(&ranked.tool.name).cyan(),
        ranked.tool.category,
        price
    );
    if explain {
        println!(
            "      score={:.3} boost={:.2} value/$={:.3}",
            ranked.score, ranked.boost, ranked.utility_per_dollar
        );
    }
}
