#![forbid(unsafe_code)]
//! ToolStack Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use toolstack::commands::{
    execute_ingest, execute_questionnaire, execute_recommend, execute_survey, execute_tools,
    execute_weights, IngestOptions, RecommendOptions, SurveyOptions, ToolsSubcommand,
    WeightsOptions,
};
use toolstack::Config;

#[derive(Parser)]
#[command(name = "toolstack")]
#[command(about = "ToolStack Advisor - budget-aware marketing tool stack recommendations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: .toolstack.config.json, then user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a tool stack
    Recommend {
        /// JSON file with survey answers or a full request
        #[arg(short, long)]
        answers: Option<PathBuf>,

        /// Channels in priority order (can specify multiple)
        #[arg(long = "channel")]
        channels: Vec<String>,

        /// Monthly budget in USD
        #[arg(short, long)]
        budget: Option<f64>,

        /// Required integrations (can specify multiple)
        #[arg(short, long)]
        integrate: Vec<String>,

        /// Prefer self-hostable tools
        #[arg(long)]
        self_host: bool,

        /// Maximum tools in the stack
        #[arg(short, long)]
        max_tools: Option<usize>,

        /// Weight preset (balanced, budget, control, quickstart)
        #[arg(short, long)]
        preset: Option<String>,

        /// Catalog file (.json store, or a .csv export read directly)
        #[arg(long, env = "TOOLSTACK_CATALOG")]
        catalog: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show scoring details
        #[arg(long)]
        explain: bool,
    },

    /// Answer the questionnaire interactively and get a recommendation
    Survey {
        /// Weight preset (balanced, budget, control, quickstart)
        #[arg(short, long)]
        preset: Option<String>,

        /// Catalog file
        #[arg(long, env = "TOOLSTACK_CATALOG")]
        catalog: Option<PathBuf>,

        /// Save answers to a file for later `recommend --answers`
        #[arg(long)]
        save_answers: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import tools from a CSV file into the catalog
    Ingest {
        /// CSV file
        csv: PathBuf,

        /// Catalog file
        #[arg(long, env = "TOOLSTACK_CATALOG")]
        catalog: Option<PathBuf>,

        /// Weight preset used for total scores
        #[arg(short, long)]
        preset: Option<String>,

        /// Output summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse the catalog
    Tools {
        #[command(subcommand)]
        cmd: ToolsSubcommand,

        /// Catalog file
        #[arg(long, global = true, env = "TOOLSTACK_CATALOG")]
        catalog: Option<PathBuf>,
    },

    /// Show scoring weights
    Weights {
        /// Show a preset instead of the active weights
        #[arg(short, long)]
        preset: Option<String>,

        /// List available presets
        #[arg(long)]
        list_presets: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the survey questionnaire
    Questionnaire {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "toolstack=debug"
    } else {
        "toolstack=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Recommend {
            answers,
            channels,
            budget,
            integrate,
            self_host,
            max_tools,
            preset,
            catalog,
            json,
            explain,
        } => {
            let options = RecommendOptions {
                answers,
                channels,
                budget,
                integrate,
                self_host,
                max_tools,
                preset,
                catalog,
                json,
                explain,
            };
            execute_recommend(options, &config)?;
        }

        Commands::Survey {
            preset,
            catalog,
            save_answers,
            json,
        } => {
            let options = SurveyOptions {
                preset,
                catalog,
                save_answers,
                json,
            };
            execute_survey(options, &config)?;
        }

        Commands::Ingest {
            csv,
            catalog,
            preset,
            json,
        } => {
            let options = IngestOptions {
                csv,
                catalog,
                preset,
                json,
            };
            execute_ingest(options, &config)?;
        }

        Commands::Tools { cmd, catalog } => {
            execute_tools(catalog, cmd, &config)?;
        }

        Commands::Weights {
            preset,
            list_presets,
            json,
        } => {
            let options = WeightsOptions {
                preset,
                list_presets,
                json,
            };
            execute_weights(options, &config)?;
        }

        Commands::Questionnaire { json } => {
            execute_questionnaire(json)?;
        }
    }

    Ok(())
}
