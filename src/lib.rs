#![forbid(unsafe_code)]

//! @acp:module "ToolStack Library"
//! @acp:summary "Budget-aware marketing tool stack recommendations"
//! @acp:domain recommend
//! @acp:layer api
//! @acp:stability stable
//!
//! # ToolStack Advisor
//!
//! Scores a catalog of SaaS tools against weighted quality dimensions and
//! picks a stack that fits a monthly budget.
//!
//! ## Features
//!
//! - **Weighted Scoring**: Seven quality dimensions, configurable multipliers
//! - **Channel Preferences**: Tools in categories for the user's channels get a boost
//! - **Hard Constraints**: Integration and self-hosting filters
//! - **Greedy Selection**: Best value per dollar within budget, with alternates
//!
//! ## Example
//!
//! ```rust,no_run
//! use toolstack::{recommend, Answers, CatalogSource, CatalogStore, RecommendRequest, WeightMapping};
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = CatalogStore::open(".toolstack/catalog.json")?;
//!     let request = RecommendRequest {
//!         answers: Answers::with_channels(["SEO", "Email"]),
//!         budget_monthly: Some(100.0),
//!         ..Default::default()
//!     };
//!
//!     let result = recommend(&store.fetch_catalog()?, &request, &WeightMapping::builtin());
//!     println!("{:?} (${})", result.stack_ids(), result.total_monthly_cost);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod questionnaire;
pub mod recommend;

// Re-exports
pub use catalog::{CatalogSource, CatalogStore, IngestSummary, ToolPage, ToolQuery};
pub use config::Config;
pub use error::{AdvisorError, Result};
pub use questionnaire::Questionnaire;
pub use recommend::{
    load_weights, preset_weights, recommend, Answers, FileWeightSource, RankedTool,
    RecommendRequest, Recommendation, ScoreDimension, Tool, WeightMapping, WeightSource,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
