//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod ingest;
pub mod questionnaire;
pub mod recommend;
pub mod survey;
pub mod tools;
pub mod weights;

pub use ingest::{execute_ingest, IngestOptions};
pub use questionnaire::execute_questionnaire;
pub use recommend::{execute_recommend, RecommendOptions, RecommendOutput};
pub use survey::{execute_survey, SurveyOptions};
pub use tools::{execute_tools, ToolsSubcommand};
pub use weights::{execute_weights, WeightsOptions};
