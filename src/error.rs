//! @acp:module "Errors"
//! @acp:summary "Error types for catalog, config and command handling"
//! @acp:domain cli
//! @acp:layer model
//!
//! The recommendation engine itself is total and never returns these; they
//! cover the host side (files, CSV, config, lookups).

use thiserror::Error;

/// @acp:summary "Main error type for the advisor"
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Catalog is empty: {0}")]
    EmptyCatalog(String),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
