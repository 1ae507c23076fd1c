//! @acp:module "Catalog"
//! @acp:summary "Tool catalog storage, CSV ingestion and listing"
//! @acp:domain catalog
//! @acp:layer io
//!
//! The recommendation engine only sees `&[Tool]`. Everything here is the
//! host's business: where tools live on disk, how CSV rows become tools,
//! and how a user browses them.

pub mod ingest;
pub mod query;
pub mod store;

pub use ingest::{ingest_csv, parse_csv, CsvCatalog, IngestSummary};
pub use query::{ToolPage, ToolQuery};
pub use store::{CatalogStore, UpsertOutcome};

use crate::error::Result;
use crate::recommend::Tool;

/// Anything that can hand the engine a catalog snapshot
pub trait CatalogSource {
    /// Read the current tool set, unfiltered
    fn fetch_catalog(&self) -> Result<Vec<Tool>>;
}

impl CatalogSource for Vec<Tool> {
    fn fetch_catalog(&self) -> Result<Vec<Tool>> {
        Ok(self.clone())
    }
}

impl CatalogSource for [Tool] {
    fn fetch_catalog(&self) -> Result<Vec<Tool>> {
        Ok(self.to_vec())
    }
}
