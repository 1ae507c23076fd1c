//! @acp:module "Catalog Store"
//! @acp:summary "JSON-file backed tool catalog keyed by tool_id"
//! @acp:domain catalog
//! @acp:layer io

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::query::{ToolPage, ToolQuery};
use super::CatalogSource;
use crate::error::{AdvisorError, Result};
use crate::recommend::{score, Tool, WeightMapping};

/// On-disk catalog format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    tools: Vec<Tool>,
}

/// Whether an upsert added or replaced a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// @acp:summary "Tool catalog persisted as a JSON file"
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
    data: CatalogFile,
}

impl CatalogStore {
    /// Open the catalog at `path`; a missing file is an empty catalog
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!("No catalog at {:?}, starting empty", path);
            CatalogFile::default()
        };
        Ok(Self { path, data })
    }

    /// In-memory catalog that saves to `path`
    pub fn with_tools<P: AsRef<Path>>(path: P, tools: Vec<Tool>) -> Self {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            data: CatalogFile::default(),
        };
        for tool in tools {
            store.upsert(tool);
        }
        store
    }

    /// @acp:summary "Write catalog to its JSON file"
    pub fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.data.updated_at = Some(Utc::now());
        let content = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.data.updated_at
    }

    pub fn tools(&self) -> &[Tool] {
        &self.data.tools
    }

    pub fn len(&self) -> usize {
        self.data.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.tools.is_empty()
    }

    pub fn get(&self, tool_id: &str) -> Option<&Tool> {
        self.data.tools.iter().find(|t| t.tool_id == tool_id)
    }

    /// Look up a tool, failing with `ToolNotFound`
    pub fn require(&self, tool_id: &str) -> Result<&Tool> {
        self.get(tool_id)
            .ok_or_else(|| AdvisorError::ToolNotFound(tool_id.to_string()))
    }

    /// Insert or replace a tool by `tool_id`
    pub fn upsert(&mut self, tool: Tool) -> UpsertOutcome {
        match self.data.tools.iter_mut().find(|t| t.tool_id == tool.tool_id) {
            Some(existing) => {
                *existing = tool;
                UpsertOutcome::Updated
            }
            None => {
                self.data.tools.push(tool);
                UpsertOutcome::Created
            }
        }
    }

    /// Recompute every tool's unboosted `total_score`
    pub fn rescore(&mut self, weights: &WeightMapping) {
        for tool in &mut self.data.tools {
            tool.total_score = Some(score(tool, weights));
        }
    }

    /// Search and paginate the catalog
    pub fn list(&self, query: &ToolQuery) -> ToolPage {
        query.apply(&self.data.tools)
    }
}

impl CatalogSource for CatalogStore {
    fn fetch_catalog(&self) -> Result<Vec<Tool>> {
        Ok(self.data.tools.clone())
    }
}
