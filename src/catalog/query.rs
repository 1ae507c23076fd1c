//! @acp:module "Catalog Query"
//! @acp:summary "Text search, category and score filtering with pagination"
//! @acp:domain catalog
//! @acp:layer logic

use std::cmp::Ordering;

use serde::Serialize;

use crate::recommend::Tool;

/// Default page size for listings
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Catalog listing filters
#[derive(Debug, Clone)]
pub struct ToolQuery {
    /// Case-insensitive match on name or short description
    pub text: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Minimum `total_score`; unscored tools never pass
    pub min_score: Option<f64>,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

impl Default for ToolQuery {
    fn default() -> Self {
        Self {
            text: None,
            category: None,
            min_score: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct ToolPage {
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub items: Vec<Tool>,
}

impl ToolQuery {
    /// Filter, order by `total_score` descending and paginate
    pub fn apply(&self, tools: &[Tool]) -> ToolPage {
        let needle = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<&Tool> = tools
            .iter()
            .filter(|t| needle.as_deref().map_or(true, |n| matches_text(t, n)))
            .filter(|t| self.category.as_deref().map_or(true, |c| t.category == c))
            .filter(|t| {
                self.min_score
                    .map_or(true, |min| t.total_score.map_or(false, |s| s >= min))
            })
            .collect();

        matched.sort_by(|a, b| {
            let sa = a.total_score.unwrap_or(f64::NEG_INFINITY);
            let sb = b.total_score.unwrap_or(f64::NEG_INFINITY);
            sb.partial_cmp(&sa).unwrap_or(Ordering::Equal)
        });

        let page = self.page.max(1);
        let page_size = self.page_size.max(1);
        let items = matched
            .iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .map(|t| (*t).clone())
            .collect();

        ToolPage {
            total: matched.len(),
            page,
            page_size,
            items,
        }
    }
}

fn matches_text(tool: &Tool, needle: &str) -> bool {
    tool.name.to_lowercase().contains(needle)
        || tool
            .description_short
            .as_deref()
            .map_or(false, |d| d.to_lowercase().contains(needle))
}
