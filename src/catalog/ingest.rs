//! @acp:module "Catalog Ingest"
//! @acp:summary "Parse tool CSV exports and upsert them into the catalog"
//! @acp:domain catalog
//! @acp:layer io

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::store::{CatalogStore, UpsertOutcome};
use super::CatalogSource;
use crate::error::{AdvisorError, Result};
use crate::recommend::{Tool, WeightMapping};

/// Counts reported after an ingest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub created: usize,
    pub updated: usize,
    /// Rows read, including skipped rows without an id
    pub total_processed: usize,
}

type Row = HashMap<String, String>;

/// Ingest a CSV file into `store` and recompute total scores.
///
/// Does not save the store.
pub fn ingest_csv(
    store: &mut CatalogStore,
    path: &Path,
    weights: &WeightMapping,
) -> Result<IngestSummary> {
    if !CsvCatalog::handles(path) {
        return Err(AdvisorError::InvalidInput(format!(
            "Please provide a .csv file, got {:?}",
            path
        )));
    }

    let file = std::fs::File::open(path)?;
    let (tools, total_processed) = parse_rows(file)?;
    if total_processed == 0 {
        return Err(AdvisorError::EmptyCatalog(format!("{:?} has no rows", path)));
    }

    let mut summary = IngestSummary {
        total_processed,
        ..Default::default()
    };
    for tool in tools {
        match store.upsert(tool) {
            UpsertOutcome::Created => summary.created += 1,
            UpsertOutcome::Updated => summary.updated += 1,
        }
    }
    store.rescore(weights);

    tracing::info!(
        "Ingested {:?}: {} created, {} updated, {} rows",
        path,
        summary.created,
        summary.updated,
        summary.total_processed
    );
    Ok(summary)
}

/// Parse CSV text into tools, skipping rows without an id
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Tool>> {
    parse_rows(reader).map(|(tools, _)| tools)
}

/// Read-only catalog served straight from a CSV export
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// True for paths with a `.csv` extension
    pub fn handles(path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
    }
}

impl CatalogSource for CsvCatalog {
    fn fetch_catalog(&self) -> Result<Vec<Tool>> {
        let file = std::fs::File::open(&self.path)?;
        parse_csv(file)
    }
}

fn parse_rows<R: Read>(reader: R) -> Result<(Vec<Tool>, usize)> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut tools = Vec::new();
    let mut rows = 0;
    for result in rdr.byte_records() {
        let record = result?;
        rows += 1;
        let row = row_from_record(&headers, &record);
        match tool_from_row(&row) {
            Some(tool) => tools.push(tool),
            None => tracing::warn!("Skipping CSV row {} without tool_id", rows),
        }
    }
    Ok((tools, rows))
}

/// Pair header names with fields. Missing trailing fields are absent and
/// invalid UTF-8 is replaced rather than rejected.
fn row_from_record(headers: &[String], record: &csv::ByteRecord) -> Row {
    headers
        .iter()
        .zip(record.iter())
        .map(|(key, value)| (key.clone(), String::from_utf8_lossy(value).into_owned()))
        .collect()
}

/// Map one CSV row to a tool. `tool_id` falls back to an `id` column.
fn tool_from_row(row: &Row) -> Option<Tool> {
    let tool_id = text(row, "tool_id").or_else(|| text(row, "id"))?;
    let name = text(row, "name").unwrap_or_else(|| tool_id.clone());
    let slug = text(row, "slug").or_else(|| Some(slugify(&name)));

    Some(Tool {
        slug,
        homepage_url: text(row, "homepage_url"),
        description_short: text(row, "description_short"),
        category: text(row, "category").unwrap_or_default(),
        subcategory: text(row, "subcategory"),
        tags_csv: text(row, "tags_csv"),
        pricing_model: text(row, "pricing_model"),
        price_low_usd: number(row, "price_low_usd"),
        price_high_usd: number(row, "price_high_usd"),
        free_tier: flag(row, "free_tier"),
        trial_days: number(row, "trial_days").map(|d| d.max(0.0) as u32),
        api_available: flag(row, "api_available"),
        zapier: flag(row, "zapier"),
        make: flag(row, "make"),
        n8n: flag(row, "n8n"),
        webhooks: flag(row, "webhooks"),
        integrations_csv: text(row, "integrations_csv"),
        gdpr: flag(row, "gdpr"),
        soc2: flag(row, "soc2"),
        hipaa: flag(row, "hipaa"),
        accuracy_score: number(row, "accuracy_score"),
        speed_score: number(row, "speed_score"),
        cost_efficiency_score: number(row, "cost_efficiency_score"),
        integrations_score: number(row, "integrations_score"),
        data_control_score: number(row, "data_control_score"),
        learning_curve_score: number(row, "learning_curve_score"),
        longevity_score: number(row, "longevity_score"),
        total_score: number(row, "total_score"),
        last_verified_at: timestamp(row, "last_verified_at").or_else(|| Some(Utc::now())),
        tool_id,
        name,
    })
}

fn text(row: &Row, key: &str) -> Option<String> {
    row.get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Empty or unparseable numbers are absent; negatives clamp to zero
fn number(row: &Row, key: &str) -> Option<f64> {
    let raw = text(row, key)?;
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v.max(0.0)),
        _ => {
            tracing::warn!("Ignoring non-numeric {} value {:?}", key, raw);
            None
        }
    }
}

fn flag(row: &Row, key: &str) -> bool {
    text(row, key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "y"))
        .unwrap_or(false)
}

fn timestamp(row: &Row, key: &str) -> Option<DateTime<Utc>> {
    text(row, key)
        .and_then(|v| DateTime::parse_from_rfc3339(&v).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn slugify(name: &str) -> String {
    name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}
