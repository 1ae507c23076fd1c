//! @acp:module "Ingest Command"
//! @acp:summary "Load a tool CSV export into the catalog"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;

use crate::catalog::{ingest_csv, CatalogStore};
use crate::config::Config;

/// Options for the ingest command
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// CSV file to read
    pub csv: PathBuf,
    /// Catalog file override
    pub catalog: Option<PathBuf>,
    /// Weight preset used to recompute total scores
    pub preset: Option<String>,
    /// Output summary as JSON
    pub json: bool,
}

/// Execute the ingest command
pub fn execute_ingest(options: IngestOptions, config: &Config) -> Result<()> {
    let catalog_path = options
        .catalog
        .clone()
        .unwrap_or_else(|| config.catalog_path.clone());

    let mut store = CatalogStore::open(&catalog_path)
        .with_context(|| format!("Failed to open catalog {:?}", catalog_path))?;
    let weights = config.weights(options.preset.as_deref());

    let summary = ingest_csv(&mut store, &options.csv, &weights)
        .with_context(|| format!("Failed to ingest {:?}", options.csv))?;
    store
        .save()
        .with_context(|| format!("Failed to write catalog {:?}", catalog_path))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} Ingested {} rows from {:?}",
            style("✓").green(),
            summary.total_processed,
            options.csv
        );
        println!("  Created: {}", summary.created);
        println!("  Updated: {}", summary.updated);
        println!("  Catalog: {:?} ({} tools)", store.path(), store.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
tool_id,name,category,price_low_usd,accuracy_score,speed_score
t1,Mailer,Email Marketing,10,8,7
t2,Ranker,SEO Tools,25,9,6
";

    #[test]
    fn test_ingest_writes_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("tools.csv");
        std::fs::write(&csv, SAMPLE).unwrap();
        let catalog = dir.path().join("out").join("catalog.json");

        let options = IngestOptions {
            csv,
            catalog: Some(catalog.clone()),
            preset: None,
            json: true,
        };
        execute_ingest(options, &Config::default()).unwrap();

        let store = CatalogStore::open(&catalog).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get("t2").and_then(|t| t.total_score).is_some());
    }

    #[test]
    fn test_ingest_rejects_non_csv() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("tools.txt");
        std::fs::write(&txt, SAMPLE).unwrap();

        let options = IngestOptions {
            csv: txt,
            catalog: Some(dir.path().join("catalog.json")),
            preset: None,
            json: false,
        };
        assert!(execute_ingest(options, &Config::default()).is_err());
        assert!(!dir.path().join("catalog.json").exists());
    }
}
