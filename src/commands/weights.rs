//! @acp:module "Weights Command"
//! @acp:summary "Show the active scoring weights and available presets"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use serde::Serialize;

use crate::config::Config;
use crate::recommend::weights::list_presets;
use crate::recommend::{FileWeightSource, WeightMapping, WeightSource};

/// Options for the weights command
#[derive(Debug, Clone, Default)]
pub struct WeightsOptions {
    /// Show this preset instead of the active weights
    pub preset: Option<String>,
    /// List all presets
    pub list_presets: bool,
    /// Output as JSON
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PresetEntry<'a> {
    name: &'a str,
    description: &'a str,
    weights: &'a WeightMapping,
}

/// Execute the weights command
pub fn execute_weights(options: WeightsOptions, config: &Config) -> Result<()> {
    if options.list_presets {
        let presets = list_presets();
        if options.json {
            let entries: Vec<PresetEntry> = presets
                .iter()
                .map(|(name, description, weights)| PresetEntry {
                    name,
                    description,
                    weights,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        println!("Available presets:\n");
        for (name, description, weights) in &presets {
            println!("  {} - {}", style(name).bold(), description);
            println!("    {}\n", format_inline(weights));
        }
        return Ok(());
    }

    let weights = config.weights(options.preset.as_deref());
    if options.json {
        println!("{}", serde_json::to_string_pretty(&weights)?);
        return Ok(());
    }

    println!(
        "{} ({})\n",
        style("Scoring weights").bold(),
        source_label(&options, config)
    );
    for (key, weight) in weights.iter() {
        println!("  {:24} {:.2}", key, weight);
    }
    Ok(())
}

/// Where the active weights come from
fn source_label(options: &WeightsOptions, config: &Config) -> String {
    match (options.preset.as_deref(), config.default_preset.as_deref()) {
        (Some(name), _) => format!("preset '{}'", name),
        (None, Some(name)) => format!("configured preset '{}'", name),
        (None, None) => {
            let source = FileWeightSource::new(&config.weights_path);
            if source.load_weight_config().is_some() {
                format!("{}", source.path().display())
            } else {
                "built-in defaults".to_string()
            }
        }
    }
}

fn format_inline(weights: &WeightMapping) -> String {
    weights
        .iter()
        .map(|(key, w)| format!("{}={:.1}", key.trim_end_matches("_score"), w))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::preset_weights;

    #[test]
    fn test_source_label() {
        let dir = tempfile::tempdir().unwrap();
        let weights_path = dir.path().join("weights.json");
        let config = Config {
            weights_path: weights_path.clone(),
            ..Default::default()
        };
        let options = WeightsOptions::default();
        assert_eq!(source_label(&options, &config), "built-in defaults");

        std::fs::write(&weights_path, r#"{"speed_score": 2.0}"#).unwrap();
        assert_eq!(
            source_label(&options, &config),
            weights_path.display().to_string()
        );

        let with_preset = WeightsOptions {
            preset: Some("budget".to_string()),
            ..Default::default()
        };
        assert_eq!(source_label(&with_preset, &config), "preset 'budget'");
    }

    #[test]
    fn test_format_inline_uses_short_names() {
        let line = format_inline(&preset_weights("budget"));
        assert!(line.contains("cost_efficiency=1.8"));
        assert!(!line.contains("_score"));
    }
}
