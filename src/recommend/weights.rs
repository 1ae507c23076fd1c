//! @acp:module "Weight Store"
//! @acp:summary "Load score-dimension weights with built-in fallback and presets"
//! @acp:domain recommend
//! @acp:layer io

use std::path::{Path, PathBuf};

use super::types::{ScoreDimension, WeightMapping};

/// External source of a weight mapping.
///
/// `None` means "not available": missing, unreadable or malformed sources all
/// look the same to the caller.
pub trait WeightSource {
    fn load_weight_config(&self) -> Option<WeightMapping>;
}

/// Weights stored as a JSON object on disk, e.g.
/// `{"accuracy_score": 1.0, "cost_efficiency_score": 1.2}`
#[derive(Debug, Clone)]
pub struct FileWeightSource {
    path: PathBuf,
}

impl FileWeightSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WeightSource for FileWeightSource {
    fn load_weight_config(&self) -> Option<WeightMapping> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("No weights file at {:?}: {}", self.path, e);
                return None;
            }
        };
        match serde_json::from_str::<WeightMapping>(&content) {
            Ok(weights) => Some(weights),
            Err(e) => {
                tracing::warn!("Malformed weights file {:?}: {}", self.path, e);
                None
            }
        }
    }
}

/// A fixed mapping, mostly for tests and presets
impl WeightSource for WeightMapping {
    fn load_weight_config(&self) -> Option<WeightMapping> {
        Some(self.clone())
    }
}

/// Load weights from `source`, falling back to the built-in defaults.
///
/// Never fails. An empty mapping or one with negative / non-finite
/// multipliers is treated as unavailable.
pub fn load_weights(source: Option<&dyn WeightSource>) -> WeightMapping {
    match source.and_then(|s| s.load_weight_config()) {
        Some(weights) if weights.is_usable() => weights,
        Some(_) => {
            tracing::warn!("Weight config rejected (empty or invalid multipliers), using defaults");
            WeightMapping::builtin()
        }
        None => WeightMapping::builtin(),
    }
}

/// Built-in defaults as shipped JSON, kept in sync with `WeightMapping::builtin`
pub const DEFAULT_WEIGHTS_JSON: &str = include_str!("../../data/scoring_weights_default.json");

/// Get weights for a named preset
pub fn preset_weights(preset: &str) -> WeightMapping {
    use ScoreDimension::*;

    let table: [(ScoreDimension, f64); 7] = match preset {
        "budget" => [
            (Accuracy, 0.9),
            (Speed, 0.9),
            (CostEfficiency, 1.8),
            (Integrations, 1.0),
            (DataControl, 0.8),
            (LearningCurve, 1.0),
            (Longevity, 0.8),
        ],
        "control" => [
            (Accuracy, 1.0),
            (Speed, 0.8),
            (CostEfficiency, 1.0),
            (Integrations, 1.1),
            (DataControl, 1.8),
            (LearningCurve, 0.7),
            (Longevity, 1.4),
        ],
        "quickstart" => [
            (Accuracy, 1.0),
            (Speed, 1.5),
            (CostEfficiency, 1.1),
            (Integrations, 1.0),
            (DataControl, 0.7),
            (LearningCurve, 1.6),
            (Longevity, 0.8),
        ],
        "balanced" => return WeightMapping::builtin(),
        other => {
            tracing::warn!("Unknown weight preset '{}', using balanced", other);
            return WeightMapping::builtin();
        }
    };
    table.into_iter().collect()
}

/// Get list of available presets with their descriptions
pub fn list_presets() -> Vec<(&'static str, &'static str, WeightMapping)> {
    vec![
        ("balanced", "Default weights, cost efficiency slightly favored", preset_weights("balanced")),
        ("budget", "Strongly favors cost-efficient tools", preset_weights("budget")),
        ("control", "Favors data control and vendor longevity", preset_weights("control")),
        ("quickstart", "Favors fast, easy-to-learn tools", preset_weights("quickstart")),
    ]
}
