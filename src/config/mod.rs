//! @acp:module "Configuration"
//! @acp:summary "Project configuration loading and defaults"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::AdvisorError;
use crate::recommend::{
    load_weights, preset_weights, FileWeightSource, WeightMapping, DEFAULT_MAX_TOOL_COUNT,
};

/// Project config file name
pub const CONFIG_FILE: &str = ".toolstack.config.json";

fn default_catalog_path() -> PathBuf {
    PathBuf::from(".toolstack/catalog.json")
}

fn default_weights_path() -> PathBuf {
    PathBuf::from(".toolstack/scoring_weights.json")
}

fn default_max_tool_count() -> usize {
    DEFAULT_MAX_TOOL_COUNT
}

/// @acp:summary "Main advisor configuration structure"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Catalog JSON file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Optional scoring weights JSON; built-in weights when missing
    #[serde(default = "default_weights_path")]
    pub weights_path: PathBuf,

    /// Stack size used when the command line doesn't give one
    #[serde(default = "default_max_tool_count")]
    pub default_max_tool_count: usize,

    /// Weight preset applied instead of the weights file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_preset: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            weights_path: default_weights_path(),
            default_max_tool_count: default_max_tool_count(),
            default_preset: None,
        }
    }
}

impl Config {
    /// @acp:summary "Load config from a JSON file"
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        if config.default_max_tool_count == 0 {
            return Err(AdvisorError::Config(
                "defaultMaxToolCount must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// @acp:summary "Save config to a file"
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @acp:summary "Find the config: explicit path, project file, then user config dir"
    pub fn discover(explicit: Option<&Path>) -> crate::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let project = PathBuf::from(CONFIG_FILE);
        if project.exists() {
            return Self::load(project);
        }
        if let Some(user) = user_config_path() {
            if user.exists() {
                tracing::debug!("Using user config at {:?}", user);
                return Self::load(user);
            }
        }
        Ok(Self::default())
    }

    /// Resolve scoring weights: explicit preset, configured preset, weights
    /// file, built-in defaults, in that order
    pub fn weights(&self, preset: Option<&str>) -> WeightMapping {
        match preset.or(self.default_preset.as_deref()) {
            Some(name) => preset_weights(name),
            None => {
                let source = FileWeightSource::new(&self.weights_path);
                load_weights(Some(&source))
            }
        }
    }
}

/// `~/.config/toolstack/config.json` or the platform equivalent
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("toolstack").join("config.json"))
}
