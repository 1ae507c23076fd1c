//! @acp:module "Recommendation Types"
//! @acp:summary "Tool catalog entries, weight mappings, answers and results"
//! @acp:domain recommend
//! @acp:layer types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default maximum number of tools in a stack
pub const DEFAULT_MAX_TOOL_COUNT: usize = 8;

/// A catalog entry.
///
/// Tools are plain values: the engine reads them through shared references
/// and never writes to them. Absent prices and scores count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    pub tool_id: String,

    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub homepage_url: Option<String>,

    #[serde(default)]
    pub description_short: Option<String>,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub subcategory: Option<String>,

    #[serde(default)]
    pub tags_csv: Option<String>,

    #[serde(default)]
    pub pricing_model: Option<String>,

    /// Lower-bound monthly price estimate in USD
    #[serde(default)]
    pub price_low_usd: Option<f64>,

    #[serde(default)]
    pub price_high_usd: Option<f64>,

    #[serde(default)]
    pub free_tier: bool,

    #[serde(default)]
    pub trial_days: Option<u32>,

    #[serde(default)]
    pub api_available: bool,

    #[serde(default)]
    pub zapier: bool,

    #[serde(default)]
    pub make: bool,

    #[serde(default)]
    pub n8n: bool,

    #[serde(default)]
    pub webhooks: bool,

    /// Free-text, comma-joined list of supported integrations
    #[serde(default)]
    pub integrations_csv: Option<String>,

    #[serde(default)]
    pub gdpr: bool,

    #[serde(default)]
    pub soc2: bool,

    #[serde(default)]
    pub hipaa: bool,

    #[serde(default)]
    pub accuracy_score: Option<f64>,

    #[serde(default)]
    pub speed_score: Option<f64>,

    #[serde(default)]
    pub cost_efficiency_score: Option<f64>,

    #[serde(default)]
    pub integrations_score: Option<f64>,

    #[serde(default)]
    pub data_control_score: Option<f64>,

    #[serde(default)]
    pub learning_curve_score: Option<f64>,

    #[serde(default)]
    pub longevity_score: Option<f64>,

    /// Unboosted weighted score, computed by the catalog on ingest
    #[serde(default)]
    pub total_score: Option<f64>,

    #[serde(default)]
    pub last_verified_at: Option<DateTime<Utc>>,
}

impl Tool {
    /// Monthly price used for budgeting (absent = 0)
    pub fn price(&self) -> f64 {
        self.price_low_usd.unwrap_or(0.0).max(0.0)
    }

    /// Value of a score dimension (absent = 0)
    pub fn dimension(&self, dim: ScoreDimension) -> f64 {
        let value = match dim {
            ScoreDimension::Accuracy => self.accuracy_score,
            ScoreDimension::Speed => self.speed_score,
            ScoreDimension::CostEfficiency => self.cost_efficiency_score,
            ScoreDimension::Integrations => self.integrations_score,
            ScoreDimension::DataControl => self.data_control_score,
            ScoreDimension::LearningCurve => self.learning_curve_score,
            ScoreDimension::Longevity => self.longevity_score,
        };
        value.unwrap_or(0.0)
    }

    /// Value for a weight key; keys that name no dimension read as 0
    pub fn field_for_key(&self, key: &str) -> f64 {
        key.parse::<ScoreDimension>()
            .map(|dim| self.dimension(dim))
            .unwrap_or(0.0)
    }

    /// Self-hostability heuristic.
    ///
    /// There is no real self-hosting attribute in the catalog. A tool that
    /// plugs into n8n or exposes webhooks can be driven from infrastructure
    /// the user runs, so that is used as a proxy. It is not a guarantee the
    /// tool itself can be self-hosted.
    pub fn is_self_hostable(&self) -> bool {
        self.n8n || self.webhooks
    }

    /// Case-insensitive substring match against the integrations text.
    /// `needle` must already be lowercase.
    pub fn mentions_integration(&self, needle: &str) -> bool {
        self.integrations_csv
            .as_deref()
            .map(|text| text.to_lowercase().contains(needle))
            .unwrap_or(false)
    }

    /// Individual integration names, trimmed
    pub fn integrations(&self) -> Vec<&str> {
        self.integrations_csv
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Score dimensions a tool is rated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDimension {
    Accuracy,
    Speed,
    CostEfficiency,
    Integrations,
    DataControl,
    LearningCurve,
    Longevity,
}

impl ScoreDimension {
    pub fn all() -> &'static [ScoreDimension] {
        &[
            ScoreDimension::Accuracy,
            ScoreDimension::Speed,
            ScoreDimension::CostEfficiency,
            ScoreDimension::Integrations,
            ScoreDimension::DataControl,
            ScoreDimension::LearningCurve,
            ScoreDimension::Longevity,
        ]
    }

    /// Canonical weight key, matching the catalog column name
    pub fn key(&self) -> &'static str {
        match self {
            ScoreDimension::Accuracy => "accuracy_score",
            ScoreDimension::Speed => "speed_score",
            ScoreDimension::CostEfficiency => "cost_efficiency_score",
            ScoreDimension::Integrations => "integrations_score",
            ScoreDimension::DataControl => "data_control_score",
            ScoreDimension::LearningCurve => "learning_curve_score",
            ScoreDimension::Longevity => "longevity_score",
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.key().trim_end_matches("_score")
    }
}

impl FromStr for ScoreDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        let bare = normalized.trim_end_matches("_score");
        ScoreDimension::all()
            .iter()
            .copied()
            .find(|dim| dim.short_name() == bare)
            .ok_or_else(|| format!("Unknown score dimension: {}", s))
    }
}

impl fmt::Display for ScoreDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Score-dimension key to multiplier.
///
/// Scoring iterates these keys, so dimensions missing here contribute nothing
/// and keys that name no dimension read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightMapping(BTreeMap<String, f64>);

impl WeightMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in defaults, cost efficiency weighted highest
    pub fn builtin() -> Self {
        [
            (ScoreDimension::Accuracy, 1.0),
            (ScoreDimension::Speed, 1.0),
            (ScoreDimension::CostEfficiency, 1.2),
            (ScoreDimension::Integrations, 1.1),
            (ScoreDimension::DataControl, 1.0),
            (ScoreDimension::LearningCurve, 0.8),
            (ScoreDimension::Longevity, 0.9),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, weight: f64) -> Option<f64> {
        self.0.insert(key.into(), weight)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A mapping is usable when it is non-empty and every multiplier is a
    /// finite, non-negative number.
    pub fn is_usable(&self) -> bool {
        !self.0.is_empty() && self.0.values().all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl FromIterator<(ScoreDimension, f64)> for WeightMapping {
    fn from_iter<I: IntoIterator<Item = (ScoreDimension, f64)>>(iter: I) -> Self {
        WeightMapping(
            iter.into_iter()
                .map(|(dim, w)| (dim.key().to_string(), w))
                .collect(),
        )
    }
}

impl FromIterator<(String, f64)> for WeightMapping {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        WeightMapping(iter.into_iter().collect())
    }
}

/// Survey answers: question key to answer value.
///
/// Open-ended so new questions don't break older engines. Only the
/// `channels` key is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, serde_json::Value>);

impl Answers {
    pub const CHANNELS_KEY: &'static str = "channels";

    pub fn new() -> Self {
        Self::default()
    }

    /// Answers with only a channel selection
    pub fn with_channels<I, S>(channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut answers = Self::new();
        answers.set_channels(channels);
        answers
    }

    pub fn set_channels<I, S>(&mut self, channels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = channels
            .into_iter()
            .map(|c| serde_json::Value::String(c.into()))
            .collect();
        self.0
            .insert(Self::CHANNELS_KEY.to_string(), serde_json::Value::Array(list));
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Selected channels, in the order given.
    ///
    /// Accepts a single string or a list of strings. Anything else
    /// (missing, null, numbers) yields no channels; non-string list
    /// entries are skipped.
    pub fn channels(&self) -> Vec<String> {
        match self.0.get(Self::CHANNELS_KEY) {
            Some(serde_json::Value::String(s)) => vec![s.clone()],
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Caller-supplied constraints for one recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub answers: Answers,

    #[serde(default)]
    pub budget_monthly: Option<f64>,

    #[serde(default)]
    pub must_integrate_with: Vec<String>,

    #[serde(default)]
    pub prefer_self_hostable: bool,

    #[serde(default = "default_max_tool_count")]
    pub max_tool_count: usize,
}

fn default_max_tool_count() -> usize {
    DEFAULT_MAX_TOOL_COUNT
}

impl Default for RecommendRequest {
    fn default() -> Self {
        Self {
            answers: Answers::default(),
            budget_monthly: None,
            must_integrate_with: Vec::new(),
            prefer_self_hostable: false,
            max_tool_count: DEFAULT_MAX_TOOL_COUNT,
        }
    }
}

impl RecommendRequest {
    /// Bring the request within the engine's preconditions: at least one
    /// tool, a non-negative budget, no NaN budget.
    pub fn sanitized(mut self) -> Self {
        self.max_tool_count = self.max_tool_count.max(1);
        self.budget_monthly = match self.budget_monthly {
            Some(b) if b.is_nan() => None,
            Some(b) => Some(b.max(0.0)),
            None => None,
        };
        self
    }
}

/// A tool with the score it was ranked by
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTool {
    pub tool: Tool,
    /// Weighted score after the category boost
    pub score: f64,
    /// Category boost that was applied (1.0 = none)
    pub boost: f64,
    pub utility_per_dollar: f64,
}

impl RankedTool {
    pub fn id(&self) -> &str {
        &self.tool.tool_id
    }

    pub fn price(&self) -> f64 {
        self.tool.price()
    }
}

/// Rationale returned when nothing survives filtering
pub const NO_MATCH_RATIONALE: &str = "no match";

/// Outcome of a recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub stack: Vec<RankedTool>,
    pub alternates: Vec<RankedTool>,
    pub total_monthly_cost: f64,
    pub rationale: String,
    /// Set when no tool fit the budget and the best single tool was used
    pub fallback_used: bool,
}

impl Recommendation {
    pub fn no_match() -> Self {
        Self {
            stack: Vec::new(),
            alternates: Vec::new(),
            total_monthly_cost: 0.0,
            rationale: NO_MATCH_RATIONALE.to_string(),
            fallback_used: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn stack_ids(&self) -> Vec<&str> {
        self.stack.iter().map(RankedTool::id).collect()
    }

    pub fn alternate_ids(&self) -> Vec<&str> {
        self.alternates.iter().map(RankedTool::id).collect()
    }
}
