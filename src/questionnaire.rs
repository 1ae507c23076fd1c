//! @acp:module "Questionnaire"
//! @acp:summary "Built-in survey definition served to users and the survey command"
//! @acp:domain cli
//! @acp:layer model

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Raw questionnaire JSON shipped with the binary
pub const QUESTIONNAIRE_JSON: &str = include_str!("../data/questionnaire.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questionnaire {
    pub version: String,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub key: String,
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultiSelect,
    SingleSelect,
    Number,
    Text,
    Boolean,
}

impl Questionnaire {
    /// Load the built-in questionnaire
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(QUESTIONNAIRE_JSON).context("Failed to parse built-in questionnaire.json")
    }

    pub fn question(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.key == key)
    }
}

impl Question {
    /// Default answer as a count, if the question declares one
    pub fn default_count(&self) -> Option<usize> {
        self.default
            .as_ref()
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    }

    pub fn default_flag(&self) -> Option<bool> {
        self.default.as_ref().and_then(serde_json::Value::as_bool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::categories;

    #[test]
    fn test_builtin_parses() {
        let questionnaire = Questionnaire::builtin().expect("Failed to load questionnaire");
        assert!(!questionnaire.questions.is_empty());
        assert_eq!(
            questionnaire.question("channels").map(|q| q.kind),
            Some(QuestionKind::MultiSelect)
        );
    }

    #[test]
    fn test_question_defaults() {
        let questionnaire = Questionnaire::builtin().unwrap();
        let max = questionnaire.question("max_tool_count").unwrap();
        assert_eq!(max.default_count(), Some(8));

        let self_host = questionnaire.question("prefer_self_hostable").unwrap();
        assert_eq!(self_host.default_flag(), Some(false));
        assert_eq!(self_host.default_count(), None);

        assert_eq!(questionnaire.question("channels").unwrap().default_count(), None);
    }

    #[test]
    fn test_channel_options_match_category_table() {
        let questionnaire = Questionnaire::builtin().unwrap();
        let options = &questionnaire.question("channels").unwrap().options;
        let known: Vec<&str> = categories::channels().collect();
        assert_eq!(options.iter().map(String::as_str).collect::<Vec<_>>(), known);
    }
}
