//! @acp:module "Survey Command"
//! @acp:summary "Interactive questionnaire that feeds the recommender"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select, Sort};

use super::recommend::{run_recommendation, RecommendOptions};
use crate::config::Config;
use crate::questionnaire::{QuestionKind, Questionnaire};
use crate::recommend::{Answers, RecommendRequest};

/// Options for the survey command
#[derive(Debug, Clone, Default)]
pub struct SurveyOptions {
    /// Weight preset name
    pub preset: Option<String>,
    /// Catalog file override
    pub catalog: Option<std::path::PathBuf>,
    /// Write the collected request to this file
    pub save_answers: Option<std::path::PathBuf>,
    /// Output as JSON
    pub json: bool,
}

/// Execute the survey command
pub fn execute_survey(options: SurveyOptions, config: &Config) -> Result<()> {
    let questionnaire = Questionnaire::builtin()?;
    println!("{}\n", style(&questionnaire.title).bold());

    let request = ask_questions(&questionnaire, config)?.sanitized();

    if let Some(ref path) = options.save_answers {
        let content = serde_json::to_string_pretty(&request)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write answers to {:?}", path))?;
        println!("{} Saved answers to {:?}\n", style("✓").green(), path);
    }

    let recommend_options = RecommendOptions {
        preset: options.preset,
        catalog: options.catalog,
        json: options.json,
        ..Default::default()
    };
    run_recommendation(&request, &recommend_options, config)
}

fn ask_questions(questionnaire: &Questionnaire, config: &Config) -> Result<RecommendRequest> {
    let theme = ColorfulTheme::default();
    let mut request = RecommendRequest {
        max_tool_count: config.default_max_tool_count,
        ..Default::default()
    };
    let mut answers = Answers::new();

    for question in &questionnaire.questions {
        match (question.key.as_str(), question.kind) {
            ("channels", _) => {
                let picked = MultiSelect::with_theme(&theme)
                    .with_prompt(&question.prompt)
                    .items(&question.options)
                    .interact()?;
                let mut channels: Vec<String> =
                    picked.iter().map(|&i| question.options[i].clone()).collect();

                if channels.len() > 1 {
                    let order = Sort::with_theme(&theme)
                        .with_prompt("Order channels by importance")
                        .items(&channels)
                        .interact()?;
                    channels = order.iter().map(|&i| channels[i].clone()).collect();
                }
                answers.set_channels(channels);
            }
            ("budget_monthly", _) => {
                let raw: String = Input::with_theme(&theme)
                    .with_prompt(&question.prompt)
                    .allow_empty(true)
                    .interact_text()?;
                request.budget_monthly = parse_budget(&raw)?;
            }
            ("must_integrate_with", _) => {
                let raw: String = Input::with_theme(&theme)
                    .with_prompt(&question.prompt)
                    .allow_empty(true)
                    .interact_text()?;
                request.must_integrate_with = split_list(&raw);
            }
            ("prefer_self_hostable", _) => {
                request.prefer_self_hostable = Confirm::with_theme(&theme)
                    .with_prompt(&question.prompt)
                    .default(question.default_flag().unwrap_or(false))
                    .interact()?;
            }
            ("max_tool_count", _) => {
                request.max_tool_count = Input::with_theme(&theme)
                    .with_prompt(&question.prompt)
                    .default(max_tools_default(questionnaire, config))
                    .interact_text()?;
            }
            (key, QuestionKind::SingleSelect) => {
                let idx = Select::with_theme(&theme)
                    .with_prompt(&question.prompt)
                    .items(&question.options)
                    .default(0)
                    .interact()?;
                answers.insert(key, serde_json::Value::String(question.options[idx].clone()));
            }
            (key, _) => {
                let raw: String = Input::with_theme(&theme)
                    .with_prompt(&question.prompt)
                    .allow_empty(true)
                    .interact_text()?;
                answers.insert(key, serde_json::Value::String(raw));
            }
        }
    }

    request.answers = answers;
    Ok(request)
}

/// Stack size offered by the prompt: the questionnaire's default, else the
/// configured one
fn max_tools_default(questionnaire: &Questionnaire, config: &Config) -> usize {
    questionnaire
        .question("max_tool_count")
        .and_then(|q| q.default_count())
        .filter(|&n| n >= 1)
        .unwrap_or(config.default_max_tool_count)
}

fn parse_budget(raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim().trim_start_matches('$');
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed
        .parse()
        .with_context(|| format!("Budget must be a number, got {:?}", raw))?;
    Ok(Some(value))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
