//! @acp:module "Questionnaire Command"
//! @acp:summary "Print the survey definition"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use crate::questionnaire::{QuestionKind, Questionnaire};

/// Execute the questionnaire command
pub fn execute_questionnaire(json: bool) -> Result<()> {
    let questionnaire = Questionnaire::builtin()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&questionnaire)?);
        return Ok(());
    }

    println!(
        "{} (v{})\n",
        style(&questionnaire.title).bold(),
        questionnaire.version
    );
    for question in &questionnaire.questions {
        println!("  {} {}", style(&question.key).cyan(), question.prompt);
        match question.kind {
            QuestionKind::MultiSelect | QuestionKind::SingleSelect => {
                println!("      options: {}", question.options.join(", "));
            }
            _ => {}
        }
    }
    Ok(())
}
