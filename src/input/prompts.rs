use crate::error::CliError;
use crate::input::Operator;
use inquire::{Confirm, Editor, MultiSelect, Select};

/// Terminal prompts backed by `inquire`.
pub struct InquireOperator;

impl Operator for InquireOperator {
    fn choose(&self, prompt: &str, options: &[String]) -> Result<String, CliError> {
        Select::new(prompt, options.to_vec())
            .prompt()
            .map_err(|e| CliError::InputError(e.to_string()))
    }

    fn choose_many(
        &self,
        prompt: &str,
        options: &[String],
        preselected: &[usize],
    ) -> Result<Vec<String>, CliError> {
        MultiSelect::new(prompt, options.to_vec())
            .with_default(preselected)
            .prompt()
            .map_err(|e| CliError::InputError(e.to_string()))
    }

    fn edit_text(&self, prompt: &str, default: &str) -> Result<String, CliError> {
        Editor::new(prompt)
            .with_predefined_text(default)
            .prompt()
            .map_err(|e| CliError::InputError(e.to_string()))
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CliError> {
        Confirm::new(prompt)
            .with_default(default)
            .prompt()
            .map_err(|e| CliError::InputError(e.to_string()))
    }
}
