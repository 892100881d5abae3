mod prompts;
mod scripted;

pub use prompts::InquireOperator;
pub use scripted::ScriptedOperator;

use crate::error::CliError;

/// The interactive prompts the release workflow needs from its operator.
///
/// One method per prompt kind, each returning the selection synchronously.
/// [InquireOperator] renders real prompts; [ScriptedOperator] replays
/// pre-recorded answers in tests.
pub trait Operator {
    /// Single choice out of `options`; returns the chosen option.
    fn choose(&self, prompt: &str, options: &[String]) -> Result<String, CliError>;

    /// Multi choice with `preselected` indexes checked by default.
    fn choose_many(
        &self,
        prompt: &str,
        options: &[String],
        preselected: &[usize],
    ) -> Result<Vec<String>, CliError>;

    /// Long-form edit starting from `default`; returns the full edited text.
    fn edit_text(&self, prompt: &str, default: &str) -> Result<String, CliError>;

    /// Yes/no confirmation.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CliError>;
}
