use crate::error::CliError;
use crate::input::Operator;
use std::cell::RefCell;
use std::collections::VecDeque;

/// An [Operator] that replays queued answers instead of prompting.
///
/// Each prompt kind pops from its own queue; an empty queue is an
/// [CliError::InputError] so a test that forgot to script an answer fails
/// loudly instead of hanging on a default.
pub struct ScriptedOperator {
    choices: RefCell<VecDeque<usize>>,
    selections: RefCell<VecDeque<Option<Vec<usize>>>>,
    edits: RefCell<VecDeque<Option<String>>>,
    confirms: RefCell<VecDeque<bool>>,
}

impl ScriptedOperator {
    pub fn new() -> Self {
        ScriptedOperator {
            choices: RefCell::new(VecDeque::new()),
            selections: RefCell::new(VecDeque::new()),
            edits: RefCell::new(VecDeque::new()),
            confirms: RefCell::new(VecDeque::new()),
        }
    }

    /// Answer the next single-choice prompt with the option at `index`.
    pub fn will_choose(self, index: usize) -> Self {
        self.choices.borrow_mut().push_back(index);
        self
    }

    /// Answer the next multi-choice prompt; `None` keeps the preselection.
    pub fn will_select(self, indexes: Option<Vec<usize>>) -> Self {
        self.selections.borrow_mut().push_back(indexes);
        self
    }

    /// Answer the next editor prompt; `None` keeps the provided default.
    pub fn will_edit(self, text: Option<&str>) -> Self {
        self.edits
            .borrow_mut()
            .push_back(text.map(|t| t.to_string()));
        self
    }

    /// Answer the next confirmation prompt.
    pub fn will_confirm(self, answer: bool) -> Self {
        self.confirms.borrow_mut().push_back(answer);
        self
    }
}

impl Default for ScriptedOperator {
    fn default() -> Self {
        Self::new()
    }
}

fn exhausted(kind: &str) -> CliError {
    CliError::InputError(format!("scripted operator has no {} answer left", kind))
}

impl Operator for ScriptedOperator {
    fn choose(&self, _prompt: &str, options: &[String]) -> Result<String, CliError> {
        let index = self
            .choices
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| exhausted("choice"))?;
        options
            .get(index)
            .cloned()
            .ok_or_else(|| CliError::InputError(format!("choice index {} out of range", index)))
    }

    fn choose_many(
        &self,
        _prompt: &str,
        options: &[String],
        preselected: &[usize],
    ) -> Result<Vec<String>, CliError> {
        let indexes = self
            .selections
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| exhausted("multi-choice"))?
            .unwrap_or_else(|| preselected.to_vec());
        Ok(indexes
            .into_iter()
            .filter_map(|i| options.get(i).cloned())
            .collect())
    }

    fn edit_text(&self, _prompt: &str, default: &str) -> Result<String, CliError> {
        let edit = self
            .edits
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| exhausted("edit"))?;
        Ok(edit.unwrap_or_else(|| default.to_string()))
    }

    fn confirm(&self, _prompt: &str, _default: bool) -> Result<bool, CliError> {
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| exhausted("confirm"))
    }
}
