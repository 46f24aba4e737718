//! Input collection for a chosen task

use crate::ui::prompt::{PromptOutcome, Prompter};

/// Marker that turns a prompt into a yes/no confirmation
pub const CONFIRM_MARKER: &str = "y/N";

/// How a declared prompt is asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Confirm,
    FreeText,
}

impl InputMode {
    pub fn for_prompt(prompt: &str) -> Self {
        if prompt.contains(CONFIRM_MARKER) {
            InputMode::Confirm
        } else {
            InputMode::FreeText
        }
    }
}

/// Collect the value passed to a task.
///
/// No prompt yields an empty string without asking anything. Confirmations
/// default to "no" and produce `"y"` or `"n"`.
pub fn collect_input(prompt: Option<&str>, prompter: &mut dyn Prompter) -> PromptOutcome<String> {
    let prompt = match prompt {
        Some(p) => p,
        None => return PromptOutcome::Value(String::new()),
    };

    match InputMode::for_prompt(prompt) {
        InputMode::Confirm => prompter
            .confirm(prompt, false)
            .map(|yes| if yes { "y" } else { "n" }.to_string()),
        InputMode::FreeText => prompter.text(prompt),
    }
}
