// UI layer: where missing arguments come from and how progress is shown.
// Commands never prompt directly; they ask a `Prompt`, which the binary
// picks (terminal or non-interactive) and tests replace.

use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::error::{HvzError, Result};

/// A source of values for arguments the user did not pass.
pub trait Prompt {
    fn text(&mut self, label: &str) -> Result<String>;

    /// Like `text`, but the answer is not echoed.
    fn secret(&mut self, label: &str) -> Result<String> {
        self.text(label)
    }
}

/// Interactive terminal prompts via `dialoguer`.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn text(&mut self, label: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .interact_text()
            .map_err(HvzError::Prompt)
    }

    fn secret(&mut self, label: &str) -> Result<String> {
        Password::new()
            .with_prompt(label)
            .interact()
            .map_err(HvzError::Prompt)
    }
}

/// Used with `--no-input`: every missing argument is an error.
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn text(&mut self, label: &str) -> Result<String> {
        Err(HvzError::MissingInput(label.to_string()))
    }
}

/// Use the value passed on the command line (or environment), otherwise
/// ask `prompt`.
pub fn resolve(provided: Option<String>, label: &str, prompt: &mut dyn Prompt) -> Result<String> {
    match provided {
        Some(value) => Ok(value),
        None => prompt.text(label),
    }
}

/// Same as `resolve` but with a hidden prompt.
pub fn resolve_secret(provided: Option<String>, label: &str, prompt: &mut dyn Prompt) -> Result<String> {
    match provided {
        Some(value) => Ok(value),
        None => prompt.secret(label),
    }
}

/// Spinner on stderr while a paginated listing is fetched. indicatif hides
/// it automatically when stderr is not a terminal.
pub fn page_spinner(what: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Fetching {what}..."));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
