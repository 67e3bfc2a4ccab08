//! Terminal prompter backed by `dialoguer`.

use console::Term;
use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};

use ngscaff_core::{
    application::ApplicationError,
    prelude::{Prompter, ScaffoldResult},
};

/// Asks questions on stderr so stdout stays clean for piped summaries.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    term: Term,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_failed(err: dialoguer::Error) -> ApplicationError {
    ApplicationError::Prompt {
        reason: err.to_string(),
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String], default: usize) -> ScaffoldResult<usize> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_on(&self.term)
            .map_err(prompt_failed)?;
        Ok(choice)
    }

    fn confirm(&self, prompt: &str, default: bool) -> ScaffoldResult<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_on(&self.term)
            .map_err(prompt_failed)?;
        Ok(answer)
    }

    fn multi_select(
        &self,
        prompt: &str,
        items: &[String],
        defaults: &[bool],
    ) -> ScaffoldResult<Vec<usize>> {
        let checked = MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .defaults(defaults)
            .interact_on(&self.term)
            .map_err(prompt_failed)?;
        Ok(checked)
    }

    fn input(&self, prompt: &str) -> ScaffoldResult<String> {
        let text: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term)
            .map_err(prompt_failed)?;
        Ok(text.trim().to_string())
    }

    fn notice(&self, message: &str) {
        if let Err(e) = self.term.write_line(message) {
            tracing::debug!(error = %e, "failed to write notice");
        }
    }
}
