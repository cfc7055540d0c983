//! dialoguer-backed [`Prompter`] used when sr runs in a terminal.

use dialoguer::{Confirm, FuzzySelect, Input, Select, theme::ColorfulTheme};
use sr_core::{Error, Prompter, Result};

#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

fn prompt_error(err: dialoguer::Error) -> Error {
    Error::Prompt(err.to_string())
}

impl Prompter for TerminalPrompter {
    fn fuzzy_select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        FuzzySelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(prompt_error)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(prompt_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_error)
    }

    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Command is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(prompt_error)
    }

    fn note(&self, message: &str) {
        println!("{}", message);
    }
}
