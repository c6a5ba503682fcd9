//! Interactive prompts.
//! The [`Prompter`] trait is the seam between the configuration flow and the
//! terminal; [`DialoguerPrompter`] is the real implementation.

use std::io;

use dialoguer::{Confirm, Input, Select};

use crate::error::{Error, Result};

/// Checks one answer; an `Err` makes the prompt ask again.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<()>;

/// Asks the user for values.
pub trait Prompter {
    /// Asks for a non-empty line of text, re-asking until `validate` accepts it.
    ///
    /// # Arguments
    /// * `label` - Prompt text
    /// * `default` - Value used when the answer is empty
    /// * `validate` - Check applied to the trimmed answer
    ///
    /// # Returns
    /// * `Result<String>` - The trimmed answer
    fn text(&self, label: &str, default: Option<&str>, validate: Validator) -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&self, label: &str, default: bool) -> Result<bool>;

    /// Asks the user to pick one of `items`; returns its index.
    fn select(&self, label: &str, items: &[String], default: usize) -> Result<usize>;
}

fn map_prompt_error(err: dialoguer::Error) -> Error {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => Error::Interrupted,
        dialoguer::Error::IO(e) => Error::IoError(e),
    }
}

/// Terminal prompts built on `dialoguer`.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn text(&self, label: &str, default: Option<&str>, validate: Validator) -> Result<String> {
        let mut input = Input::<String>::new()
            .with_prompt(label)
            .validate_with(|value: &String| -> std::result::Result<(), String> {
                let value = value.trim();
                if value.is_empty() {
                    return Err(format!("{label} cannot be empty."));
                }
                validate(value).map_err(|e| e.to_string())
            });
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        let answer = input.interact_text().map_err(map_prompt_error)?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&self, label: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(label)
            .default(default)
            .interact()
            .map_err(map_prompt_error)
    }

    fn select(&self, label: &str, items: &[String], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(label)
            .items(items)
            .default(default)
            .interact()
            .map_err(map_prompt_error)
    }
}
