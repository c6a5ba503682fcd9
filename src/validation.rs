//! Input validation for project configuration fields.
//! Each check is independent and fails on the first rule the value breaks.

use regex::Regex;

use crate::constants::{STDLIB_NAMES, TEMPLATE_KEBAB, TEMPLATE_SNAKE};
use crate::error::{Error, Result};
use crate::naming::to_snake;

const NAME_PATTERN: &str = r"^[a-z]([a-z0-9_-]*[a-z0-9])?$";
const OWNER_PATTERN: &str = r"^[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?$";

fn is_multiline(value: &str) -> bool {
    value.contains('\n') || value.contains('\r')
}

/// Validates a Python package name.
///
/// # Errors
/// * If the shape is wrong, the name is the template default, or the snake
///   form shadows a standard-library module
pub fn validate_name(name: &str) -> Result<()> {
    if !Regex::new(NAME_PATTERN)?.is_match(name) {
        return Err(Error::ValidationError(format!(
            "Invalid package name: '{name}'. Must start with a lowercase letter \
             and contain only [a-z0-9_-]."
        )));
    }

    if name == TEMPLATE_KEBAB || name == TEMPLATE_SNAKE {
        return Err(Error::ValidationError(
            "Please choose a name other than the template default.".to_string(),
        ));
    }

    let snake = to_snake(name);
    if STDLIB_NAMES.contains(&snake.as_str()) {
        return Err(Error::ValidationError(format!(
            "Package name '{name}' would shadow the Python stdlib module '{snake}'."
        )));
    }

    Ok(())
}

/// Validates an email address (presence of `@`, single line).
pub fn validate_email(email: &str) -> Result<()> {
    if !email.contains('@') {
        return Err(Error::ValidationError(format!(
            "Invalid email: '{email}' (must contain @)"
        )));
    }
    if is_multiline(email) {
        return Err(Error::ValidationError("Email must be a single line.".to_string()));
    }
    Ok(())
}

/// Validates a GitHub user or organization name.
pub fn validate_github_owner(owner: &str) -> Result<()> {
    if !Regex::new(OWNER_PATTERN)?.is_match(owner) {
        return Err(Error::ValidationError(format!(
            "Invalid GitHub owner: '{owner}'. Must contain only alphanumeric \
             characters or hyphens, and cannot begin or end with a hyphen."
        )));
    }
    Ok(())
}

/// Validates an author name. Anything on a single line is accepted.
pub fn validate_author_name(name: &str) -> Result<()> {
    if is_multiline(name) {
        return Err(Error::ValidationError(
            "Author name must be a single line.".to_string(),
        ));
    }
    Ok(())
}

/// Validates a project description (non-blank, single line).
pub fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::ValidationError("Description cannot be empty.".to_string()));
    }
    if is_multiline(description) {
        return Err(Error::ValidationError(
            "Description must be a single line.".to_string(),
        ));
    }
    Ok(())
}
