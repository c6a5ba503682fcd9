//! Ordered literal find/replace over the selected file set.
//!
//! Rules are applied strictly in list order. Longer patterns come first
//! because the generic package names are substrings of the URL patterns.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::ProjectConfiguration;
use crate::constants::{
    CODEOWNERS, PYPROJECT, RECIPE, TEMPLATE_AUTHOR_LINE, TEMPLATE_DESCRIPTION,
    TEMPLATE_EMAIL_LINE, TEMPLATE_KEBAB, TEMPLATE_OWNER, TEMPLATE_PAGES,
    TEMPLATE_REPO_PATHS, TEMPLATE_SNAKE, TEMPLATE_TITLE,
};
use crate::error::Result;

/// Where a rule applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every file of the selected set
    AllFiles,
    /// One file, relative to the project root; skipped when absent
    NamedFile(&'static str),
}

/// Literal, case-sensitive replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub replacement: String,
    pub scope: Scope,
}

impl Rule {
    fn all(pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.into(),
            scope: Scope::AllFiles,
        }
    }

    fn named(file: &'static str, pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: replacement.into(),
            scope: Scope::NamedFile(file),
        }
    }
}

/// Escapes a value for a TOML basic (double-quoted) string.
/// Backslashes are doubled first, then double quotes are escaped.
pub fn escape_toml_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Replaces every occurrence of `old` in one file.
///
/// Files that are not valid UTF-8 are skipped.
///
/// # Returns
/// * `Result<bool>` - Whether the file content changed (and was written back)
pub fn replace_in_file(path: &Path, old: &str, new: &str) -> Result<bool> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            debug!("Skipping undecodable file {}", path.display());
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };
    let updated = content.replace(old, new);
    if updated == content {
        return Ok(false);
    }
    fs::write(path, updated)?;
    debug!("Replaced '{}' in {}", old, path.display());
    Ok(true)
}

/// Same as [`replace_in_file`], but a missing file is a no-op.
pub fn replace_if_exists(path: &Path, old: &str, new: &str) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    replace_in_file(path, old, new)
}

/// The reference rules for `config`, in application order.
pub fn reference_rules(config: &ProjectConfiguration) -> Vec<Rule> {
    let id = &config.identity;
    let mut rules: Vec<Rule> = TEMPLATE_REPO_PATHS
        .iter()
        .map(|path| Rule::all(path, id.repo_path.clone()))
        .collect();

    rules.push(Rule::named(
        PYPROJECT,
        TEMPLATE_AUTHOR_LINE,
        format!("name = \"{}\"", escape_toml_string(&config.author)),
    ));
    rules.push(Rule::named(
        PYPROJECT,
        TEMPLATE_EMAIL_LINE,
        format!("email = \"{}\"", escape_toml_string(&config.email)),
    ));
    rules.push(Rule::named(
        CODEOWNERS,
        &format!("@{TEMPLATE_OWNER}"),
        format!("@{}", id.owner),
    ));
    rules.push(Rule::all(
        TEMPLATE_PAGES,
        format!("{}.github.io/{}", id.owner, id.kebab_name),
    ));

    rules.push(Rule::all(TEMPLATE_SNAKE, id.snake_name.clone()));
    rules.push(Rule::all(TEMPLATE_KEBAB, id.kebab_name.clone()));
    rules.push(Rule::all(TEMPLATE_TITLE, id.title_name.clone()));

    rules.push(Rule::named(RECIPE, TEMPLATE_OWNER, id.owner.clone()));
    rules
}

/// Rules swapping the default description for the configured one.
pub fn description_rules(config: &ProjectConfiguration) -> Vec<Rule> {
    vec![
        Rule::named(
            PYPROJECT,
            TEMPLATE_DESCRIPTION,
            escape_toml_string(&config.description),
        ),
        Rule::named(RECIPE, TEMPLATE_DESCRIPTION, config.description.clone()),
    ]
}

/// Applies `rules` in order.
///
/// # Arguments
/// * `root` - Project root, used to resolve named-file rules
/// * `files` - Selected file set for all-files rules
/// * `rules` - Ordered rule list
///
/// # Returns
/// * `Result<usize>` - Number of file writes performed
pub fn apply_rules(root: &Path, files: &[PathBuf], rules: &[Rule]) -> Result<usize> {
    let mut writes = 0;
    for rule in rules {
        match rule.scope {
            Scope::AllFiles => {
                for file in files {
                    if replace_in_file(file, &rule.pattern, &rule.replacement)? {
                        writes += 1;
                    }
                }
            }
            Scope::NamedFile(name) => {
                if replace_if_exists(&root.join(name), &rule.pattern, &rule.replacement)? {
                    writes += 1;
                }
            }
        }
    }
    Ok(writes)
}
