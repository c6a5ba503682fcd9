//! Case variants of a package name.

/// Converts a package name to snake_case by swapping hyphens for underscores.
pub fn to_snake(name: &str) -> String {
    name.replace('-', "_")
}

/// Converts a package name to kebab-case by swapping underscores for hyphens.
pub fn to_kebab(name: &str) -> String {
    name.replace('_', "-")
}

/// Converts a package name to Title Case.
///
/// Separators become spaces and the first alphabetic character of every
/// space-delimited word is upper-cased. Nothing is lower-cased.
pub fn to_title(name: &str) -> String {
    name.replace(['-', '_'], " ")
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut capitalized = false;
    for c in word.chars() {
        if !capitalized && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            capitalized = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Every spelling of the project name the template needs.
///
/// Derived once from `(name, owner)`; build a new one instead of editing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub name: String,
    pub owner: String,
    pub snake_name: String,
    pub kebab_name: String,
    pub title_name: String,
    pub repo_path: String,
}

impl ProjectIdentity {
    /// Derives all variants from an already validated name and owner.
    pub fn derive(name: &str, owner: &str) -> Self {
        let kebab_name = to_kebab(name);
        Self {
            name: name.to_string(),
            owner: owner.to_string(),
            snake_name: to_snake(name),
            title_name: to_title(name),
            repo_path: format!("{owner}/{kebab_name}"),
            kebab_name,
        }
    }
}
