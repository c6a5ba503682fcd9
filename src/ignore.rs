//! Selection of the files the initializer is allowed to rewrite.
//! Infrastructure directories, the template's own tests, lockfiles and
//! binary files are left alone. No content sniffing is done.

use crate::constants::{BINARY_EXTENSIONS, EXCLUDE_DIRS, EXCLUDE_NAMES, TEMPLATE_TEST_PARTS};
use crate::error::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Compiles the file-name exclusion patterns.
///
/// # Returns
/// * `Result<GlobSet>` - Patterns matched against a bare file name
///
/// # Example
/// ```
/// let set = pypkgkit::ignore::exclusion_set().unwrap();
/// assert!(set.is_match("uv.lock"));
/// assert!(set.is_match("logo.png"));
/// assert!(!set.is_match("main.py"));
/// ```
pub fn exclusion_set() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for name in EXCLUDE_NAMES {
        builder.add(Glob::new(&globset::escape(name))?);
    }
    for ext in BINARY_EXTENSIONS {
        builder.add(Glob::new(&format!("*.{ext}"))?);
    }
    Ok(builder.build()?)
}

fn segments(relative: &Path) -> Vec<&str> {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect()
}

/// True if any segment of `relative` is an infrastructure/cache directory.
pub fn has_excluded_dir(relative: &Path) -> bool {
    segments(relative).iter().any(|part| EXCLUDE_DIRS.contains(part))
}

/// True for paths under the template's own `tests/template/` suite.
pub fn is_template_test_path(relative: &Path) -> bool {
    let parts = segments(relative);
    parts.len() >= TEMPLATE_TEST_PARTS.len()
        && parts[..TEMPLATE_TEST_PARTS.len()] == TEMPLATE_TEST_PARTS
}

fn is_pruned_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| EXCLUDE_DIRS.contains(&name))
}

/// Walks `root` and yields every regular file outside excluded directories,
/// paired with its path relative to `root`.
pub fn walk_files(root: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_pruned_dir(entry));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path().to_path_buf();
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        if has_excluded_dir(&relative) {
            continue;
        }
        files.push((path, relative));
    }
    Ok(files)
}

/// Finds every file eligible for text substitution.
///
/// # Arguments
/// * `root` - Project root directory
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Absolute paths, sorted by walk order
pub fn find_project_files(root: &Path) -> Result<Vec<PathBuf>> {
    let excluded = exclusion_set()?;
    let mut selected = Vec::new();
    for (path, relative) in walk_files(root)? {
        if is_template_test_path(&relative) {
            continue;
        }
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if excluded.is_match(name.as_ref()) {
            debug!("Skipping excluded file {}", relative.display());
            continue;
        }
        selected.push(path);
    }
    debug!("Selected {} files for substitution", selected.len());
    Ok(selected)
}
