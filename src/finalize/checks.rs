//! Soft checks: lockfile regeneration, import check and the stale-reference scan.
//! None of them stops the pipeline; a failure becomes a warning.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{Context, Outcome};
use crate::constants::{STALE_PATTERNS, TEXT_EXTENSIONS};
use crate::error::Result;
use crate::ignore::{is_template_test_path, walk_files};

const SKIPPED_NAMES: [&str; 3] = ["uv.lock", "init.sh", "init.py"];

pub(super) fn regenerate_lockfile(ctx: &Context) -> Result<Outcome> {
    match ctx.runner.run("uv", &["lock"], Some(ctx.root), None) {
        Ok(output) if output.success => {
            ctx.output.step("Regenerated uv.lock");
            Ok(Outcome::Clean)
        }
        Ok(output) => {
            debug!("uv lock failed: {}", output.message());
            Ok(Outcome::warned("uv lock failed. Run \"uv lock\" manually."))
        }
        Err(e) => {
            debug!("uv lock could not run: {e}");
            Ok(Outcome::warned("uv lock failed. Run \"uv lock\" manually."))
        }
    }
}

/// Files (outside excluded paths) that still mention the template.
///
/// Only text extensions are read, and undecodable files are skipped.
pub fn find_stale_references(root: &Path) -> Result<Vec<PathBuf>> {
    let mut stale = Vec::new();
    for (path, relative) in walk_files(root)? {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if SKIPPED_NAMES.contains(&name) || is_template_test_path(&relative) {
            continue;
        }
        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext));
        if !is_text {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        if STALE_PATTERNS.iter().any(|pattern| content.contains(pattern)) {
            stale.push(relative);
        }
    }
    Ok(stale)
}

pub(super) fn validate_project(ctx: &Context) -> Result<Outcome> {
    let snake = &ctx.config.identity.snake_name;
    let mut warnings = Vec::new();

    let import = format!("import {snake}");
    let imported = ctx
        .runner
        .run("uv", &["run", "python", "-c", &import], Some(ctx.root), None)
        .is_ok_and(|output| output.success);
    if !imported {
        warnings.push(format!("Could not import '{snake}'."));
    }

    let stale = find_stale_references(ctx.root)?;
    if !stale.is_empty() {
        let files = stale
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        warnings.push(format!("Stale template references found in: {files}"));
    }

    if warnings.is_empty() {
        ctx.output.step("Validated project");
        Ok(Outcome::Clean)
    } else {
        Ok(Outcome::Warned(warnings))
    }
}
