//! License step: license text, packaging metadata, `LICENSE_HEADER`, the
//! insert-license hook and per-file SPDX headers.
//!
//! Headers are prepended unconditionally, so this step must run only once.

use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use super::{edit_file, remove_lines, Context, Outcome};
use crate::constants::{LICENSE, LICENSE_HEADER, PRE_COMMIT_CONFIG, PYPROJECT, RECIPE};
use crate::error::Result;
use crate::license::{classifier_for_spdx, license_body};
use crate::substitution::replace_if_exists;

const TEMPLATE_LICENSE_FIELD: &str = "license = {text = \"Apache-2.0\"}";
const TEMPLATE_CLASSIFIER: &str = "License :: OSI Approved :: Apache Software License";
const TEMPLATE_RECIPE_LICENSE: &str = "license: Apache-2.0";
const HOOK_MARKER: &str = "  # Keep rev in sync with ruff version";
const INSERT_LICENSE_HOOK: &str = include_str!("../snippets/insert_license_hook.yaml");

pub(super) fn setup_license(ctx: &Context) -> Result<Outcome> {
    let config = ctx.config;
    if !config.has_custom_license() {
        ctx.output.step("Keeping the Apache-2.0 license");
        return Ok(Outcome::Clean);
    }
    let spdx = config.spdx_id();

    let mut outcome = Outcome::Clean;
    match license_body(ctx.licenses, &config.license_key, &config.author, ctx.year) {
        Some(body) => {
            fs::write(ctx.root.join(LICENSE), format!("{body}\n"))?;
            ctx.output.step(&format!("Wrote {spdx} LICENSE"));
        }
        None => {
            outcome = Outcome::warned(
                "Could not fetch license text from GitHub API. LICENSE file left unchanged.",
            );
        }
    }

    update_metadata(ctx.root, &spdx)?;
    fs::write(
        ctx.root.join(LICENSE_HEADER),
        format!(
            "Copyright {} {}\nSPDX-License-Identifier: {spdx}\n",
            ctx.year, config.author
        ),
    )?;
    add_insert_license_hook(ctx.root)?;

    let header = [
        format!("# Copyright {} {}", ctx.year, config.author),
        format!("# SPDX-License-Identifier: {spdx}"),
    ];
    let mut touched = 0;
    for dir in [config.identity.snake_name.as_str(), "tests"] {
        touched += apply_headers(&ctx.root.join(dir), &header)?;
    }
    ctx.output
        .step(&format!("Added {spdx} headers to {touched} Python files"));
    Ok(outcome)
}

fn update_metadata(root: &Path, spdx: &str) -> Result<()> {
    let pyproject = root.join(PYPROJECT);
    replace_if_exists(
        &pyproject,
        TEMPLATE_LICENSE_FIELD,
        &format!("license = {{text = \"{spdx}\"}}"),
    )?;
    match classifier_for_spdx(spdx) {
        Some(classifier) => {
            replace_if_exists(&pyproject, TEMPLATE_CLASSIFIER, classifier)?;
        }
        None => {
            edit_file(&pyproject, |content| {
                remove_lines(content, |line| line.contains(TEMPLATE_CLASSIFIER))
            })?;
        }
    }
    replace_if_exists(
        &root.join(RECIPE),
        TEMPLATE_RECIPE_LICENSE,
        &format!("license: {spdx}"),
    )?;
    Ok(())
}

fn add_insert_license_hook(root: &Path) -> Result<()> {
    edit_file(&root.join(PRE_COMMIT_CONFIG), |content| {
        content.replace(HOOK_MARKER, &format!("{INSERT_LICENSE_HOOK}{HOOK_MARKER}"))
    })?;
    Ok(())
}

/// Puts `header` at the top of a Python source, after a shebang line if there is one.
pub fn prepend_header(content: &str, header: &[String]) -> String {
    let mut lines: Vec<&str> = content.split('\n').collect();
    let at = usize::from(lines.first().is_some_and(|first| first.starts_with("#!")));
    for (offset, line) in header.iter().enumerate() {
        lines.insert(at + offset, line.as_str());
    }
    lines.join("\n")
}

fn apply_headers(dir: &Path, header: &[String]) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut count = 0;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        let is_python = path.extension().and_then(|ext| ext.to_str()) == Some("py");
        if !entry.file_type().is_file() || !is_python {
            continue;
        }
        let content = fs::read_to_string(path)?;
        fs::write(path, prepend_header(&content, header))?;
        debug!("Added license header to {}", path.display());
        count += 1;
    }
    Ok(count)
}
