//! Removal of the template's own development infrastructure.

use std::fs;

use log::debug;
use regex::Regex;

use super::{edit_file, remove_lines, Context, Outcome};
use crate::constants::{CI_WORKFLOW, CLAUDE_MD, README, TEMPLATE_ONLY_DIRS, TEMPLATE_ONLY_FILES};
use crate::error::Result;

const DOC_PATTERNS: [&str; 13] = [
    "template/",
    "conftest.py",
    "test_template_structure",
    "test_init_license",
    "test_init_flags",
    "e2e/",
    "Dockerfile",
    "verify-project.sh",
    "run-e2e.sh",
    "e2e.yml",
    ".dockerignore",
    "cli/",
    "cli-release.yml",
];

const DOC_HINTS: [&str; 13] = [
    "# Template",
    "# Fixtures",
    "# Docker",
    "# Parameterized",
    "# Container-side",
    "# Host-side",
    "# E2E",
    "# CLI",
    "Verifies template",
    "Integration tests",
    "Docker build",
    "Template-specific",
    "pypkgkit",
];

const E2E_HEADING: &str = "### On Push to Main and Pull Request";

/// True for a documentation structure entry describing template infrastructure.
pub fn is_template_doc_line(line: &str) -> bool {
    !line.trim().is_empty()
        && DOC_PATTERNS.iter().any(|pattern| line.contains(pattern))
        && DOC_HINTS.iter().any(|hint| line.contains(hint))
}

/// Removes the `# CLI package` job from a CI workflow, up to the next
/// two-space-indented key, and drops `cli-tests` from `needs:` lists.
pub fn strip_cli_job(content: &str) -> Result<String> {
    let next_job = Regex::new(r"^  \S")?;
    let mut kept = Vec::new();
    let mut skipping = false;
    for line in content.split('\n') {
        if line.trim().starts_with("# CLI package") {
            skipping = true;
            continue;
        }
        if skipping && line.trim() == "cli-tests:" {
            continue;
        }
        if skipping && next_job.is_match(line) {
            skipping = false;
        }
        if !skipping {
            kept.push(line);
        }
    }

    Ok(kept
        .into_iter()
        .map(|line| {
            if line.contains("needs:") && line.contains("cli-tests") {
                line.replace(", cli-tests", "")
                    .replace("cli-tests, ", "")
                    .replace("cli-tests", "")
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

fn strip_e2e_section(content: &str) -> String {
    let mut result = Vec::new();
    let mut skipping = false;
    for line in content.split('\n') {
        if line.contains(E2E_HEADING) && line.contains("e2e") {
            skipping = true;
            continue;
        }
        if skipping && line.starts_with("###") {
            skipping = false;
        }
        if !skipping {
            result.push(line);
        }
    }
    result.join("\n")
}

pub(super) fn remove_template_infrastructure(ctx: &Context) -> Result<Outcome> {
    let root = ctx.root;
    for file in TEMPLATE_ONLY_FILES {
        let path = root.join(file);
        if path.is_file() {
            fs::remove_file(&path)?;
            debug!("Removed {file}");
        }
    }
    for dir in TEMPLATE_ONLY_DIRS {
        let path = root.join(dir);
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
            debug!("Removed {dir}/");
        }
    }

    let ci = root.join(CI_WORKFLOW);
    if ci.is_file() {
        let content = fs::read_to_string(&ci)?;
        let stripped = strip_cli_job(&content)?;
        if stripped != content {
            fs::write(&ci, stripped)?;
        }
    }

    let readme = root.join(README);
    for doc in [root.join(CLAUDE_MD), readme.clone()] {
        edit_file(&doc, |content| remove_lines(content, is_template_doc_line))?;
    }
    edit_file(&readme, strip_e2e_section)?;

    ctx.output.step("Removed template infrastructure");
    Ok(Outcome::Clean)
}
