//! Renaming and metadata reset steps.

use std::fs;

use log::debug;
use regex::{NoExpand, Regex};

use super::{edit_file, remove_lines, Context, Outcome};
use crate::constants::{
    CHANGELOG, PYPROJECT, README, TEMPLATE_KEYWORDS, TEMPLATE_README_BLURB, TEMPLATE_SNAKE,
};
use crate::error::Result;
use crate::ignore::find_project_files;
use crate::substitution::{apply_rules, description_rules, reference_rules, replace_if_exists};

const RESET_VERSION: &str = "version = \"0.1.0\"";
const RESET_CHANGELOG: &str = "# CHANGELOG\n\n<!-- version list -->\n";
const UPGRADE_TODO: &str = "# TODO: Update the --upgrade-package";

pub(super) fn rename_package(ctx: &Context) -> Result<Outcome> {
    let old_dir = ctx.root.join(TEMPLATE_SNAKE);
    if old_dir.is_dir() {
        let snake = &ctx.config.identity.snake_name;
        fs::rename(&old_dir, ctx.root.join(snake))?;
        ctx.output.step(&format!("Renamed {TEMPLATE_SNAKE}/ to {snake}/"));
    }
    Ok(Outcome::Clean)
}

pub(super) fn update_references(ctx: &Context) -> Result<Outcome> {
    let files = find_project_files(ctx.root)?;
    let writes = apply_rules(ctx.root, &files, &reference_rules(ctx.config))?;
    apply_rules(ctx.root, &files, &description_rules(ctx.config))?;
    debug!("Reference substitution rewrote {writes} files");
    ctx.output.step("Updated package references");
    Ok(Outcome::Clean)
}

pub(super) fn readme_badges(ctx: &Context) -> Result<Outcome> {
    let readme = ctx.root.join(README);
    edit_file(&readme, |content| {
        remove_lines(content, |line| line.contains("codecov.io"))
    })?;
    replace_if_exists(&readme, TEMPLATE_README_BLURB, &ctx.config.description)?;
    Ok(Outcome::Clean)
}

pub(super) fn keywords(ctx: &Context) -> Result<Outcome> {
    replace_if_exists(&ctx.root.join(PYPROJECT), TEMPLATE_KEYWORDS, "keywords = []")?;
    Ok(Outcome::Clean)
}

pub(super) fn version_and_changelog(ctx: &Context) -> Result<Outcome> {
    let version = Regex::new(r#"(?m)^version = ".*""#)?;
    edit_file(&ctx.root.join(PYPROJECT), |content| {
        version
            .replace_all(content, NoExpand(RESET_VERSION))
            .into_owned()
    })?;
    fs::write(ctx.root.join(CHANGELOG), RESET_CHANGELOG)?;
    ctx.output.step("Reset version to 0.1.0");
    Ok(Outcome::Clean)
}

pub(super) fn todo_comments(ctx: &Context) -> Result<Outcome> {
    edit_file(&ctx.root.join(PYPROJECT), |content| {
        remove_lines(content, |line| line.contains(UPGRADE_TODO))
    })?;
    Ok(Outcome::Clean)
}

pub(super) fn readme_structure(ctx: &Context) -> Result<Outcome> {
    replace_if_exists(
        &ctx.root.join(README),
        "# Package source (rename this)",
        "# Package source",
    )?;
    Ok(Outcome::Clean)
}
