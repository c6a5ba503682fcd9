//! Turns a freshly extracted template tree into the user's project.
//!
//! The finalizer is a fixed, ordered list of named [`Step`]s. Each step reads
//! the tree left by the previous one, skips whatever files it needs that are
//! absent, and reports whether it finished cleanly or with warnings. A hard
//! error stops the pipeline where it is; nothing is rolled back.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::config::ProjectConfiguration;
use crate::error::{Error, Result};
use crate::license::LicenseSource;
use crate::output::Output;
use crate::renderer::TemplateRenderer;
use crate::runner::CommandRunner;

mod checks;
mod cleanup;
mod docs;
mod license;
mod pypi;
mod references;

pub use checks::find_stale_references;
pub use cleanup::{is_template_doc_line, strip_cli_job};
pub use docs::replace_marker_section;
pub use license::prepend_header;
pub use pypi::uncomment_pypi_block;

/// Everything a step may use. Steps share nothing else but the tree on disk.
pub struct Context<'a> {
    /// Root of the project being finalized
    pub root: &'a Path,
    pub config: &'a ProjectConfiguration,
    /// Year written into copyright lines
    pub year: i32,
    pub licenses: &'a dyn LicenseSource,
    pub runner: &'a dyn CommandRunner,
    pub renderer: &'a dyn TemplateRenderer,
    pub output: &'a Output,
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    /// Finished, but something needs the user's attention
    Warned(Vec<String>),
}

impl Outcome {
    pub fn warned(message: impl Into<String>) -> Self {
        Outcome::Warned(vec![message.into()])
    }
}

/// A named pipeline stage.
#[derive(Clone, Copy)]
pub struct Step {
    pub name: &'static str,
    pub run: fn(&Context) -> Result<Outcome>,
}

/// Summary of a finalizer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub warnings: Vec<String>,
}

impl Report {
    /// True when no step warned.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// The steps of a full initialization, in execution order.
pub fn default_pipeline() -> Vec<Step> {
    vec![
        Step {
            name: "rename-package",
            run: references::rename_package,
        },
        Step {
            name: "update-references",
            run: references::update_references,
        },
        Step {
            name: "readme-badges",
            run: references::readme_badges,
        },
        Step {
            name: "keywords",
            run: references::keywords,
        },
        Step {
            name: "version-and-changelog",
            run: references::version_and_changelog,
        },
        Step {
            name: "todo-comments",
            run: references::todo_comments,
        },
        Step {
            name: "readme-structure",
            run: references::readme_structure,
        },
        Step {
            name: "license",
            run: license::setup_license,
        },
        Step {
            name: "template-sections",
            run: docs::template_sections,
        },
        Step {
            name: "init-references",
            run: docs::init_references,
        },
        Step {
            name: "pypi",
            run: pypi::enable_pypi,
        },
        Step {
            name: "lockfile",
            run: checks::regenerate_lockfile,
        },
        Step {
            name: "validate",
            run: checks::validate_project,
        },
        Step {
            name: "cleanup",
            run: cleanup::remove_template_infrastructure,
        },
    ]
}

/// Runs `steps` in order and collects their warnings.
///
/// # Errors
/// * `Error::InitializationFailed` naming the step that failed
pub fn run(steps: &[Step], ctx: &Context) -> Result<Report> {
    let mut report = Report::default();
    for step in steps {
        debug!("Finalizer step {}", step.name);
        match (step.run)(ctx) {
            Ok(Outcome::Clean) => {}
            Ok(Outcome::Warned(messages)) => {
                for message in messages {
                    warn!("{}: {message}", step.name);
                    ctx.output.warning(&message);
                    report.warnings.push(message);
                }
            }
            Err(e) => {
                return Err(Error::InitializationFailed(format!("{}: {e}", step.name)));
            }
        }
    }
    Ok(report)
}

/// Runs the full pipeline.
pub fn finalize(ctx: &Context) -> Result<Report> {
    run(&default_pipeline(), ctx)
}

/// Rewrites a file through `edit`; a missing file is left alone.
///
/// # Returns
/// * `Result<bool>` - Whether the file existed and its content changed
pub(crate) fn edit_file(path: &Path, edit: impl FnOnce(&str) -> String) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    let content = fs::read_to_string(path)?;
    let updated = edit(&content);
    if updated == content {
        return Ok(false);
    }
    fs::write(path, updated)?;
    debug!("Updated {}", path.display());
    Ok(true)
}

/// Drops every line for which `remove` is true. Line endings are kept as `\n`.
pub(crate) fn remove_lines(content: &str, remove: impl Fn(&str) -> bool) -> String {
    content
        .split('\n')
        .filter(|line| !remove(line))
        .collect::<Vec<_>>()
        .join("\n")
}
