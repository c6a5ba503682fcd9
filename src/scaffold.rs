//! Orchestration of `pypkgkit new`: configuration, download, finalization,
//! version control and the optional GitHub setup.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use log::{debug, info};

use crate::archive::{extract_tarball, move_to_target};
use crate::config::{collect_configuration, ConfigInputs, ProjectConfiguration};
use crate::constants::INITIAL_COMMIT_MESSAGE;
use crate::error::{Error, Result};
use crate::fetcher::{resolve_tag, ReleaseSource};
use crate::finalize::{self, Context};
use crate::git;
use crate::github::{self, RepoSpec};
use crate::license::LicenseSource;
use crate::naming::to_kebab;
use crate::output::Output;
use crate::prompt::Prompter;
use crate::renderer::MiniJinjaRenderer;
use crate::runner::CommandRunner;

const ARCHIVE_NAME: &str = "template.tar.gz";
const EXTRACT_DIR: &str = "extract";

/// What the user asked for.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldRequest {
    /// Destination directory; must not exist yet
    pub project_dir: PathBuf,
    pub inputs: ConfigInputs,
    /// Release tag to use instead of the latest one
    pub template_version: Option<String>,
    /// Create and push a GitHub repository
    pub github: bool,
    pub private: bool,
    pub require_reviews: u32,
}

/// External collaborators of a scaffold run.
pub struct Services<'a> {
    pub releases: &'a dyn ReleaseSource,
    pub licenses: &'a dyn LicenseSource,
    pub runner: &'a dyn CommandRunner,
    /// `None` in non-interactive mode
    pub prompter: Option<&'a dyn Prompter>,
    pub output: &'a Output,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub target: PathBuf,
    pub tag: String,
    pub config: ProjectConfiguration,
    /// Warnings of the finalizer; non-empty means "completed with warnings"
    pub warnings: Vec<String>,
    pub repository: Option<RepoSpec>,
}

impl ScaffoldReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

fn resolve_target(project_dir: &Path) -> Result<PathBuf> {
    let target = if project_dir.is_absolute() {
        project_dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(project_dir)
    };
    if target.exists() {
        return Err(Error::AlreadyExists {
            path: target.display().to_string(),
        });
    }
    Ok(target)
}

fn default_name(target: &Path) -> Option<String> {
    target
        .file_name()
        .and_then(|name| name.to_str())
        .map(to_kebab)
}

/// Downloads `tag` into a temporary directory beside `target`, extracts it
/// and moves the template root into place.
fn fetch_template(releases: &dyn ReleaseSource, tag: &str, target: &Path) -> Result<()> {
    let parent = target.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;
    let workdir = tempfile::Builder::new()
        .prefix(".pypkgkit-")
        .tempdir_in(parent)?;

    let archive = workdir.path().join(ARCHIVE_NAME);
    releases.download(tag, &archive)?;
    let root = extract_tarball(&archive, &workdir.path().join(EXTRACT_DIR))?;
    move_to_target(&root, target)
}

/// Creates a new project.
///
/// # Arguments
/// * `request` - Destination, flags and GitHub options
/// * `services` - Network, subprocess and prompt implementations
///
/// # Returns
/// * `Result<ScaffoldReport>` - Summary of the run, including soft warnings
///
/// # Errors
/// * `Error::AlreadyExists` before any network access if the destination exists
/// * Preflight, configuration, download and extraction errors abort the run
/// * `Error::InitializationFailed` if a finalizer step fails hard
pub fn scaffold(request: &ScaffoldRequest, services: &Services) -> Result<ScaffoldReport> {
    let output = services.output;
    let target = resolve_target(&request.project_dir)?;

    let mut inputs = request.inputs.clone();
    if request.github {
        github::preflight(services.runner)?;
        if inputs.github_owner.is_none() {
            inputs.github_owner = Some(github::detect_owner(services.runner)?);
        }
    }

    output.intro("Create a new Python package");
    let config = collect_configuration(
        &inputs,
        services.prompter,
        default_name(&target).as_deref(),
        services.licenses,
        output,
    )?;

    let tag = resolve_tag(services.releases, request.template_version.as_deref())?;
    info!("Using template release {tag}");
    fetch_template(services.releases, &tag, &target)?;
    output.step(&format!("Downloaded template {tag}"));

    let renderer = MiniJinjaRenderer::new()?;
    let ctx = Context {
        root: &target,
        config: &config,
        year: chrono::Utc::now().year(),
        licenses: services.licenses,
        runner: services.runner,
        renderer: &renderer,
        output,
    };
    let report = finalize::finalize(&ctx)?;

    let repo = git::init_and_commit(&target, &config.author, &config.email, INITIAL_COMMIT_MESSAGE)?;
    output.step("Initialized git repository");

    let repository = if request.github {
        let spec = RepoSpec {
            owner: config.identity.owner.clone(),
            name: config.identity.kebab_name.clone(),
            description: config.description.clone(),
            private: request.private,
            require_reviews: request.require_reviews,
        };
        github::create_repo(services.runner, &target, &spec)?;
        git::add_origin(&repo, &spec.clone_url())?;
        output.step(&format!("Created {} ({})", spec.full_name(), spec.visibility()));
        github::push(services.runner, &target)?;
        output.step("Pushed to GitHub");
        github::setup_ruleset(services.runner, &spec)?;
        output.step("Configured branch protection");
        Some(spec)
    } else {
        None
    };

    debug!("Scaffolded {}", target.display());
    Ok(ScaffoldReport {
        target,
        tag,
        config,
        warnings: report.warnings,
        repository,
    })
}

/// Prints the closing summary and the next steps.
pub fn print_summary(report: &ScaffoldReport, output: &Output) {
    let config = &report.config;
    let id = &config.identity;
    output.bar();
    output.field("Directory", &report.target.display().to_string());
    output.field("Package", &format!("{}/", id.snake_name));
    output.field("Author", &format!("{} <{}>", config.author, config.email));
    output.field("GitHub", &format!("https://github.com/{}", id.repo_path));
    output.field("PyPI", if config.enable_pypi { "yes" } else { "no" });
    output.field("License", &config.spdx_id());

    if report.is_clean() {
        output.outro("Project created successfully!");
    } else {
        output.outro("Project created with warnings (see above).");
    }

    let dir = report
        .target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| report.target.display().to_string());
    let mut steps = vec![
        format!("cd {dir}"),
        "uv sync".to_string(),
        "uv run pytest -v --cov".to_string(),
        "uv run pre-commit install".to_string(),
        format!("Replace the demo code in {}/main.py", id.snake_name),
    ];
    if report.repository.is_none() {
        steps.push(format!(
            "Create https://github.com/{0} and push: \
             git remote add origin https://github.com/{0}.git && git push -u origin main",
            id.repo_path
        ));
    }
    if config.enable_pypi {
        steps.push(format!(
            "Add a trusted publisher at https://pypi.org/manage/account/publishing/ \
             (owner {}, repo {}, workflow release.yml)",
            id.owner, id.kebab_name
        ));
    }
    output.next_steps(&steps);
}
