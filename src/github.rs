//! GitHub repository creation and branch protection through the `gh` CLI.

use std::path::Path;

use log::debug;
use serde_json::{json, Value};

use crate::constants::{REQUIRED_CHECK, RULESET_NAME};
use crate::error::{Error, Result};
use crate::git::DEFAULT_BRANCH;
use crate::runner::{install_hint, CommandOutput, CommandRunner};

/// The remote repository to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub private: bool,
    /// Approvals required before a pull request can merge
    pub require_reviews: u32,
}

impl RepoSpec {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    pub fn clone_url(&self) -> String {
        format!("https://github.com/{}.git", self.full_name())
    }

    pub fn visibility(&self) -> &'static str {
        if self.private {
            "private"
        } else {
            "public"
        }
    }
}

fn require_tool(runner: &dyn CommandRunner, tool: &str) -> Result<()> {
    let missing = || Error::ToolMissing {
        tool: tool.to_string(),
        hint: install_hint(tool),
    };
    match runner.run(tool, &["--version"], None, None) {
        Ok(output) if output.success => Ok(()),
        Ok(_) => Err(missing()),
        Err(Error::ToolMissing { .. }) => Err(missing()),
        Err(e) => Err(e),
    }
}

/// Checks that `gh` and `git` are installed and `gh` is logged in.
///
/// # Errors
/// * `Error::ToolMissing` naming the missing tool
/// * `Error::NotAuthenticated` if `gh auth status` fails
pub fn preflight(runner: &dyn CommandRunner) -> Result<()> {
    require_tool(runner, "gh")?;
    if !runner.run("gh", &["auth", "status"], None, None)?.success {
        return Err(Error::NotAuthenticated);
    }
    require_tool(runner, "git")
}

/// Login of the authenticated `gh` user.
///
/// # Errors
/// * `Error::OwnerDetectionFailed` if gh fails or prints nothing
pub fn detect_owner(runner: &dyn CommandRunner) -> Result<String> {
    let output = runner.run("gh", &["api", "user", "--jq", ".login"], None, None)?;
    let login = output.stdout.trim();
    if !output.success || login.is_empty() {
        return Err(Error::OwnerDetectionFailed);
    }
    debug!("Detected GitHub owner {login}");
    Ok(login.to_string())
}

fn checked(output: CommandOutput, operation: &str) -> Result<CommandOutput> {
    if output.success {
        Ok(output)
    } else {
        Err(Error::CommandFailed {
            operation: operation.to_string(),
            message: output.message(),
        })
    }
}

/// Creates the repository on GitHub.
pub fn create_repo(runner: &dyn CommandRunner, dir: &Path, spec: &RepoSpec) -> Result<()> {
    let full_name = spec.full_name();
    let visibility = format!("--{}", spec.visibility());
    let mut args = vec!["repo", "create", full_name.as_str(), visibility.as_str()];
    if !spec.description.is_empty() {
        args.extend(["--description", spec.description.as_str()]);
    }
    checked(
        runner.run("gh", &args, Some(dir), None)?,
        "Creating the GitHub repository",
    )?;
    Ok(())
}

/// Pushes `main` to `origin` and sets the upstream.
pub fn push(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    checked(
        runner.run("git", &["push", "-u", "origin", DEFAULT_BRANCH], Some(dir), None)?,
        "Pushing to GitHub",
    )?;
    Ok(())
}

/// The branch-protection rule set for `main`.
pub fn ruleset_payload(require_reviews: u32) -> Value {
    json!({
        "name": RULESET_NAME,
        "target": "branch",
        "enforcement": "active",
        "conditions": {
            "ref_name": {
                "include": [format!("refs/heads/{DEFAULT_BRANCH}")],
                "exclude": [],
            }
        },
        "bypass_actors": [
            {
                "actor_id": 5,
                "actor_type": "RepositoryRole",
                "bypass_mode": "always",
            }
        ],
        "rules": [
            {
                "type": "pull_request",
                "parameters": {
                    "required_approving_review_count": require_reviews,
                    "dismiss_stale_reviews_on_push": false,
                    "require_code_owner_review": false,
                    "require_last_push_approval": false,
                    "required_review_thread_resolution": false,
                },
            },
            {
                "type": "required_status_checks",
                "parameters": {
                    "strict_required_status_checks_policy": true,
                    "required_status_checks": [{"context": REQUIRED_CHECK}],
                },
            },
            {"type": "non_fast_forward"},
            {"type": "deletion"},
        ],
    })
}

/// Creates the rule set, or updates it in place when one with the same name exists.
pub fn setup_ruleset(runner: &dyn CommandRunner, spec: &RepoSpec) -> Result<()> {
    let list_endpoint = format!("repos/{}/rulesets", spec.full_name());
    let query = format!(".[] | select(.name == \"{RULESET_NAME}\") | .id");
    let existing = runner.run("gh", &["api", &list_endpoint, "--jq", &query], None, None)?;
    let existing_id = if existing.success {
        existing.stdout.trim().to_string()
    } else {
        String::new()
    };

    let (endpoint, method) = if existing_id.is_empty() {
        (list_endpoint, "POST")
    } else {
        (format!("{list_endpoint}/{existing_id}"), "PUT")
    };
    debug!("{method} {endpoint}");

    let payload = serde_json::to_string(&ruleset_payload(spec.require_reviews))?;
    checked(
        runner.run(
            "gh",
            &["api", &endpoint, "--method", method, "--input", "-"],
            None,
            Some(&payload),
        )?,
        "Configuring branch protection",
    )?;
    Ok(())
}
