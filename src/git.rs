//! Local repository setup with `git2`.

use std::path::Path;

use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};
use log::debug;

use crate::error::Result;

/// Branch every new project starts on
pub const DEFAULT_BRANCH: &str = "main";

/// Strips the angle brackets git reserves for delimiting the email.
fn signature_part(value: &str) -> String {
    value.replace(['<', '>'], "").trim().to_string()
}

/// Initializes a repository on `main`, stages everything not ignored and
/// records the first commit.
///
/// # Arguments
/// * `dir` - Project root
/// * `author` - Commit author and committer name
/// * `email` - Commit author and committer email
/// * `message` - Commit message
///
/// # Returns
/// * `Result<Repository>` - The new repository
pub fn init_and_commit(dir: &Path, author: &str, email: &str, message: &str) -> Result<Repository> {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head(DEFAULT_BRANCH);
    let repo = Repository::init_opts(dir, &opts)?;

    let tree_id = {
        let mut index = repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.write()?;
        index.write_tree()?
    };
    {
        let tree = repo.find_tree(tree_id)?;
        let signature = Signature::now(&signature_part(author), &signature_part(email))?;
        let commit = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?;
        debug!("Created initial commit {commit} in {}", dir.display());
    }
    Ok(repo)
}

/// Registers `url` as the `origin` remote.
pub fn add_origin(repo: &Repository, url: &str) -> Result<()> {
    repo.remote("origin", url)?;
    debug!("Added remote origin {url}");
    Ok(())
}
