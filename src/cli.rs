//! Command-line interface implementation for pypkgkit.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::ConfigInputs;
use crate::scaffold::ScaffoldRequest;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Command-line arguments structure for pypkgkit.
#[derive(Parser, Debug)]
#[command(
    name = "pypkgkit",
    author,
    version,
    about = "Scaffold new Python packages from uv-python-template.",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    New(NewArgs),
}

/// Options of `pypkgkit new`.
#[derive(ClapArgs, Debug, Clone)]
pub struct NewArgs {
    /// Directory name for the new project
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Package name (kebab-case)
    #[arg(long)]
    pub name: Option<String>,

    /// Author name
    #[arg(long)]
    pub author: Option<String>,

    /// Author email
    #[arg(long)]
    pub email: Option<String>,

    /// GitHub username or org
    #[arg(long)]
    pub github_owner: Option<String>,

    /// Short project description
    #[arg(long)]
    pub description: Option<String>,

    /// License key (e.g. mit, bsd-3-clause, gpl-3.0, or none)
    #[arg(long)]
    pub license: Option<String>,

    /// Enable PyPI publishing
    #[arg(long)]
    pub pypi: bool,

    /// Pin a specific template release tag
    #[arg(long, value_name = "TAG")]
    pub template_version: Option<String>,

    /// Create a GitHub repository and configure rulesets
    #[arg(long)]
    pub github: bool,

    /// Create a private GitHub repository (default: public)
    #[arg(long)]
    pub private: bool,

    /// Require N PR approvals in branch ruleset
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub require_reviews: u32,
}

impl NewArgs {
    /// Converts the parsed flags into a scaffold request.
    pub fn into_request(self) -> ScaffoldRequest {
        ScaffoldRequest {
            project_dir: self.project_dir,
            inputs: ConfigInputs {
                name: self.name,
                author: self.author,
                email: self.email,
                github_owner: self.github_owner,
                description: self.description,
                license_key: self.license,
                enable_pypi: self.pypi,
            },
            template_version: self.template_version,
            github: self.github,
            private: self.private,
            require_reviews: self.require_reviews,
        }
    }
}

fn print_help_and_exit() -> ! {
    // Nothing useful can be done if stdout is gone.
    let _ = Args::command().help_template(HELP_TEMPLATE).print_help();
    std::process::exit(1);
}

/// Parses arguments from an explicit iterator.
pub fn parse_args_from<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args)
}

/// Parses command line arguments and returns the `new` options plus the verbosity flag.
///
/// # Exits
/// * With status code 1 and the help text if no subcommand or a required
///   argument is missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> (NewArgs, bool) {
    match Args::try_parse() {
        Ok(Args {
            command: Some(Command::New(new)),
            verbose,
        }) => (new, verbose),
        Ok(Args { command: None, .. }) => print_help_and_exit(),
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                print_help_and_exit();
            } else {
                e.exit();
            }
        }
    }
}
