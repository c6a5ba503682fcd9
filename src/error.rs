//! Error handling for pypkgkit.
//! Defines the error type and result alias used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for pypkgkit operations.
///
/// Every failure of the scaffolding pipeline ends up as one of these variants,
/// and every variant renders as a single diagnostic line.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A user-supplied value broke one of the validation rules
    #[error("{0}")]
    ValidationError(String),

    /// The destination of a new project is already taken
    #[error("{path} already exists.")]
    AlreadyExists { path: String },

    /// DNS, connect or timeout failures talking to GitHub
    #[error("Network error: {0}.")]
    NetworkError(String),

    /// GitHub answered the release lookup with HTTP 403
    #[error(
        "GitHub API rate limit exceeded. Use --template-version to skip the API call."
    )]
    RateLimited,

    /// Any other HTTP failure of the GitHub API
    #[error("GitHub API error: {0}.")]
    ApiError(String),

    /// The template archive could not be fetched
    #[error("Failed to download template: {0}.")]
    DownloadError(String),

    /// The template archive could not be unpacked
    #[error("Extraction error: {0}.")]
    ExtractionError(String),

    /// An archive member tried to escape the extraction directory
    #[error("Refusing to extract: path traversal detected in '{path}'.")]
    PathTraversal { path: String },

    /// A required field was not supplied and prompting is not possible
    #[error("{label} is required (use {flag} in non-interactive mode).")]
    MissingField { label: String, flag: String },

    /// The requested license key is not in the catalog
    #[error("Unknown license key: '{key}'. Available: {available}.")]
    UnknownLicense { key: String, available: String },

    /// A required external tool is not installed
    #[error("{tool} is not installed. {hint}")]
    ToolMissing { tool: String, hint: String },

    /// The GitHub CLI has no active login
    #[error("gh is not authenticated. Run: gh auth login")]
    NotAuthenticated,

    /// `gh api user` did not yield a login
    #[error("Could not detect your GitHub username. Pass --github-owner explicitly.")]
    OwnerDetectionFailed,

    /// An external command exited unsuccessfully
    #[error("{operation} failed: {message}")]
    CommandFailed { operation: String, message: String },

    /// The finalizer pipeline stopped on a hard error
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// Represents errors in local git repository handling
    #[error("Git error: {0}.")]
    Git2Error(#[from] git2::Error),

    /// Represents errors while walking a project tree
    #[error("Directory walk error: {0}.")]
    WalkDirError(#[from] walkdir::Error),

    /// Represents errors rendering the built-in document snippets
    #[error("Render error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents JSON (de)serialization errors
    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Represents errors compiling the exclusion patterns
    #[error("Pattern error: {0}.")]
    PatternError(#[from] globset::Error),

    /// Represents an invalid built-in regular expression
    #[error("Regex error: {0}.")]
    RegexError(#[from] regex::Error),

    /// Represents an invalid built-in endpoint
    #[error("URL error: {0}.")]
    UrlError(#[from] url::ParseError),

    /// The user interrupted an interactive prompt
    #[error("Interrupted.")]
    Interrupted,

    /// The user declined the confirmation prompt
    #[error("Aborted.")]
    Aborted,
}

impl Error {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Interrupted => 130,
            Error::Aborted => 0,
            _ => 1,
        }
    }
}

/// Convenience type alias for Results with pypkgkit's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
/// * `debug` - Whether to also dump the debug form and a backtrace
///
/// # Behavior
/// Prints a single `error:` line to stderr and exits with `err.exit_code()`.
/// A declined confirmation prints "Aborted." to stdout instead.
pub fn default_error_handler(err: Error, debug: bool) -> ! {
    match err {
        Error::Aborted => println!("{err}"),
        _ => eprintln!("error: {err}"),
    }
    if debug {
        eprintln!("{err:?}");
        eprintln!("{}", std::backtrace::Backtrace::force_capture());
    }
    std::process::exit(err.exit_code());
}
