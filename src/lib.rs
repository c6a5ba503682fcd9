//! pypkgkit scaffolds new Python packages from the uv-python-template.
//! It downloads a template release, renames and rewrites it for the new
//! project, then initializes version control and, optionally, GitHub.

/// Template archive extraction with path-traversal checks
pub mod archive;

/// Command-line interface module for the pypkgkit application
pub mod cli;

/// Project configuration and its collection from flags and prompts
pub mod config;

/// Literals of the upstream template
pub mod constants;

/// Error types and handling for the pypkgkit application
pub mod error;

/// Template release lookup and download
pub mod fetcher;

/// The ordered pipeline that turns the template into the new project
pub mod finalize;

/// Local git repository setup
pub mod git;

/// GitHub repository creation and rule sets via `gh`
pub mod github;

/// Blocking HTTP helpers
pub mod http;

/// Selection of the files eligible for substitution
pub mod ignore;

/// License catalog and license texts
pub mod license;

/// Diagnostic logger setup
pub mod logger;

/// Case variants of the package name
pub mod naming;

/// User-facing progress output
pub mod output;

/// User input and interaction handling
pub mod prompt;

/// Rendering of the built-in document snippets
pub mod renderer;

/// External command execution
pub mod runner;

/// Orchestration of a complete `pypkgkit new` run
pub mod scaffold;

/// Process-wide settings
pub mod settings;

/// Ordered literal find/replace rules
pub mod substitution;

/// Validation of user-supplied fields
pub mod validation;
