//! Literals of the upstream template that the initializer rewrites or removes.
//!
//! If the template renames any of its placeholders, the ordering of the
//! substitution rules in [`crate::substitution`] has to be checked again.

/// Snake-case name of the template package (also its source directory)
pub const TEMPLATE_SNAKE: &str = "python_package_template";

/// Kebab-case name of the template package
pub const TEMPLATE_KEBAB: &str = "python-package-template";

/// Title-case name of the template package
pub const TEMPLATE_TITLE: &str = "Python Package Template";

/// Owner of the upstream template repository
pub const TEMPLATE_OWNER: &str = "michaelellis003";

/// Name of the upstream template repository
pub const TEMPLATE_REPO: &str = "uv-python-template";

/// Historical repository paths of the template, most recent last
pub const TEMPLATE_REPO_PATHS: [&str; 2] = [
    "michaelellis003/python-package-template",
    "michaelellis003/uv-python-template",
];

/// GitHub Pages location of the template docs
pub const TEMPLATE_PAGES: &str = "michaelellis003.github.io/uv-python-template";

pub const TEMPLATE_AUTHOR_LINE: &str = "name = \"Michael Ellis\"";
pub const TEMPLATE_EMAIL_LINE: &str = "email = \"michaelellis003@gmail.com\"";

/// One-line description shipped in pyproject.toml and recipe/meta.yaml
pub const TEMPLATE_DESCRIPTION: &str =
    "A production-ready template for starting new Python packages.";

/// The longer blurb at the top of the template README
pub const TEMPLATE_README_BLURB: &str = "A production-ready template for starting new \
Python packages. Clone it, rename a few things, and start building \u{2014} dependency \
management, linting, type checking, testing, and CI/CD are already wired up.";

pub const TEMPLATE_KEYWORDS: &str =
    "keywords = [\"template\", \"python\", \"uv\", \"ruff\", \"pyright\"]";

pub const PYPROJECT: &str = "pyproject.toml";
pub const CODEOWNERS: &str = ".github/CODEOWNERS";
pub const RECIPE: &str = "recipe/meta.yaml";
pub const README: &str = "README.md";
pub const CLAUDE_MD: &str = "CLAUDE.md";
pub const CHANGELOG: &str = "CHANGELOG.md";
pub const LICENSE: &str = "LICENSE";
pub const LICENSE_HEADER: &str = "LICENSE_HEADER";
pub const PRE_COMMIT_CONFIG: &str = ".pre-commit-config.yaml";
pub const RELEASE_WORKFLOW: &str = ".github/workflows/release.yml";
pub const CI_WORKFLOW: &str = ".github/workflows/ci.yml";

/// Python standard-library modules a new package must not shadow
pub const STDLIB_NAMES: [&str; 52] = [
    "abc",
    "ast",
    "asyncio",
    "base64",
    "collections",
    "contextlib",
    "copy",
    "csv",
    "dataclasses",
    "datetime",
    "decimal",
    "enum",
    "functools",
    "hashlib",
    "http",
    "importlib",
    "inspect",
    "io",
    "itertools",
    "json",
    "logging",
    "math",
    "multiprocessing",
    "operator",
    "os",
    "pathlib",
    "pickle",
    "platform",
    "pprint",
    "queue",
    "random",
    "re",
    "secrets",
    "shutil",
    "signal",
    "socket",
    "sqlite3",
    "string",
    "struct",
    "subprocess",
    "sys",
    "test",
    "textwrap",
    "threading",
    "time",
    "tomllib",
    "typing",
    "unittest",
    "uuid",
    "warnings",
    "xml",
    "zipfile",
];

/// Directory names that are never scanned, wherever they appear
pub const EXCLUDE_DIRS: [&str; 9] = [
    ".git",
    ".venv",
    ".ruff_cache",
    ".pytest_cache",
    "__pycache__",
    "site",
    "dist",
    "build",
    "cli",
];

/// File names that are never rewritten
pub const EXCLUDE_NAMES: [&str; 5] =
    ["uv.lock", "CHANGELOG.md", "init.sh", "init.py", ".coverage"];

/// Extensions of files treated as binary
pub const BINARY_EXTENSIONS: [&str; 11] =
    ["png", "jpg", "gif", "ico", "gz", "zip", "whl", "tar", "inv", "so", "dylib"];

/// Leading path segments of the template's own test suite
pub const TEMPLATE_TEST_PARTS: [&str; 2] = ["tests", "template"];

/// Substrings that must not survive initialization
pub const STALE_PATTERNS: [&str; 5] = [
    "python_package_template",
    "python-package-template",
    "uv-python-template",
    "michaelellis003",
    "Michael Ellis",
];

/// Extensions the stale-reference scan reads
pub const TEXT_EXTENSIONS: [&str; 8] = ["py", "toml", "yml", "yaml", "md", "cfg", "json", "sh"];

pub const MARKER_START: &str = "<!-- TEMPLATE-ONLY-START -->";
pub const MARKER_END: &str = "<!-- TEMPLATE-ONLY-END -->";
pub const PYPI_START: &str = "# PYPI-START";
pub const PYPI_END: &str = "# PYPI-END";

/// Files deleted once the project is initialized
pub const TEMPLATE_ONLY_FILES: [&str; 5] = [
    "scripts/init.sh",
    "scripts/init.py",
    ".dockerignore",
    ".github/workflows/e2e.yml",
    ".github/workflows/cli-release.yml",
];

/// Directories deleted once the project is initialized
pub const TEMPLATE_ONLY_DIRS: [&str; 3] = ["tests/template", "tests/e2e", "cli"];

/// Name of the branch-protection rule set managed on GitHub
pub const RULESET_NAME: &str = "main branch protection";

/// Status check every pull request must pass
pub const REQUIRED_CHECK: &str = "ci-pass";

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from pypkgkit";
