//! Process-wide settings: remote endpoints, timeouts and terminal behaviour.
//! Built once in `main` and passed by reference to whatever needs it.

use std::time::Duration;

use console::Term;
use url::Url;

use crate::constants::{TEMPLATE_OWNER, TEMPLATE_REPO};
use crate::error::Result;

const API_BASE: &str = "https://api.github.com";
const ARCHIVE_BASE: &str = "https://github.com";
const LICENSE_API: &str = "https://api.github.com/licenses";

/// Enables stack traces on internal failures when set to a non-empty value
pub const DEBUG_ENV: &str = "PYPKGKIT_DEBUG";

/// Standard switch that turns off ANSI colours
pub const NO_COLOR_ENV: &str = "NO_COLOR";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Owner of the template repository
    pub template_owner: String,
    /// Name of the template repository
    pub template_repo: String,
    /// GitHub REST API root, used for the latest-release lookup
    pub api_base: Url,
    /// Web root that serves `/archive/refs/tags/{tag}.tar.gz`
    pub archive_base: Url,
    /// Licenses API root (`/licenses` and `/licenses/{key}`)
    pub license_api: Url,
    /// Budget for small JSON lookups
    pub metadata_timeout: Duration,
    /// Budget for the template archive download
    pub download_timeout: Duration,
    /// Print debug details and a backtrace for failures
    pub debug: bool,
    /// Emit ANSI colours on stdout
    pub color: bool,
}

impl Settings {
    /// Default endpoints with colours and debug turned off.
    pub fn defaults() -> Result<Self> {
        Ok(Self {
            template_owner: TEMPLATE_OWNER.to_string(),
            template_repo: TEMPLATE_REPO.to_string(),
            api_base: Url::parse(API_BASE)?,
            archive_base: Url::parse(ARCHIVE_BASE)?,
            license_api: Url::parse(LICENSE_API)?,
            metadata_timeout: Duration::from_secs(10),
            download_timeout: Duration::from_secs(60),
            debug: false,
            color: false,
        })
    }

    /// Defaults adjusted by the environment and the attached terminal.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::defaults()?;
        settings.debug = env_flag(DEBUG_ENV);
        settings.color = !env_flag(NO_COLOR_ENV) && Term::stdout().is_term();
        Ok(settings)
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|value| !value.is_empty())
}
