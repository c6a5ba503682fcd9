//! Blocking HTTP helpers on top of `ureq`.

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use log::debug;

const USER_AGENT: &str = concat!("pypkgkit/", env!("CARGO_PKG_VERSION"));

/// Builds an agent whose requests give up after `timeout`.
pub fn agent(timeout: Duration) -> ureq::Agent {
    let config = ureq::Agent::config_builder().timeout_global(Some(timeout)).build();
    ureq::Agent::new_with_config(config)
}

/// GET `url` from the GitHub API and return the body as text.
pub fn get_json_text(agent: &ureq::Agent, url: &str) -> Result<String, ureq::Error> {
    debug!("GET {url}");
    agent
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.github+json")
        .call()?
        .into_body()
        .read_to_string()
}

/// GET `url` and stream the body into `dest`.
pub fn download_to_file(agent: &ureq::Agent, url: &str, dest: &Path) -> Result<(), ureq::Error> {
    debug!("Downloading {url} to {}", dest.display());
    let response = agent.get(url).header("User-Agent", USER_AGENT).call()?;
    let mut file = File::create(dest)?;
    std::io::copy(&mut response.into_body().as_reader(), &mut file)?;
    Ok(())
}
