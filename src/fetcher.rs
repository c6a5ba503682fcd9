//! Template release lookup and download.

use std::path::Path;

use log::debug;
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::http;
use crate::settings::Settings;

/// Where template releases come from.
pub trait ReleaseSource {
    /// Tag of the newest published release.
    ///
    /// # Errors
    /// * `Error::RateLimited` on HTTP 403
    /// * `Error::ApiError` on any other HTTP failure
    /// * `Error::NetworkError` when GitHub cannot be reached
    fn latest_tag(&self) -> Result<String>;

    /// Downloads the archive of `tag` to `dest`.
    ///
    /// # Errors
    /// * `Error::DownloadError` on any failure
    fn download(&self, tag: &str, dest: &Path) -> Result<()>;
}

#[derive(Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Builds `{archive_base}/{owner}/{repo}/archive/refs/tags/{tag}.tar.gz`.
pub fn tarball_url(archive_base: &Url, owner: &str, repo: &str, tag: &str) -> Result<Url> {
    let mut url = archive_base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::DownloadError(format!("invalid archive base {archive_base}")))?
        .pop_if_empty()
        .extend([owner, repo, "archive", "refs", "tags", &format!("{tag}.tar.gz")]);
    Ok(url)
}

/// Builds `{api_base}/repos/{owner}/{repo}/releases/latest`.
pub fn latest_release_url(api_base: &Url, owner: &str, repo: &str) -> Result<Url> {
    let mut url = api_base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::ApiError(format!("invalid API base {api_base}")))?
        .pop_if_empty()
        .extend(["repos", owner, repo, "releases", "latest"]);
    Ok(url)
}

fn map_lookup_error(err: ureq::Error) -> Error {
    match err {
        ureq::Error::StatusCode(403) => Error::RateLimited,
        ureq::Error::StatusCode(code) => Error::ApiError(format!("HTTP {code}")),
        other => Error::NetworkError(other.to_string()),
    }
}

/// Releases of the template repository on GitHub.
pub struct GitHubReleases {
    metadata: ureq::Agent,
    download: ureq::Agent,
    api_base: Url,
    archive_base: Url,
    owner: String,
    repo: String,
}

impl GitHubReleases {
    pub fn new(settings: &Settings) -> Self {
        Self {
            metadata: http::agent(settings.metadata_timeout),
            download: http::agent(settings.download_timeout),
            api_base: settings.api_base.clone(),
            archive_base: settings.archive_base.clone(),
            owner: settings.template_owner.clone(),
            repo: settings.template_repo.clone(),
        }
    }
}

impl ReleaseSource for GitHubReleases {
    fn latest_tag(&self) -> Result<String> {
        let url = latest_release_url(&self.api_base, &self.owner, &self.repo)?;
        let body = http::get_json_text(&self.metadata, url.as_str()).map_err(map_lookup_error)?;
        let release: LatestRelease = serde_json::from_str(&body)
            .map_err(|e| Error::ApiError(format!("unexpected release payload: {e}")))?;
        debug!("Latest template release is {}", release.tag_name);
        Ok(release.tag_name)
    }

    fn download(&self, tag: &str, dest: &Path) -> Result<()> {
        let url = tarball_url(&self.archive_base, &self.owner, &self.repo, tag)?;
        http::download_to_file(&self.download, url.as_str(), dest)
            .map_err(|e| Error::DownloadError(e.to_string()))
    }
}

/// The pinned tag when given, the latest release otherwise.
pub fn resolve_tag(source: &dyn ReleaseSource, pinned: Option<&str>) -> Result<String> {
    match pinned {
        Some(tag) => Ok(tag.to_string()),
        None => source.latest_tag(),
    }
}
