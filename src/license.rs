//! License catalog, SPDX mapping and license text retrieval.

use log::{debug, warn};
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::http;
use crate::settings::Settings;

/// Key meaning "keep the template's Apache-2.0 license".
pub const NONE_KEY: &str = "none";

/// Display name used for [`NONE_KEY`].
pub const NONE_NAME: &str = "Apache License 2.0 (unchanged)";

/// License the template ships with.
pub const TEMPLATE_SPDX: &str = "Apache-2.0";

const SPDX_MAP: [(&str, &str); 13] = [
    ("agpl-3.0", "AGPL-3.0-only"),
    ("apache-2.0", "Apache-2.0"),
    ("bsd-2-clause", "BSD-2-Clause"),
    ("bsd-3-clause", "BSD-3-Clause"),
    ("bsl-1.0", "BSL-1.0"),
    ("cc0-1.0", "CC0-1.0"),
    ("epl-2.0", "EPL-2.0"),
    ("gpl-2.0", "GPL-2.0-only"),
    ("gpl-3.0", "GPL-3.0-only"),
    ("lgpl-2.1", "LGPL-2.1-only"),
    ("mit", "MIT"),
    ("mpl-2.0", "MPL-2.0"),
    ("unlicense", "Unlicense"),
];

const CLASSIFIER_MAP: [(&str, &str); 13] = [
    ("MIT", "License :: OSI Approved :: MIT License"),
    ("Apache-2.0", "License :: OSI Approved :: Apache Software License"),
    ("BSD-2-Clause", "License :: OSI Approved :: BSD License"),
    ("BSD-3-Clause", "License :: OSI Approved :: BSD License"),
    (
        "GPL-2.0-only",
        "License :: OSI Approved :: GNU General Public License v2 (GPLv2)",
    ),
    (
        "GPL-3.0-only",
        "License :: OSI Approved :: GNU General Public License v3 (GPLv3)",
    ),
    (
        "LGPL-2.1-only",
        "License :: OSI Approved :: GNU Lesser General Public License v2 or later (LGPLv2+)",
    ),
    (
        "AGPL-3.0-only",
        "License :: OSI Approved :: GNU Affero General Public License v3",
    ),
    (
        "MPL-2.0",
        "License :: OSI Approved :: Mozilla Public License 2.0 (MPL 2.0)",
    ),
    ("Unlicense", "License :: OSI Approved :: The Unlicense (Unlicense)"),
    (
        "BSL-1.0",
        "License :: OSI Approved :: Boost Software License 1.0 (BSL-1.0)",
    ),
    (
        "CC0-1.0",
        "License :: CC0 1.0 Universal (CC0 1.0) Public Domain Dedication",
    ),
    (
        "EPL-2.0",
        "License :: OSI Approved :: Eclipse Public License 2.0 (EPL-2.0)",
    ),
];

const OFFLINE_LICENSES: [(&str, &str); 6] = [
    ("apache-2.0", "Apache License 2.0"),
    ("mit", "MIT License"),
    ("bsd-3-clause", "BSD 3-Clause \"New\" or \"Revised\" License"),
    ("gpl-3.0", "GNU General Public License v3.0"),
    ("mpl-2.0", "Mozilla Public License 2.0"),
    ("unlicense", "The Unlicense"),
];

const YEAR_PLACEHOLDERS: [&str; 3] = ["[year]", "[yyyy]", "<year>"];

const HOLDER_PLACEHOLDERS: [&str; 6] = [
    "[fullname]",
    "[name of copyright owner]",
    "[name of copyright holder]",
    "<name of copyright owner>",
    "<name of copyright holder>",
    "<copyright holders>",
];

/// One selectable license.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseRecord {
    pub key: String,
    pub name: String,
    pub spdx_id: String,
}

impl LicenseRecord {
    pub fn new(key: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            spdx_id: spdx_id_for_key(key),
        }
    }
}

/// Maps a GitHub license key to its SPDX identifier.
/// Unknown keys come back upper-cased.
pub fn spdx_id_for_key(key: &str) -> String {
    SPDX_MAP
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, spdx)| spdx.to_string())
        .unwrap_or_else(|| key.to_uppercase())
}

/// SPDX identifier that ends up in the generated project.
/// [`NONE_KEY`] keeps the template's own license.
pub fn effective_spdx(key: &str) -> String {
    if key.eq_ignore_ascii_case(NONE_KEY) {
        TEMPLATE_SPDX.to_string()
    } else {
        spdx_id_for_key(key)
    }
}

/// Trove classifier for an SPDX identifier, if there is one.
pub fn classifier_for_spdx(spdx_id: &str) -> Option<&'static str> {
    CLASSIFIER_MAP
        .iter()
        .find(|(id, _)| *id == spdx_id)
        .map(|(_, classifier)| *classifier)
}

/// The built-in catalog used when GitHub cannot be reached.
pub fn offline_licenses() -> Vec<LicenseRecord> {
    OFFLINE_LICENSES
        .iter()
        .map(|(key, name)| LicenseRecord::new(key, name))
        .collect()
}

/// Where license metadata and texts come from.
pub trait LicenseSource {
    /// Lists every available license.
    fn catalog(&self) -> Result<Vec<LicenseRecord>>;

    /// Returns the raw text of one license, placeholders included.
    fn body(&self, key: &str) -> Result<String>;
}

#[derive(Deserialize)]
struct CatalogEntry {
    key: String,
    name: String,
}

#[derive(Deserialize)]
struct LicenseDetail {
    #[serde(default)]
    body: String,
}

/// GitHub's `/licenses` API.
pub struct GitHubLicenses {
    agent: ureq::Agent,
    base: Url,
}

impl GitHubLicenses {
    pub fn new(settings: &Settings) -> Self {
        Self {
            agent: http::agent(settings.metadata_timeout),
            base: settings.license_api.clone(),
        }
    }

    fn get(&self, url: &str) -> Result<String> {
        http::get_json_text(&self.agent, url).map_err(|e| match e {
            ureq::Error::StatusCode(code) => Error::ApiError(format!("HTTP {code} for {url}")),
            other => Error::NetworkError(other.to_string()),
        })
    }
}

impl LicenseSource for GitHubLicenses {
    fn catalog(&self) -> Result<Vec<LicenseRecord>> {
        let text = self.get(self.base.as_str())?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&text)?;
        Ok(entries
            .iter()
            .map(|entry| LicenseRecord::new(&entry.key, &entry.name))
            .collect())
    }

    fn body(&self, key: &str) -> Result<String> {
        let url = format!("{}/{}", self.base.as_str().trim_end_matches('/'), key);
        let detail: LicenseDetail = serde_json::from_str(&self.get(&url)?)?;
        Ok(detail.body)
    }
}

/// Remote catalog, or the offline catalog on any failure.
pub fn fetch_licenses(source: &dyn LicenseSource) -> Vec<LicenseRecord> {
    match source.catalog() {
        Ok(records) if !records.is_empty() => records,
        Ok(_) => offline_licenses(),
        Err(e) => {
            debug!("License catalog unavailable ({e}), using offline list");
            offline_licenses()
        }
    }
}

/// Resolves a user-supplied key against `catalog`, ignoring case.
///
/// # Returns
/// * `Result<(String, String)>` - Canonical key and display name
///
/// # Errors
/// * `Error::UnknownLicense` listing every available key
pub fn resolve_license(key: &str, catalog: &[LicenseRecord]) -> Result<(String, String)> {
    if key.eq_ignore_ascii_case(NONE_KEY) {
        return Ok((NONE_KEY.to_string(), NONE_NAME.to_string()));
    }
    catalog
        .iter()
        .find(|record| record.key.eq_ignore_ascii_case(key))
        .map(|record| (record.key.clone(), record.name.clone()))
        .ok_or_else(|| Error::UnknownLicense {
            key: key.to_string(),
            available: catalog
                .iter()
                .map(|record| record.key.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Substitutes the year and copyright-holder placeholders of a license text.
pub fn fill_placeholders(body: &str, author: &str, year: i32) -> String {
    let year = year.to_string();
    let with_year = YEAR_PLACEHOLDERS
        .iter()
        .fold(body.to_string(), |text, placeholder| text.replace(placeholder, &year));
    HOLDER_PLACEHOLDERS
        .iter()
        .fold(with_year, |text, placeholder| text.replace(placeholder, author))
}

/// Fetches a license text with its placeholders filled in.
/// Any failure yields `None`.
pub fn license_body(
    source: &dyn LicenseSource,
    key: &str,
    author: &str,
    year: i32,
) -> Option<String> {
    match source.body(key) {
        Ok(body) if body.trim().is_empty() => {
            warn!("GitHub returned an empty {key} license text");
            None
        }
        Ok(body) => Some(fill_placeholders(&body, author, year)),
        Err(e) => {
            warn!("Could not fetch the {key} license text: {e}");
            None
        }
    }
}
