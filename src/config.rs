//! Project configuration: the validated answers a new project is built from,
//! and the flow that collects them from flags and prompts.

use log::debug;

use crate::error::{Error, Result};
use crate::license::{self, LicenseSource, NONE_KEY, NONE_NAME};
use crate::naming::{to_kebab, ProjectIdentity};
use crate::output::Output;
use crate::prompt::Prompter;
use crate::validation::{
    validate_author_name, validate_description, validate_email, validate_github_owner,
    validate_name,
};

const SKIP_LICENSE_LABEL: &str = "Skip (keep existing Apache-2.0)";

/// Everything the finalizer needs to know about the new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfiguration {
    pub identity: ProjectIdentity,
    pub author: String,
    pub email: String,
    pub description: String,
    /// GitHub license key, or `none` to keep the template's license
    pub license_key: String,
    pub enable_pypi: bool,
}

impl ProjectConfiguration {
    /// Builds a configuration from already validated values.
    pub fn new(
        name: &str,
        owner: &str,
        author: &str,
        email: &str,
        description: &str,
        license_key: &str,
        enable_pypi: bool,
    ) -> Self {
        Self {
            identity: ProjectIdentity::derive(name, owner),
            author: author.to_string(),
            email: email.to_string(),
            description: description.to_string(),
            license_key: license_key.to_string(),
            enable_pypi,
        }
    }

    /// SPDX identifier of the license the project ends up with.
    pub fn spdx_id(&self) -> String {
        license::effective_spdx(&self.license_key)
    }

    /// Whether a license other than the template's was chosen.
    pub fn has_custom_license(&self) -> bool {
        !self.license_key.eq_ignore_ascii_case(NONE_KEY)
    }
}

/// Values supplied on the command line; `None` means "ask".
#[derive(Debug, Clone, Default)]
pub struct ConfigInputs {
    pub name: Option<String>,
    pub author: Option<String>,
    pub email: Option<String>,
    pub github_owner: Option<String>,
    pub description: Option<String>,
    pub license_key: Option<String>,
    pub enable_pypi: bool,
}

impl ConfigInputs {
    /// True when any required field still has to be asked for.
    pub fn needs_prompts(&self) -> bool {
        [
            &self.name,
            &self.author,
            &self.email,
            &self.github_owner,
            &self.description,
        ]
        .iter()
        .any(|value| value.as_deref().map(str::trim).unwrap_or_default().is_empty())
    }
}

struct Field<'a> {
    label: &'static str,
    flag: &'static str,
    default: Option<&'a str>,
    validate: &'a dyn Fn(&str) -> Result<()>,
}

fn validate_package_name(value: &str) -> Result<()> {
    validate_name(&to_kebab(value))
}

fn required_field(
    value: Option<&str>,
    field: Field,
    prompter: Option<&dyn Prompter>,
    output: &Output,
) -> Result<String> {
    let supplied = value.map(str::trim).filter(|v| !v.is_empty());
    match (supplied, prompter) {
        (Some(value), None) => {
            (field.validate)(value)?;
            Ok(value.to_string())
        }
        (Some(value), Some(prompter)) => match (field.validate)(value) {
            Ok(()) => Ok(value.to_string()),
            Err(e) => {
                output.error(&e.to_string());
                prompter.text(field.label, Some(value), field.validate)
            }
        },
        (None, Some(prompter)) => prompter.text(field.label, field.default, field.validate),
        (None, None) => Err(Error::MissingField {
            label: field.label.to_string(),
            flag: field.flag.to_string(),
        }),
    }
}

fn choose_license(
    key: Option<&str>,
    prompter: Option<&dyn Prompter>,
    licenses: &dyn LicenseSource,
) -> Result<(String, String)> {
    if let Some(key) = key {
        if key.eq_ignore_ascii_case(NONE_KEY) {
            return Ok((NONE_KEY.to_string(), NONE_NAME.to_string()));
        }
        return license::resolve_license(key, &license::fetch_licenses(licenses));
    }

    let Some(prompter) = prompter else {
        return Ok((NONE_KEY.to_string(), NONE_NAME.to_string()));
    };

    let catalog = license::fetch_licenses(licenses);
    let mut items = vec![SKIP_LICENSE_LABEL.to_string()];
    items.extend(
        catalog
            .iter()
            .map(|record| format!("{} ({})", record.name, record.key)),
    );
    match prompter.select("License", &items, 0)? {
        0 => Ok((NONE_KEY.to_string(), NONE_NAME.to_string())),
        index => catalog
            .get(index - 1)
            .map(|record| (record.key.clone(), record.name.clone()))
            .ok_or_else(|| Error::ValidationError(format!("Invalid choice: {index}"))),
    }
}

fn print_summary(config: &ProjectConfiguration, license_name: &str, output: &Output) {
    let id = &config.identity;
    output.divider();
    output.field("Package", &id.kebab_name);
    output.field("Module", &id.snake_name);
    output.field("Title", &id.title_name);
    output.field("Author", &format!("{} <{}>", config.author, config.email));
    output.field("Repository", &id.repo_path);
    output.field("Description", &config.description);
    output.field("PyPI", if config.enable_pypi { "yes" } else { "no" });
    output.field("License", &format!("{license_name} ({})", config.spdx_id()));
    output.divider();
}

/// Builds the project configuration from flags, prompting for whatever is missing.
///
/// # Arguments
/// * `inputs` - Values from the command line
/// * `prompter` - `Some` in interactive mode
/// * `default_name` - Suggested package name for the name prompt
/// * `licenses` - Catalog used to resolve or offer license keys
/// * `output` - Progress writer for the summary
///
/// # Returns
/// * `Result<ProjectConfiguration>` - Fully validated configuration
///
/// # Errors
/// * `Error::MissingField` when a required field is absent in non-interactive mode
/// * `Error::ValidationError` when a supplied value is invalid in non-interactive mode
/// * `Error::UnknownLicense` for an unknown `--license` key
/// * `Error::Aborted` when the summary is not confirmed
pub fn collect_configuration(
    inputs: &ConfigInputs,
    prompter: Option<&dyn Prompter>,
    default_name: Option<&str>,
    licenses: &dyn LicenseSource,
    output: &Output,
) -> Result<ProjectConfiguration> {
    let name = required_field(
        inputs.name.as_deref(),
        Field {
            label: "Package name",
            flag: "--name",
            default: default_name,
            validate: &validate_package_name,
        },
        prompter,
        output,
    )?;
    let name = to_kebab(&name);

    let author = required_field(
        inputs.author.as_deref(),
        Field {
            label: "Author name",
            flag: "--author",
            default: None,
            validate: &validate_author_name,
        },
        prompter,
        output,
    )?;

    let email = required_field(
        inputs.email.as_deref(),
        Field {
            label: "Author email",
            flag: "--email",
            default: None,
            validate: &validate_email,
        },
        prompter,
        output,
    )?;

    let owner = required_field(
        inputs.github_owner.as_deref(),
        Field {
            label: "GitHub owner",
            flag: "--github-owner",
            default: None,
            validate: &validate_github_owner,
        },
        prompter,
        output,
    )?;

    let description = required_field(
        inputs.description.as_deref(),
        Field {
            label: "Short description",
            flag: "--description",
            default: None,
            validate: &validate_description,
        },
        prompter,
        output,
    )?;

    let enable_pypi = match prompter {
        _ if inputs.enable_pypi => true,
        Some(prompter) => prompter.confirm("Enable PyPI publishing?", false)?,
        None => false,
    };

    let (license_key, license_name) =
        choose_license(inputs.license_key.as_deref(), prompter, licenses)?;

    let config = ProjectConfiguration::new(
        &name,
        &owner,
        &author,
        &email,
        &description,
        &license_key,
        enable_pypi,
    );
    debug!("Collected configuration: {config:?}");

    print_summary(&config, &license_name, output);
    if let Some(prompter) = prompter {
        if !prompter.confirm("Proceed?", true)? {
            return Err(Error::Aborted);
        }
    }
    Ok(config)
}
