//! Environment definition file model and parser (`desktop.toml` / `desktop.yml`).

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::catalog::{DesktopApp, StartupService};
use crate::domain::environment::mapping::PortMap;
use crate::domain::environment::{EnvironmentConfig, RuntimeVersion};

/// Serialization format of an environment definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Yaml,
}

impl FileFormat {
    /// Pick a format from a file extension; anything that is not YAML is TOML.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("yml") | Some("yaml") => FileFormat::Yaml,
            _ => FileFormat::Toml,
        }
    }
}

/// On-disk environment definition. Every field is optional and falls back to
/// the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentFile {
    pub base_image: Option<String>,
    pub python_version: Option<RuntimeVersion>,
    pub display_width: Option<u32>,
    pub display_height: Option<u32>,
    pub display_num: Option<u32>,
    pub username: Option<String>,
    pub tag: Option<String>,
    #[serde(default)]
    pub apps: Vec<DesktopApp>,
    #[serde(default)]
    pub startup_scripts: Vec<StartupService>,
    #[serde(default)]
    pub additional_packages: Vec<String>,
    #[serde(default)]
    pub custom_commands: Vec<String>,
    #[serde(default)]
    pub ports: PortMap,
    pub verbose: Option<bool>,
}

impl EnvironmentFile {
    /// Convert into a validated configuration with catalogs merged.
    pub fn into_config(self) -> Result<EnvironmentConfig, AppError> {
        let mut builder = EnvironmentConfig::builder()
            .apps(self.apps)
            .startup_services(self.startup_scripts)
            .additional_packages(self.additional_packages)
            .custom_commands(self.custom_commands)
            .ports(self.ports);

        if let Some(image) = self.base_image {
            builder = builder.base_image(image);
        }
        if let Some(version) = self.python_version {
            builder = builder.python_version(version);
        }
        if let Some(width) = self.display_width {
            builder = builder.display_width(width);
        }
        if let Some(height) = self.display_height {
            builder = builder.display_height(height);
        }
        if let Some(num) = self.display_num {
            builder = builder.display_num(num);
        }
        if let Some(username) = self.username {
            builder = builder.username(username);
        }
        if let Some(tag) = self.tag {
            builder = builder.tag(tag);
        }
        if let Some(verbose) = self.verbose {
            builder = builder.verbose(verbose);
        }

        builder.build()
    }
}

/// Parse environment definition content without validating it.
///
/// `source` names the content in parse errors.
pub fn parse_environment_file(
    content: &str,
    format: FileFormat,
    source: &str,
) -> Result<EnvironmentFile, AppError> {
    let parse_error = |details: String| AppError::ParseError { what: source.to_string(), details };
    match format {
        FileFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        FileFormat::Yaml if content.trim().is_empty() => Ok(EnvironmentFile::default()),
        FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Parse and validate environment definition content.
pub fn parse_environment_content(
    content: &str,
    format: FileFormat,
) -> Result<EnvironmentConfig, AppError> {
    parse_environment_file(content, format, "environment file")?.into_config()
}
