//! Environment configuration and its merge rules.

use crate::domain::catalog::{DesktopApp, StartupService, default_apps, default_startup_services};
use crate::domain::environment::mapping::{PortMap, default_ports};
use crate::domain::environment::{BaseImage, RuntimeVersion};
use crate::domain::identifiers::Username;
use crate::domain::AppError;

pub const DEFAULT_TAG: &str = "open-desktop-env";
pub const DEFAULT_DISPLAY_WIDTH: u32 = 1024;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 768;
pub const DEFAULT_DISPLAY_NUM: u32 = 1;

/// Immutable description of one desktop-container build request.
///
/// Built only through [`EnvironmentConfigBuilder`], which merges the default
/// catalogs ahead of caller-supplied entries. Names are never de-duplicated:
/// an app re-declared under a default's name installs twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    base_image: BaseImage,
    python_version: RuntimeVersion,
    display_width: u32,
    display_height: u32,
    display_num: u32,
    username: Username,
    tag: String,
    apps: Vec<DesktopApp>,
    startup_services: Vec<StartupService>,
    additional_packages: Vec<String>,
    custom_commands: Vec<String>,
    ports: PortMap,
    verbose: bool,
}

impl EnvironmentConfig {
    pub fn builder() -> EnvironmentConfigBuilder {
        EnvironmentConfigBuilder::default()
    }

    pub fn base_image(&self) -> BaseImage {
        self.base_image
    }

    pub fn python_version(&self) -> RuntimeVersion {
        self.python_version
    }

    pub fn display_width(&self) -> u32 {
        self.display_width
    }

    pub fn display_height(&self) -> u32 {
        self.display_height
    }

    pub fn display_num(&self) -> u32 {
        self.display_num
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Default apps followed by caller apps.
    pub fn apps(&self) -> &[DesktopApp] {
        &self.apps
    }

    /// Default services followed by caller services.
    pub fn startup_services(&self) -> &[StartupService] {
        &self.startup_services
    }

    pub fn additional_packages(&self) -> &[String] {
        &self.additional_packages
    }

    pub fn custom_commands(&self) -> &[String] {
        &self.custom_commands
    }

    /// Default ports overlaid with caller mappings.
    pub fn ports(&self) -> &PortMap {
        &self.ports
    }

    /// Whether the rendered Dockerfile is logged at `info` before a build.
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            base_image: BaseImage::default(),
            python_version: RuntimeVersion::default(),
            display_width: DEFAULT_DISPLAY_WIDTH,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            display_num: DEFAULT_DISPLAY_NUM,
            username: Username::default(),
            tag: DEFAULT_TAG.to_string(),
            apps: default_apps(),
            startup_services: default_startup_services(),
            additional_packages: Vec::new(),
            custom_commands: Vec::new(),
            ports: default_ports(),
            verbose: true,
        }
    }
}

/// Collects caller overrides; validation happens in [`EnvironmentConfigBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct EnvironmentConfigBuilder {
    base_image: Option<String>,
    python_version: Option<RuntimeVersion>,
    display_width: Option<u32>,
    display_height: Option<u32>,
    display_num: Option<u32>,
    username: Option<String>,
    tag: Option<String>,
    apps: Vec<DesktopApp>,
    startup_services: Vec<StartupService>,
    additional_packages: Vec<String>,
    custom_commands: Vec<String>,
    ports: PortMap,
    verbose: Option<bool>,
}

impl EnvironmentConfigBuilder {
    pub fn base_image(mut self, image: impl Into<String>) -> Self {
        self.base_image = Some(image.into());
        self
    }

    pub fn python_version(mut self, version: RuntimeVersion) -> Self {
        self.python_version = Some(version);
        self
    }

    pub fn display(mut self, width: u32, height: u32) -> Self {
        self.display_width = Some(width);
        self.display_height = Some(height);
        self
    }

    pub fn display_width(mut self, width: u32) -> Self {
        self.display_width = Some(width);
        self
    }

    pub fn display_height(mut self, height: u32) -> Self {
        self.display_height = Some(height);
        self
    }

    pub fn display_num(mut self, num: u32) -> Self {
        self.display_num = Some(num);
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn app(mut self, app: DesktopApp) -> Self {
        self.apps.push(app);
        self
    }

    pub fn apps(mut self, apps: impl IntoIterator<Item = DesktopApp>) -> Self {
        self.apps.extend(apps);
        self
    }

    pub fn startup_service(mut self, service: StartupService) -> Self {
        self.startup_services.push(service);
        self
    }

    pub fn startup_services(mut self, services: impl IntoIterator<Item = StartupService>) -> Self {
        self.startup_services.extend(services);
        self
    }

    pub fn additional_packages<S: Into<String>>(
        mut self,
        packages: impl IntoIterator<Item = S>,
    ) -> Self {
        self.additional_packages.extend(packages.into_iter().map(Into::into));
        self
    }

    pub fn custom_commands<S: Into<String>>(
        mut self,
        commands: impl IntoIterator<Item = S>,
    ) -> Self {
        self.custom_commands.extend(commands.into_iter().map(Into::into));
        self
    }

    /// Publish `container` on `host`; later calls for the same container port win.
    pub fn port(mut self, container: impl Into<String>, host: impl Into<String>) -> Self {
        self.ports.insert(container.into(), host.into());
        self
    }

    pub fn ports(mut self, ports: PortMap) -> Self {
        self.ports.extend(ports);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Validate scalars and merge catalogs.
    pub fn build(self) -> Result<EnvironmentConfig, AppError> {
        let defaults = EnvironmentConfig::default();

        let base_image = match self.base_image {
            Some(raw) => raw.parse()?,
            None => defaults.base_image,
        };
        let username = match self.username {
            Some(raw) if raw.is_empty() => {
                return Err(AppError::config_error("username must not be empty"));
            }
            Some(raw) => Username::new(&raw)?,
            None => defaults.username,
        };
        let tag = match self.tag {
            Some(raw) if raw.trim().is_empty() => {
                return Err(AppError::config_error("tag must not be empty"));
            }
            Some(raw) => raw,
            None => defaults.tag,
        };

        let display_width = positive("display_width", self.display_width, defaults.display_width)?;
        let display_height =
            positive("display_height", self.display_height, defaults.display_height)?;
        let display_num = positive("display_num", self.display_num, defaults.display_num)?;

        for app in &self.apps {
            if app.name.trim().is_empty() {
                return Err(AppError::config_error("app name must not be empty"));
            }
            if app.install_command.trim().is_empty() {
                return Err(AppError::config_error(format!(
                    "app '{}' has an empty install_command",
                    app.name
                )));
            }
        }

        let mut apps = defaults.apps;
        apps.extend(self.apps);

        let mut startup_services = defaults.startup_services;
        startup_services.extend(self.startup_services);

        let mut ports = defaults.ports;
        ports.extend(self.ports);

        Ok(EnvironmentConfig {
            base_image,
            python_version: self.python_version.unwrap_or(defaults.python_version),
            display_width,
            display_height,
            display_num,
            username,
            tag,
            apps,
            startup_services,
            additional_packages: self.additional_packages,
            custom_commands: self.custom_commands,
            ports,
            verbose: self.verbose.unwrap_or(defaults.verbose),
        })
    }
}

fn positive(field: &str, value: Option<u32>, default: u32) -> Result<u32, AppError> {
    match value {
        Some(0) => Err(AppError::config_error(format!("{} must be greater than 0", field))),
        Some(v) => Ok(v),
        None => Ok(default),
    }
}
