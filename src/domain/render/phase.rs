//! Ordered sections of the generated Dockerfile.

use std::fmt;

/// One section of the generated Dockerfile.
///
/// Later phases depend on state created by earlier ones (the user must exist
/// before files land in its home, scripts must exist before the entrypoint), so
/// `Phase::ALL` is the only order in which phases are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    BaseImage,
    SystemPackages,
    Applications,
    AdditionalPackages,
    Housekeeping,
    DesktopBridge,
    UserSetup,
    StartupServices,
    Runtime,
    CustomCommands,
    RuntimeParameters,
    Entrypoint,
}

impl Phase {
    pub const ALL: [Phase; 12] = [
        Phase::BaseImage,
        Phase::SystemPackages,
        Phase::Applications,
        Phase::AdditionalPackages,
        Phase::Housekeeping,
        Phase::DesktopBridge,
        Phase::UserSetup,
        Phase::StartupServices,
        Phase::Runtime,
        Phase::CustomCommands,
        Phase::RuntimeParameters,
        Phase::Entrypoint,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Phase::BaseImage => "base-image",
            Phase::SystemPackages => "system-packages",
            Phase::Applications => "applications",
            Phase::AdditionalPackages => "additional-packages",
            Phase::Housekeeping => "housekeeping",
            Phase::DesktopBridge => "desktop-bridge",
            Phase::UserSetup => "user-setup",
            Phase::StartupServices => "startup-services",
            Phase::Runtime => "runtime",
            Phase::CustomCommands => "custom-commands",
            Phase::RuntimeParameters => "runtime-parameters",
            Phase::Entrypoint => "entrypoint",
        }
    }

    /// Phases emitted only when their backing list is non-empty.
    pub fn is_conditional(&self) -> bool {
        matches!(self, Phase::Applications | Phase::AdditionalPackages | Phase::CustomCommands)
    }

    /// Comment line that opens the phase in the rendered Dockerfile.
    pub fn marker(&self) -> String {
        format!("# phase: {}", self.name())
    }

    /// Embedded template source and the name used in render errors.
    pub(crate) fn template(&self) -> (&'static str, &'static str) {
        match self {
            Phase::BaseImage => ("dockerfile/base_image.j2", templates::BASE_IMAGE),
            Phase::SystemPackages => ("dockerfile/system_packages.j2", templates::SYSTEM_PACKAGES),
            Phase::Applications => ("dockerfile/application.j2", templates::APPLICATION),
            Phase::AdditionalPackages => {
                ("dockerfile/additional_packages.j2", templates::ADDITIONAL_PACKAGES)
            }
            Phase::Housekeeping => ("dockerfile/housekeeping.j2", templates::HOUSEKEEPING),
            Phase::DesktopBridge => ("dockerfile/desktop_bridge.j2", templates::DESKTOP_BRIDGE),
            Phase::UserSetup => ("dockerfile/user_setup.j2", templates::USER_SETUP),
            Phase::StartupServices => ("dockerfile/startup_service.j2", templates::STARTUP_SERVICE),
            Phase::Runtime => ("dockerfile/runtime.j2", templates::RUNTIME),
            Phase::CustomCommands => ("dockerfile/custom_command.j2", templates::CUSTOM_COMMAND),
            Phase::RuntimeParameters => {
                ("dockerfile/runtime_parameters.j2", templates::RUNTIME_PARAMETERS)
            }
            Phase::Entrypoint => ("dockerfile/entrypoint.j2", templates::ENTRYPOINT),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) mod templates {
    pub static BASE_IMAGE: &str = include_str!("../../assets/dockerfile/base_image.j2");
    pub static SYSTEM_PACKAGES: &str = include_str!("../../assets/dockerfile/system_packages.j2");
    pub static APPLICATION: &str = include_str!("../../assets/dockerfile/application.j2");
    pub static ADDITIONAL_PACKAGES: &str =
        include_str!("../../assets/dockerfile/additional_packages.j2");
    pub static HOUSEKEEPING: &str = include_str!("../../assets/dockerfile/housekeeping.j2");
    pub static DESKTOP_BRIDGE: &str = include_str!("../../assets/dockerfile/desktop_bridge.j2");
    pub static USER_SETUP: &str = include_str!("../../assets/dockerfile/user_setup.j2");
    pub static STARTUP_DRIVER: &str = include_str!("../../assets/dockerfile/startup_driver.j2");
    pub static STARTUP_SERVICE: &str = include_str!("../../assets/dockerfile/startup_service.j2");
    pub static STARTUP_FINALIZE: &str = include_str!("../../assets/dockerfile/startup_finalize.j2");
    pub static RUNTIME: &str = include_str!("../../assets/dockerfile/runtime.j2");
    pub static CUSTOM_COMMAND: &str = include_str!("../../assets/dockerfile/custom_command.j2");
    pub static RUNTIME_PARAMETERS: &str =
        include_str!("../../assets/dockerfile/runtime_parameters.j2");
    pub static ENTRYPOINT: &str = include_str!("../../assets/dockerfile/entrypoint.j2");
}
