use std::io;

use thiserror::Error;

/// Library-wide error type for open-desktop operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration value missing or invalid.
    #[error("{0}")]
    Configuration(String),

    /// Username is not a valid system username.
    #[error(
        "Invalid username '{0}': must start with a lowercase letter or underscore and contain only lowercase letters, digits, '-' or '_' (max 32 characters)"
    )]
    InvalidUsername(String),

    /// Base image is not one of the supported images.
    #[error("Unsupported base image '{name}'. Supported: {supported}")]
    UnsupportedBaseImage { name: String, supported: String },

    /// Runtime version is not a `major.minor.patch` triple.
    #[error("Invalid runtime version '{0}': expected MAJOR.MINOR.PATCH")]
    InvalidRuntimeVersion(String),

    /// Startup service descriptor cannot be rendered.
    #[error("Malformed startup service '{filename}': {reason}")]
    MalformedStartupService { filename: String, reason: String },

    /// Template rendering failed.
    #[error("Failed to render template {template}: {reason}")]
    TemplateRender { template: String, reason: String },

    /// Container engine invocation failed.
    #[error("Container engine error running '{command}': {details}")]
    Engine { command: String, details: String },

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Raised while constructing an environment configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            AppError::Configuration(_)
                | AppError::InvalidUsername(_)
                | AppError::UnsupportedBaseImage { .. }
                | AppError::InvalidRuntimeVersion(_)
                | AppError::ParseError { .. }
        )
    }

    /// Raised while rendering build artifacts.
    pub fn is_render_error(&self) -> bool {
        matches!(self, AppError::MalformedStartupService { .. } | AppError::TemplateRender { .. })
    }

    /// Raised by the container engine.
    pub fn is_engine_error(&self) -> bool {
        matches!(self, AppError::Engine { .. })
    }

}
