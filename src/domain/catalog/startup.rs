//! Startup service catalog.
//!
//! Each built-in script follows a start-and-verify pattern: launch a background
//! process, poll for a readiness signal with a bounded timeout, and exit non-zero
//! with the captured stderr on timeout. The noVNC bridge is the exception and
//! never fails the chain.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::identifiers::validation::validate_file_name;

/// A shell script materialized under `$HOME` and invoked from the startup driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupService {
    /// File name under the user's home directory.
    pub filename: String,
    /// Shell script body.
    pub script: String,
}

impl StartupService {
    pub fn new(filename: impl Into<String>, script: impl Into<String>) -> Self {
        Self { filename: filename.into(), script: script.into() }
    }

    /// Check that the descriptor can be materialized as `$HOME/<filename>`.
    pub fn validate(&self) -> Result<(), AppError> {
        if !validate_file_name(&self.filename) {
            let reason = if self.filename.is_empty() {
                "filename is empty".to_string()
            } else {
                "filename must be a single path segment of [A-Za-z0-9._-]".to_string()
            };
            return Err(AppError::MalformedStartupService {
                filename: self.filename.clone(),
                reason,
            });
        }
        if self.script.trim().is_empty() {
            return Err(AppError::MalformedStartupService {
                filename: self.filename.clone(),
                reason: "script is empty".to_string(),
            });
        }
        // The script is written through a heredoc terminated by this line.
        if self.script.lines().any(|line| line.trim_end() == HEREDOC_DELIMITER) {
            return Err(AppError::MalformedStartupService {
                filename: self.filename.clone(),
                reason: format!(
                    "script must not contain a line consisting of '{}'",
                    HEREDOC_DELIMITER
                ),
            });
        }
        Ok(())
    }
}

/// Terminator of the heredoc that writes each script into the image.
pub const HEREDOC_DELIMITER: &str = "EOF";

#[derive(Debug, Clone, Copy)]
pub struct BuiltinStartupService {
    pub filename: &'static str,
    pub script: &'static str,
}

impl BuiltinStartupService {
    pub fn to_service(&self) -> StartupService {
        StartupService::new(self.filename, self.script)
    }
}

/// Services that bring the desktop up, in start order.
pub static DEFAULT_STARTUP_SERVICES: &[BuiltinStartupService] = &[
    BuiltinStartupService {
        filename: "xvfb_startup.sh",
        script: include_str!("../../assets/startup/xvfb_startup.sh"),
    },
    BuiltinStartupService {
        filename: "x11vnc_startup.sh",
        script: include_str!("../../assets/startup/x11vnc_startup.sh"),
    },
    BuiltinStartupService {
        filename: "mutter_startup.sh",
        script: include_str!("../../assets/startup/mutter_startup.sh"),
    },
    BuiltinStartupService {
        filename: "tint2_startup.sh",
        script: include_str!("../../assets/startup/tint2_startup.sh"),
    },
    BuiltinStartupService {
        filename: "novnc_startup.sh",
        script: include_str!("../../assets/startup/novnc_startup.sh"),
    },
];

/// Owned copy of the default startup catalog.
pub fn default_startup_services() -> Vec<StartupService> {
    DEFAULT_STARTUP_SERVICES.iter().map(BuiltinStartupService::to_service).collect()
}
