//! Port and volume mappings handed to the container engine on `run`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Container port to host port.
pub type PortMap = BTreeMap<String, String>;

/// Host path to container binding.
pub type VolumeMap = BTreeMap<String, VolumeBinding>;

/// VNC, noVNC, and two ports reserved for desktop applications.
pub const DEFAULT_PORTS: [&str; 4] = ["5900", "6080", "8501", "8080"];

/// Every default port published 1:1.
pub fn default_ports() -> PortMap {
    DEFAULT_PORTS.iter().map(|port| (port.to_string(), port.to_string())).collect()
}

/// Where a host path is mounted inside the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeBinding {
    pub bind: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl VolumeBinding {
    pub fn new(bind: impl Into<String>, mode: impl Into<String>) -> Self {
        Self { bind: bind.into(), mode: mode.into() }
    }
}

fn default_mode() -> String {
    "rw".to_string()
}

/// Parse `HOST:CONTAINER` (docker's `-p` order) or a bare `PORT` published 1:1.
///
/// Returns `(container, host)`, the key order of [`PortMap`].
pub fn parse_port_spec(spec: &str) -> Result<(String, String), AppError> {
    let (host, container) = match spec.split_once(':') {
        Some((host, container)) => (host.trim(), container.trim()),
        None => (spec.trim(), spec.trim()),
    };
    if container.is_empty() || host.is_empty() {
        return Err(AppError::ParseError {
            what: "port mapping".into(),
            details: format!("'{}' is not HOST:CONTAINER", spec),
        });
    }
    Ok((container.to_string(), host.to_string()))
}

/// Parse `HOST:BIND[:MODE]`.
pub fn parse_volume_spec(spec: &str) -> Result<(String, VolumeBinding), AppError> {
    let parts: Vec<&str> = spec.split(':').collect();
    let invalid = || AppError::ParseError {
        what: "volume mapping".into(),
        details: format!("'{}' is not HOST:BIND[:MODE]", spec),
    };
    let (host, bind, mode) = match parts.as_slice() {
        [host, bind] => (*host, *bind, "rw"),
        [host, bind, mode] => (*host, *bind, *mode),
        _ => return Err(invalid()),
    };
    if host.is_empty() || bind.is_empty() || mode.is_empty() {
        return Err(invalid());
    }
    Ok((host.to_string(), VolumeBinding::new(bind, mode)))
}
