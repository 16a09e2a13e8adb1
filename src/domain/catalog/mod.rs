//! Built-in catalogs of desktop applications and startup services.

pub mod apps;
pub mod startup;

use serde::Serialize;

pub use apps::{DEFAULT_APPS, DesktopApp, default_apps};
pub use startup::{DEFAULT_STARTUP_SERVICES, StartupService, default_startup_services};

/// Summary of the built-in catalogs, in install and start order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogListing {
    pub apps: Vec<DesktopApp>,
    pub startup_services: Vec<String>,
}

impl CatalogListing {
    pub fn builtin() -> Self {
        Self {
            apps: default_apps(),
            startup_services: DEFAULT_STARTUP_SERVICES
                .iter()
                .map(|service| service.filename.to_string())
                .collect(),
        }
    }
}
