//! Desktop application catalog.

use serde::{Deserialize, Serialize};

/// An installable desktop application.
///
/// `install_command` is opaque shell text executed as a single `RUN` instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopApp {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub install_command: String,
}

impl DesktopApp {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        install_command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            install_command: install_command.into(),
        }
    }
}

/// Borrowed form of [`DesktopApp`] usable in a `static` table.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinApp {
    pub name: &'static str,
    pub description: &'static str,
    pub install_command: &'static str,
}

impl BuiltinApp {
    pub fn to_app(&self) -> DesktopApp {
        DesktopApp::new(self.name, self.description, self.install_command)
    }
}

/// Applications installed in every environment, in install order.
pub static DEFAULT_APPS: &[BuiltinApp] = &[
    BuiltinApp {
        name: "Firefox",
        description: "A free and open-source web browser developed by the Mozilla Foundation.",
        install_command: "sudo add-apt-repository ppa:mozillateam/ppa && sudo apt-get install -y --no-install-recommends firefox-esr",
    },
    BuiltinApp {
        name: "LibreOffice",
        description: "A free and open-source office suite.",
        install_command: "sudo apt-get install -y --no-install-recommends libreoffice",
    },
    BuiltinApp {
        name: "Gedit",
        description: "A free and open-source text editor.",
        install_command: "sudo apt-get install -y --no-install-recommends gedit",
    },
];

/// Owned copy of the default application catalog.
pub fn default_apps() -> Vec<DesktopApp> {
    DEFAULT_APPS.iter().map(BuiltinApp::to_app).collect()
}
