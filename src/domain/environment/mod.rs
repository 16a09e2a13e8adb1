//! Environment configuration: scalars, catalogs, and run mappings.

pub mod base_image;
pub mod config;
pub mod file;
pub mod mapping;
pub mod runtime_version;

pub use base_image::BaseImage;
pub use config::{EnvironmentConfig, EnvironmentConfigBuilder};
pub use file::{EnvironmentFile, FileFormat, parse_environment_content, parse_environment_file};
pub use mapping::{PortMap, VolumeBinding, VolumeMap, default_ports};
pub use runtime_version::RuntimeVersion;
