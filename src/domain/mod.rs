pub mod catalog;
pub mod environment;
pub mod error;
pub mod identifiers;
pub mod render;

pub use catalog::{CatalogListing, DesktopApp, StartupService};
pub use environment::{
    BaseImage, EnvironmentConfig, EnvironmentConfigBuilder, EnvironmentFile, PortMap,
    RuntimeVersion, VolumeBinding, VolumeMap,
};
pub use error::AppError;
pub use identifiers::Username;
pub use render::{ArtifactRenderer, Phase, RenderedArtifact};
