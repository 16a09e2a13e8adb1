//! Container engine port definition.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::domain::AppError;
use crate::domain::environment::{PortMap, VolumeMap};

/// Opaque image identifier returned by a build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(pub String);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque handle to a started container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerHandle(pub String);

impl fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the Dockerfile comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildInput {
    /// Dockerfile bytes streamed to the engine; no build context on disk.
    InMemory(Vec<u8>),
    /// Existing Dockerfile; its parent directory is the build context.
    Dockerfile(PathBuf),
}

/// A single image build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub input: BuildInput,
    pub tag: String,
    pub build_args: BTreeMap<String, String>,
}

/// Trait for building images and starting containers.
///
/// Implementations report failures as [`AppError::Engine`] with the engine's
/// own message and never retry.
pub trait ContainerEngine {
    /// Build an image and return its identifier.
    fn build_image(&self, request: &BuildRequest) -> Result<ImageId, AppError>;

    /// Start a detached container from `image`.
    fn run_container(
        &self,
        image: &ImageId,
        ports: &PortMap,
        volumes: &VolumeMap,
    ) -> Result<ContainerHandle, AppError>;
}

impl<E: ContainerEngine + ?Sized> ContainerEngine for &E {
    fn build_image(&self, request: &BuildRequest) -> Result<ImageId, AppError> {
        (**self).build_image(request)
    }

    fn run_container(
        &self,
        image: &ImageId,
        ports: &PortMap,
        volumes: &VolumeMap,
    ) -> Result<ContainerHandle, AppError> {
        (**self).run_container(image, ports, volumes)
    }
}
