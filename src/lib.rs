//! open-desktop: compile a desktop-in-a-container configuration into a
//! Dockerfile and startup chain, then build and run it with Docker.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use adapters::MinijinjaTemplateRenderer;
use app::config::load_environment_file;

pub use adapters::DockerCommandAdapter;
pub use app::orchestrator::{BuildOptions, DesktopEnvironment};
pub use domain::catalog::CatalogListing;
pub use domain::environment::{EnvironmentConfig, EnvironmentConfigBuilder, PortMap, VolumeMap};
pub use domain::render::RenderedArtifact;
pub use domain::{AppError, DesktopApp, StartupService};
pub use ports::{ContainerEngine, ContainerHandle, ImageId};

/// Render a configuration into its Dockerfile and startup chain.
pub fn render(config: &EnvironmentConfig) -> Result<RenderedArtifact, AppError> {
    domain::render::ArtifactRenderer::new(MinijinjaTemplateRenderer::new()).render(config)
}

/// Load an environment definition file and validate it.
///
/// Without an explicit path, the first of `desktop.toml`, `desktop.yml` or
/// `desktop.yaml` in the current directory is used; with none present the
/// defaults apply.
pub fn load_environment(path: Option<&Path>) -> Result<EnvironmentConfig, AppError> {
    load_environment_file(path)?.into_config()
}

/// Build an image for `config` with the given engine.
pub fn build<E: ContainerEngine>(
    config: EnvironmentConfig,
    engine: E,
    options: BuildOptions,
) -> Result<ImageId, AppError> {
    DesktopEnvironment::new(config, engine).build_with(options)
}

/// Build an image for `config`, then start a container from it.
///
/// `ports` defaults to the configuration's port map; `volumes` to none.
pub fn run<E: ContainerEngine>(
    config: EnvironmentConfig,
    engine: E,
    options: BuildOptions,
    ports: Option<PortMap>,
    volumes: Option<VolumeMap>,
) -> Result<(ImageId, ContainerHandle), AppError> {
    let mut environment = DesktopEnvironment::new(config, engine);
    let image_id = environment.build_with(options)?;
    let handle = environment.run(ports, volumes)?;
    Ok((image_id, handle))
}

/// Built-in application and startup service catalogs.
pub fn catalog() -> CatalogListing {
    CatalogListing::builtin()
}
