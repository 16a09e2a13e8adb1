//! Build orchestration: render, build once, run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{debug, info};

use crate::adapters::template::MinijinjaTemplateRenderer;
use crate::domain::AppError;
use crate::domain::environment::{EnvironmentConfig, PortMap, VolumeMap};
use crate::domain::render::{ArtifactRenderer, RenderedArtifact};
use crate::ports::{BuildInput, BuildRequest, ContainerEngine, ContainerHandle, ImageId};

/// Options for an explicit build.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Use this Dockerfile instead of rendering the configuration.
    pub dockerfile: Option<PathBuf>,
    /// `--build-arg` values, e.g. to override `WIDTH`/`HEIGHT`.
    pub build_args: BTreeMap<String, String>,
}

/// A desktop environment bound to a container engine.
///
/// Holds the configuration and the image id of the last successful build; a
/// `run` without a prior build triggers exactly one build.
pub struct DesktopEnvironment<E: ContainerEngine> {
    config: EnvironmentConfig,
    engine: E,
    image_id: Option<ImageId>,
}

impl<E: ContainerEngine> DesktopEnvironment<E> {
    pub fn new(config: EnvironmentConfig, engine: E) -> Self {
        Self { config, engine, image_id: None }
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Image id of the last successful build.
    pub fn image_id(&self) -> Option<&ImageId> {
        self.image_id.as_ref()
    }

    /// Render the configuration without building.
    pub fn render(&self) -> Result<RenderedArtifact, AppError> {
        ArtifactRenderer::new(MinijinjaTemplateRenderer::new()).render(&self.config)
    }

    /// Build from the rendered configuration.
    pub fn build(&mut self) -> Result<ImageId, AppError> {
        self.build_with(BuildOptions::default())
    }

    pub fn build_with(&mut self, options: BuildOptions) -> Result<ImageId, AppError> {
        let input = match options.dockerfile {
            Some(path) => {
                info!("Building {} from {}", self.config.tag(), path.display());
                BuildInput::Dockerfile(path)
            }
            None => {
                let artifact = self.render()?;
                if self.config.verbose() {
                    info!("Rendered Dockerfile:\n{}", artifact.build_spec);
                } else {
                    debug!("Rendered Dockerfile:\n{}", artifact.build_spec);
                }
                info!("Building {} from rendered Dockerfile", self.config.tag());
                BuildInput::InMemory(artifact.build_spec.into_bytes())
            }
        };

        let request =
            BuildRequest {
                input,
                tag: self.config.tag().to_string(),
                build_args: options.build_args,
            };
        let image_id = self.engine.build_image(&request)?;
        info!("Built image {}", image_id);

        self.image_id = Some(image_id.clone());
        Ok(image_id)
    }

    /// Start a container, building first if nothing has been built yet.
    ///
    /// `ports` defaults to the configuration's port map; `volumes` to none.
    pub fn run(
        &mut self,
        ports: Option<PortMap>,
        volumes: Option<VolumeMap>,
    ) -> Result<ContainerHandle, AppError> {
        let image_id = match &self.image_id {
            Some(id) => id.clone(),
            None => self.build()?,
        };
        let ports = ports.unwrap_or_else(|| self.config.ports().clone());
        let volumes = volumes.unwrap_or_default();

        let handle = self.engine.run_container(&image_id, &ports, &volumes)?;
        info!("Started container {} from {}", handle, image_id);
        Ok(handle)
    }
}
