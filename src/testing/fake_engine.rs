use std::sync::Mutex;

use crate::domain::AppError;
use crate::domain::environment::{PortMap, VolumeMap};
use crate::ports::{BuildRequest, ContainerEngine, ContainerHandle, ImageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Build(BuildRequest),
    Run { image: ImageId, ports: PortMap, volumes: VolumeMap },
}

/// In-memory engine that records every call.
#[derive(Default)]
pub struct FakeContainerEngine {
    pub calls: Mutex<Vec<EngineCall>>,
    pub build_error: Option<String>,
    pub run_error: Option<String>,
}

impl FakeContainerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_build(message: &str) -> Self {
        Self { build_error: Some(message.to_string()), ..Self::default() }
    }

    pub fn failing_run(message: &str) -> Self {
        Self { run_error: Some(message.to_string()), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn builds(&self) -> Vec<BuildRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::Build(request) => Some(request),
                EngineCall::Run { .. } => None,
            })
            .collect()
    }

    /// Handle returned by the most recent successful run.
    pub fn last_container(&self) -> Option<ContainerHandle> {
        let runs = self.calls().iter().filter(|c| matches!(c, EngineCall::Run { .. })).count();
        if runs == 0 || self.run_error.is_some() {
            return None;
        }
        Some(ContainerHandle(format!("container-{}", runs)))
    }
}

impl ContainerEngine for FakeContainerEngine {
    fn build_image(&self, request: &BuildRequest) -> Result<ImageId, AppError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(EngineCall::Build(request.clone()));
        if let Some(details) = &self.build_error {
            return Err(AppError::Engine {
                command: "docker build".into(),
                details: details.clone(),
            });
        }
        let builds = calls.iter().filter(|c| matches!(c, EngineCall::Build(_))).count();
        Ok(ImageId(format!("sha256:fake{}", builds)))
    }

    fn run_container(
        &self,
        image: &ImageId,
        ports: &PortMap,
        volumes: &VolumeMap,
    ) -> Result<ContainerHandle, AppError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(EngineCall::Run {
            image: image.clone(),
            ports: ports.clone(),
            volumes: volumes.clone(),
        });
        if let Some(details) = &self.run_error {
            return Err(AppError::Engine { command: "docker run".into(), details: details.clone() });
        }
        let runs = calls.iter().filter(|c| matches!(c, EngineCall::Run { .. })).count();
        Ok(ContainerHandle(format!("container-{}", runs)))
    }
}
