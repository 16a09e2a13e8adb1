use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use log::debug;

use crate::domain::AppError;
use crate::domain::environment::{PortMap, VolumeMap};
use crate::ports::{BuildInput, BuildRequest, ContainerEngine, ContainerHandle, ImageId};

/// Container engine backed by the `docker` CLI.
#[derive(Debug, Clone)]
pub struct DockerCommandAdapter {
    program: PathBuf,
}

impl Default for DockerCommandAdapter {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCommandAdapter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.program.display(), args.join(" "))
    }

    fn run(&self, args: &[String], stdin: Option<&[u8]>) -> Result<String, AppError> {
        let command_line = self.describe(args);
        debug!("running {}", command_line);

        let engine_error =
            |details: String| AppError::Engine { command: command_line.clone(), details };

        let mut command = Command::new(&self.program);
        command.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());

        let output: Output = match stdin {
            Some(bytes) => {
                command.stdin(Stdio::piped());
                let mut child = command.spawn().map_err(|e| engine_error(e.to_string()))?;
                if let Some(mut pipe) = child.stdin.take() {
                    // An engine that exits early closes the pipe; its stderr says why.
                    match pipe.write_all(bytes) {
                        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                            return Err(engine_error(e.to_string()));
                        }
                        _ => {}
                    }
                }
                child.wait_with_output().map_err(|e| engine_error(e.to_string()))?
            }
            None => command.output().map_err(|e| engine_error(e.to_string()))?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(engine_error(if stderr.is_empty() {
                "Unknown error".to_string()
            } else {
                stderr
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl ContainerEngine for DockerCommandAdapter {
    fn build_image(&self, request: &BuildRequest) -> Result<ImageId, AppError> {
        let args = build_arguments(request);
        let stdin = match &request.input {
            BuildInput::InMemory(bytes) => Some(bytes.as_slice()),
            BuildInput::Dockerfile(_) => None,
        };
        let stdout = self.run(&args, stdin)?;
        // `--quiet` prints only the image id, but BuildKit may emit it last.
        let id = stdout.lines().last().unwrap_or_default().trim().to_string();
        if id.is_empty() {
            return Err(AppError::Engine {
                command: self.describe(&args),
                details: "build produced no image id".to_string(),
            });
        }
        Ok(ImageId(id))
    }

    fn run_container(
        &self,
        image: &ImageId,
        ports: &PortMap,
        volumes: &VolumeMap,
    ) -> Result<ContainerHandle, AppError> {
        let args = run_arguments(image, ports, volumes);
        let stdout = self.run(&args, None)?;
        Ok(ContainerHandle(stdout))
    }
}

/// Arguments for `docker build`.
pub fn build_arguments(request: &BuildRequest) -> Vec<String> {
    let mut args = vec!["build".to_string(), "--quiet".to_string(), "--tag".to_string()];
    args.push(request.tag.clone());
    for (key, value) in &request.build_args {
        args.push("--build-arg".to_string());
        args.push(format!("{}={}", key, value));
    }
    match &request.input {
        BuildInput::InMemory(_) => args.push("-".to_string()),
        BuildInput::Dockerfile(path) => {
            args.push("--file".to_string());
            args.push(path.display().to_string());
            let context =
                path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            args.push(context.display().to_string());
        }
    }
    args
}

/// Arguments for `docker run`.
pub fn run_arguments(image: &ImageId, ports: &PortMap, volumes: &VolumeMap) -> Vec<String> {
    let mut args = vec!["run".to_string(), "--detach".to_string()];
    for (container, host) in ports {
        args.push("--publish".to_string());
        args.push(format!("{}:{}", host, container));
    }
    for (host, binding) in volumes {
        args.push("--volume".to_string());
        args.push(format!("{}:{}:{}", host, binding.bind, binding.mode));
    }
    args.push(image.0.clone());
    args
}
