//! Build and run commands.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;

use crate::adapters::DockerCommandAdapter;
use crate::app::orchestrator::BuildOptions;
use crate::domain::environment::mapping::{parse_port_spec, parse_volume_spec};
use crate::domain::{AppError, EnvironmentConfig, PortMap, VolumeMap};

#[derive(Args)]
pub struct BuildArgs {
    /// Build from this Dockerfile instead of the rendered one
    #[arg(long)]
    dockerfile: Option<PathBuf>,
    /// Pass a build argument, as KEY=VALUE (repeatable)
    #[arg(long = "build-arg", value_name = "KEY=VALUE")]
    build_args: Vec<String>,
    /// Docker executable
    #[arg(long, default_value = "docker")]
    docker: PathBuf,
}

impl BuildArgs {
    fn options(&self) -> Result<BuildOptions, AppError> {
        Ok(BuildOptions {
            dockerfile: self.dockerfile.clone(),
            build_args: parse_build_args(&self.build_args)?,
        })
    }
}

pub fn run_build(config: EnvironmentConfig, args: BuildArgs) -> Result<(), AppError> {
    let options = args.options()?;
    let tag = config.tag().to_string();

    let image_id = crate::build(config, DockerCommandAdapter::new(args.docker), options)?;
    println!("✅ Built {} ({})", tag, image_id);
    Ok(())
}

pub fn run_run(
    config: EnvironmentConfig,
    args: BuildArgs,
    publish: &[String],
    volumes: &[String],
) -> Result<(), AppError> {
    let options = args.options()?;
    let ports = overlay_ports(config.ports(), publish)?;
    let volumes = parse_volumes(volumes)?;

    let (image_id, handle) = crate::run(
        config,
        DockerCommandAdapter::new(args.docker),
        options,
        Some(ports.clone()),
        Some(volumes),
    )?;

    println!("✅ Started container {} from {}", handle, image_id);
    if let Some(host) = ports.get("6080") {
        println!("  noVNC: http://localhost:{}/vnc.html", host);
    }
    if let Some(host) = ports.get("5900") {
        println!("  VNC:   localhost:{}", host);
    }
    Ok(())
}

fn parse_build_args(raw: &[String]) -> Result<BTreeMap<String, String>, AppError> {
    raw.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(AppError::ParseError {
                what: "build argument".into(),
                details: format!("'{}' is not KEY=VALUE", arg),
            }),
        })
        .collect()
}

/// Configured ports with each `--publish` mapping laid over them.
fn overlay_ports(configured: &PortMap, raw: &[String]) -> Result<PortMap, AppError> {
    let mut ports = configured.clone();
    for spec in raw {
        let (container, host) = parse_port_spec(spec)?;
        ports.insert(container, host);
    }
    Ok(ports)
}

fn parse_volumes(raw: &[String]) -> Result<VolumeMap, AppError> {
    raw.iter().map(|spec| parse_volume_spec(spec)).collect()
}
