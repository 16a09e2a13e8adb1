//! Render command implementation.

use std::io;
use std::path::Path;

use crate::domain::{AppError, EnvironmentConfig};

pub fn run_render(
    config: &EnvironmentConfig,
    output: Option<&Path>,
    startup_output: Option<&Path>,
    json: bool,
) -> Result<(), AppError> {
    let artifact = crate::render(config)?;

    if let Some(path) = startup_output {
        std::fs::write(path, &artifact.startup_chain)?;
        eprintln!("✅ Wrote startup chain to {}", path.display());
    }

    if json {
        let text = serde_json::to_string_pretty(&artifact).map_err(io::Error::from)?;
        println!("{}", text);
    } else if let Some(path) = output {
        std::fs::write(path, &artifact.build_spec)?;
        println!("✅ Wrote Dockerfile to {}", path.display());
    } else {
        print!("{}", artifact.build_spec);
    }
    Ok(())
}
