//! CLI Adapter.

mod catalog;
mod engine;
mod render;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::debug;

use crate::app::config::load_environment_file;
use crate::domain::{AppError, EnvironmentConfig};

#[derive(Parser)]
#[command(name = "open-desktop")]
#[command(version)]
#[command(
    about = "Compile and run a desktop environment inside a Docker container",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the Dockerfile and startup chain without building
    #[clap(visible_alias = "r")]
    Render {
        #[command(flatten)]
        source: ConfigSource,
        /// Write the Dockerfile to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the startup chain to this path
        #[arg(long)]
        startup_output: Option<PathBuf>,
        /// Print both artifacts as JSON
        #[arg(long, conflicts_with = "output")]
        json: bool,
    },
    /// Build the desktop image
    #[clap(visible_alias = "b")]
    Build {
        #[command(flatten)]
        source: ConfigSource,
        #[command(flatten)]
        build: engine::BuildArgs,
    },
    /// Build the desktop image and start a container
    #[clap(visible_alias = "up")]
    Run {
        #[command(flatten)]
        source: ConfigSource,
        #[command(flatten)]
        build: engine::BuildArgs,
        /// Publish a container port on the host, as HOST:CONTAINER or PORT (repeatable)
        #[arg(short = 'p', long = "publish", value_name = "HOST:CONTAINER")]
        publish: Vec<String>,
        /// Mount a host path, as HOST:BIND[:MODE] (repeatable)
        #[arg(long = "volume", value_name = "HOST:BIND[:MODE]")]
        volumes: Vec<String>,
    },
    /// List the built-in applications and startup services
    #[clap(visible_alias = "ls")]
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Where the environment definition comes from.
#[derive(clap::Args)]
struct ConfigSource {
    /// Environment definition file (defaults to ./desktop.toml or ./desktop.yml)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
    /// Override the image tag
    #[arg(short, long)]
    tag: Option<String>,
}

impl ConfigSource {
    fn load(&self) -> Result<EnvironmentConfig, AppError> {
        load_config(self.config.as_deref(), self.tag.clone())
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Render { source, output, startup_output, json } => {
            source.load().and_then(|config| {
                render::run_render(&config, output.as_deref(), startup_output.as_deref(), json)
            })
        }
        Commands::Build { source, build } => {
            source.load().and_then(|config| engine::run_build(config, build))
        }
        Commands::Run { source, build, publish, volumes } => {
            source.load().and_then(|config| engine::run_run(config, build, &publish, &volumes))
        }
        Commands::Catalog { json } => catalog::run_catalog(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.format_timestamp(None);
    if let Err(e) = builder.try_init() {
        eprintln!("unable to init logger: {}", e);
    }
}

/// Load the environment definition and apply command-line overrides.
fn load_config(path: Option<&Path>, tag: Option<String>) -> Result<EnvironmentConfig, AppError> {
    let mut file = load_environment_file(path)?;
    if let Some(tag) = tag {
        debug!("Overriding image tag with {}", tag);
        file.tag = Some(tag);
    }
    file.into_config()
}
