pub mod cli;
pub mod config;
pub mod orchestrator;

pub use orchestrator::{BuildOptions, DesktopEnvironment};
