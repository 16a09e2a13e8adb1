//! Environment definition loading from disk.

use std::path::{Path, PathBuf};

use log::debug;

use crate::domain::AppError;
use crate::domain::environment::{EnvironmentFile, FileFormat, parse_environment_file};

/// File names tried in the working directory when no path is given.
pub const DEFAULT_ENVIRONMENT_FILES: [&str; 3] = ["desktop.toml", "desktop.yml", "desktop.yaml"];

/// Pick the environment file: an explicit path must exist; otherwise the first
/// default file present in `dir`, if any.
pub fn resolve_environment_path(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<Option<PathBuf>, AppError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(AppError::config_error(format!(
                "Environment file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }
    Ok(DEFAULT_ENVIRONMENT_FILES.iter().map(|name| dir.join(name)).find(|path| path.is_file()))
}

/// Load the environment definition, falling back to built-in defaults when no
/// file is found.
pub fn load_environment_file(explicit: Option<&Path>) -> Result<EnvironmentFile, AppError> {
    let cwd = std::env::current_dir()?;
    let Some(path) = resolve_environment_path(explicit, &cwd)? else {
        debug!("no environment file found in {}, using defaults", cwd.display());
        return Ok(EnvironmentFile::default());
    };

    debug!("loading environment from {}", path.display());
    let content = std::fs::read_to_string(&path)?;
    let format = FileFormat::from_extension(path.extension().and_then(|ext| ext.to_str()));
    parse_environment_file(&content, format, &path.display().to_string())
}
