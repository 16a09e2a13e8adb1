//! Filesystem-backed environment loading.
//!
//! Pure parsing lives in `domain::environment::file`.

mod load_environment;

pub use load_environment::{
    DEFAULT_ENVIRONMENT_FILES, load_environment_file, resolve_environment_path,
};
