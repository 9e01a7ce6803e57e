//! Model artifact and schema path resolution.

use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable for overriding the model artifact location.
pub const MODEL_PATH_ENV_VAR: &str = "MODEL_PATH";

/// Environment variable for overriding the column schema file.
pub const SCHEMA_ENV_VAR: &str = "SALARY_SCHEMA_PATH";

/// Model artifact location used when nothing else is configured.
pub const DEFAULT_MODEL_PATH: &str = "models/reg_model.json";

/// Where a resolved model path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Passed explicitly by the caller (e.g. `--model`).
    Explicit,
    /// Read from `MODEL_PATH`.
    Environment,
    /// Fell back to [`DEFAULT_MODEL_PATH`].
    Default,
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit => f.write_str("command line"),
            Self::Environment => write!(f, "{MODEL_PATH_ENV_VAR} environment variable"),
            Self::Default => f.write_str("default location"),
        }
    }
}

/// Resolve the model artifact path.
///
/// Resolution order:
/// 1. `explicit` argument
/// 2. `MODEL_PATH` environment variable
/// 3. `models/reg_model.json` relative to the working directory
pub fn resolve_model_path(explicit: Option<&Path>) -> (PathBuf, ModelSource) {
    if let Some(path) = explicit {
        return (path.to_path_buf(), ModelSource::Explicit);
    }
    match std::env::var(MODEL_PATH_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => (PathBuf::from(path), ModelSource::Environment),
        _ => (PathBuf::from(DEFAULT_MODEL_PATH), ModelSource::Default),
    }
}

/// Resolve an optional schema override. `None` means the embedded schema.
pub fn resolve_schema_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    std::env::var(SCHEMA_ENV_VAR)
        .ok()
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
}
