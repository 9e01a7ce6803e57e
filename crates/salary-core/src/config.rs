//! Predictor configuration.

use std::path::{Path, PathBuf};

use salary_standards::paths::{ModelSource, resolve_model_path};

/// Resolved model location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    /// Path of the model artifact.
    pub model_path: PathBuf,
    /// Where `model_path` came from, reported when the model is missing.
    pub model_source: ModelSource,
}

impl PredictorConfig {
    /// Resolve from an explicit path, then `MODEL_PATH`, then the default.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        let (model_path, model_source) = resolve_model_path(explicit);
        Self {
            model_path,
            model_source,
        }
    }

    /// Configuration pointing at a specific file.
    pub fn with_model_path(path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: path.into(),
            model_source: ModelSource::Explicit,
        }
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::resolve(None)
    }
}
