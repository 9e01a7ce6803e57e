use std::path::PathBuf;

use thiserror::Error;

/// Failures inside a model's own predict call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("model expects {expected} features, row has {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("malformed decision tree: {0}")]
    MalformedTree(String),
    #[error("random forest has no trees")]
    EmptyForest,
}

/// Failures reading or decoding a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model file not found at '{path}'")]
    NotFound { path: PathBuf },
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
    #[error("invalid model artifact {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Outcome of a failed prediction request.
///
/// `ModelUnavailable` is an operator problem with a concrete fix; everything
/// else is reported as `PredictionFailed`.
#[derive(Debug, Clone, Error)]
pub enum PredictError {
    #[error(
        "model unavailable at '{location}': {reason}. Place the model file there or set MODEL_PATH."
    )]
    ModelUnavailable { location: String, reason: String },
    #[error("prediction failed: {0}")]
    PredictionFailed(String),
}

impl PredictError {
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable { .. })
    }
}
