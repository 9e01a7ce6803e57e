//! Model artifact loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::Digest;
use tracing::info;

use salary_standards::paths::ModelSource;

use crate::artifact::ModelArtifact;
use crate::config::PredictorConfig;
use crate::error::{ArtifactError, ModelError};
use crate::regressor::Regressor;

/// Source of a model for [`SalaryPredictor`](crate::SalaryPredictor).
///
/// Any `Fn() -> Result<Arc<dyn Regressor>, ArtifactError>` closure is a
/// loader, which is how tests inject stub models.
pub trait ModelLoader: Send + Sync {
    /// Human-readable location, shown when the model is unavailable.
    fn location(&self) -> String {
        "<in-memory>".to_string()
    }

    fn load(&self) -> Result<Arc<dyn Regressor>, ArtifactError>;
}

impl<F> ModelLoader for F
where
    F: Fn() -> Result<Arc<dyn Regressor>, ArtifactError> + Send + Sync,
{
    fn load(&self) -> Result<Arc<dyn Regressor>, ArtifactError> {
        self()
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// A parsed artifact together with the digest of the bytes it came from.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub artifact: ModelArtifact,
    pub sha256: String,
}

impl Regressor for LoadedModel {
    fn kind(&self) -> &'static str {
        self.artifact.kind()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.artifact.feature_names()
    }

    fn fingerprint(&self) -> Option<&str> {
        Some(&self.sha256)
    }

    fn predict(&self, rows: &[&[f64]]) -> Result<Vec<f64>, ModelError> {
        self.artifact.predict(rows)
    }
}

/// Reads a JSON model artifact from the filesystem.
#[derive(Debug, Clone)]
pub struct FileModelLoader {
    path: PathBuf,
    source: ModelSource,
    expected_sha256: Option<String>,
}

impl FileModelLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            source: ModelSource::Explicit,
            expected_sha256: None,
        }
    }

    pub fn from_config(config: &PredictorConfig) -> Self {
        Self {
            path: config.model_path.clone(),
            source: config.model_source,
            expected_sha256: None,
        }
    }

    /// Refuse artifacts whose SHA-256 differs from `digest` (hex, any case).
    #[must_use]
    pub fn with_expected_sha256(mut self, digest: impl Into<String>) -> Self {
        self.expected_sha256 = Some(digest.into().to_ascii_lowercase());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_artifact(&self) -> Result<LoadedModel, ArtifactError> {
        let bytes = fs::read(&self.path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ArtifactError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                ArtifactError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        let sha256 = sha256_hex(&bytes);
        if let Some(expected) = &self.expected_sha256
            && *expected != sha256
        {
            return Err(ArtifactError::Sha256Mismatch {
                path: self.path.clone(),
                expected: expected.clone(),
                actual: sha256,
            });
        }
        let artifact: ModelArtifact =
            serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
                path: self.path.clone(),
                source,
            })?;
        artifact.validate().map_err(|source| ArtifactError::Invalid {
            path: self.path.clone(),
            source,
        })?;
        info!(
            model_path = %self.path.display(),
            model_source = %self.source,
            model_kind = artifact.kind(),
            sha256 = %sha256,
            "model artifact loaded"
        );
        Ok(LoadedModel { artifact, sha256 })
    }
}

impl ModelLoader for FileModelLoader {
    fn location(&self) -> String {
        format!("{} (from {})", self.path.display(), self.source)
    }

    fn load(&self) -> Result<Arc<dyn Regressor>, ArtifactError> {
        Ok(Arc::new(self.load_artifact()?))
    }
}
