#![deny(unsafe_code)]

use std::path::PathBuf;

use salary_model::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON schema {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse TOML schema {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported schema file extension for {path} (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid schema in {path}: {source}")]
    InvalidSchema {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
