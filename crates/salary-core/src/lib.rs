//! Salary prediction on top of the feature encoder.
//!
//! - **artifact**: the serialized model formats a training run can hand over
//! - **regressor**: the seam between this crate and any model implementation
//! - **loader**: reading artifacts from disk, with a content fingerprint
//! - **config**: model location resolution
//! - **predictor**: the lazily initialized prediction handle

pub mod artifact;
pub mod config;
pub mod error;
pub mod loader;
pub mod predictor;
pub mod regressor;

pub use artifact::{DecisionTree, LinearModel, ModelArtifact, ModelSpec, RandomForest};
pub use config::PredictorConfig;
pub use error::{ArtifactError, ModelError, PredictError};
pub use loader::{FileModelLoader, LoadedModel, ModelLoader};
pub use predictor::{SalaryPredictor, round_currency};
pub use regressor::Regressor;
