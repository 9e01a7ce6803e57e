//! Prediction handle with a lazily loaded, cached model.
//!
//! # Concurrency
//!
//! The model is loaded on the first prediction and reused afterwards. Loads
//! are serialized: callers that arrive while a load is in flight wait for it
//! and share its outcome, the cached model or the same failure, so one burst
//! of requests never reads the artifact twice. A failure is kept only for the
//! callers of that attempt; the next request tries again, which lets an
//! operator fix a missing artifact without a restart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::{debug, warn};

use salary_model::{ColumnSchema, RawProfile};
use salary_transform::FeatureEncoder;

use crate::config::PredictorConfig;
use crate::error::{ArtifactError, PredictError};
use crate::loader::{FileModelLoader, ModelLoader};
use crate::regressor::Regressor;

/// Round a salary to cents.
///
/// Exact ties go to the even cent (`0.125` becomes `0.12`). Values too large
/// to scale come back infinite.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Encodes profiles and asks the model for a salary.
pub struct SalaryPredictor {
    encoder: FeatureEncoder,
    loader: Box<dyn ModelLoader>,
    model: OnceLock<Arc<dyn Regressor>>,
    /// Held for the duration of a load; keeps the latest failure.
    last_failure: Mutex<Option<PredictError>>,
    /// Number of failed load attempts so far.
    failed_loads: AtomicU64,
}

impl SalaryPredictor {
    pub fn new(schema: ColumnSchema, loader: impl ModelLoader + 'static) -> Self {
        Self {
            encoder: FeatureEncoder::new(schema),
            loader: Box::new(loader),
            model: OnceLock::new(),
            last_failure: Mutex::new(None),
            failed_loads: AtomicU64::new(0),
        }
    }

    /// Predictor reading the artifact named by `config`.
    pub fn from_config(schema: ColumnSchema, config: &PredictorConfig) -> Self {
        Self::new(schema, FileModelLoader::from_config(config))
    }

    /// Predictor around an already constructed model.
    pub fn with_model(schema: ColumnSchema, model: Arc<dyn Regressor>) -> Self {
        let cached = Arc::clone(&model);
        let predictor = Self::new(
            schema,
            move || -> Result<Arc<dyn Regressor>, ArtifactError> { Ok(Arc::clone(&cached)) },
        );
        // The cell is fresh, so this cannot fail.
        let _ = predictor.model.set(model);
        predictor
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn schema(&self) -> &ColumnSchema {
        self.encoder.schema()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.get().is_some()
    }

    /// The cached model, loading it on first use.
    pub fn model(&self) -> Result<&Arc<dyn Regressor>, PredictError> {
        if let Some(model) = self.model.get() {
            return Ok(model);
        }
        let seen_failures = self.failed_loads.load(Ordering::Acquire);
        let mut last_failure = self
            .last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(model) = self.model.get() {
            return Ok(model);
        }
        // A load failed while this caller was waiting: report that attempt.
        if self.failed_loads.load(Ordering::Acquire) != seen_failures
            && let Some(error) = last_failure.as_ref()
        {
            return Err(error.clone());
        }

        let location = self.loader.location();
        debug!(location = %location, "loading model");
        match self.loader.load() {
            Ok(model) => {
                *last_failure = None;
                Ok(self.model.get_or_init(|| model))
            }
            Err(error) => {
                let error = PredictError::ModelUnavailable {
                    location,
                    reason: error.to_string(),
                };
                *last_failure = Some(error.clone());
                self.failed_loads.fetch_add(1, Ordering::Release);
                Err(error)
            }
        }
    }

    /// Predict the annual salary for one profile, rounded to two decimals.
    pub fn predict(&self, profile: &RawProfile) -> Result<f64, PredictError> {
        let model = self.model()?;
        self.check_features(&**model)?;

        let row = self.encoder.encode(profile);
        let outputs = model
            .predict(&[row.values()])
            .map_err(|error| PredictError::PredictionFailed(error.to_string()))?;
        let Some(&salary) = outputs.first() else {
            return Err(PredictError::PredictionFailed(
                "model returned no predictions".to_string(),
            ));
        };
        let rounded = round_currency(salary);
        if !rounded.is_finite() {
            return Err(PredictError::PredictionFailed(format!(
                "model returned a non-finite value ({salary})"
            )));
        }
        Ok(rounded)
    }

    fn check_features(&self, model: &dyn Regressor) -> Result<(), PredictError> {
        let Some(names) = model.feature_names() else {
            return Ok(());
        };
        let schema = self.schema().columns();
        if names == schema {
            return Ok(());
        }
        let first_difference = names
            .iter()
            .zip(schema)
            .position(|(model_name, schema_name)| model_name != schema_name)
            .unwrap_or(names.len().min(schema.len()));
        warn!(
            model_features = names.len(),
            schema_columns = schema.len(),
            first_difference,
            "model features do not match column schema"
        );
        Err(PredictError::PredictionFailed(format!(
            "model features do not match the column schema ({} model features, {} schema columns, first difference at position {first_difference})",
            names.len(),
            schema.len()
        )))
    }
}
