//! Model abstraction used by the predictor.

use crate::error::ModelError;

/// A trained model that maps schema-ordered rows to scalar predictions.
///
/// Implementations must be deterministic: the same rows always yield the same
/// outputs. The predictor never retries a failed call.
pub trait Regressor: Send + Sync {
    /// Short model family name used in logs (e.g. "linear").
    fn kind(&self) -> &'static str {
        "opaque"
    }

    /// Column names the model was fitted on, when the artifact records them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// Content fingerprint of the artifact the model came from.
    fn fingerprint(&self) -> Option<&str> {
        None
    }

    /// Predict one value per row.
    fn predict(&self, rows: &[&[f64]]) -> Result<Vec<f64>, ModelError>;
}
