//! CLI library components for the salary predictor.

pub mod batch;
pub mod format;
pub mod logging;
pub mod profile;
