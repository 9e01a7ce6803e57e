#![deny(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod paths;
pub mod schema;

pub use crate::catalog::FormCatalog;
pub use crate::error::StandardsError;
pub use crate::paths::{ModelSource, resolve_model_path, resolve_schema_path};
pub use crate::schema::{default_schema, load_schema, load_schema_or_default};
