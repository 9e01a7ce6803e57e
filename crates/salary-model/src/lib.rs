//! Core data types for developer salary prediction.
//!
//! - **profile**: the raw, human-entered profile record
//! - **schema**: the frozen, ordered column layout the model was trained on
//! - **row**: a schema-aligned numeric feature row

pub mod error;
pub mod profile;
pub mod row;
pub mod schema;

pub use error::SchemaError;
pub use profile::{Experience, ProfileField, RawProfile};
pub use row::EncodedRow;
pub use schema::ColumnSchema;
