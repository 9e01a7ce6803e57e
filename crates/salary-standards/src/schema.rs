//! Column schema loading.
//!
//! The schema ships embedded in the crate. Deployments that retrain the model
//! point at a replacement file instead, either a JSON array of column names or
//! a TOML document with a `columns` array.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use salary_model::ColumnSchema;

use crate::error::StandardsError;
use crate::paths::resolve_schema_path;

const DEFAULT_SCHEMA_JSON: &str = include_str!("../data/columns.json");

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    columns: Vec<String>,
}

/// The schema the bundled model was trained against.
pub fn default_schema() -> Result<ColumnSchema, StandardsError> {
    parse_json(Path::new("<embedded>/columns.json"), DEFAULT_SCHEMA_JSON)
}

/// Load a schema file, choosing the parser by extension.
pub fn load_schema(path: &Path) -> Result<ColumnSchema, StandardsError> {
    let contents = fs::read_to_string(path).map_err(|source| StandardsError::io(path, source))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => parse_json(path, &contents),
        Some("toml") => {
            let document: SchemaDocument =
                toml::from_str(&contents).map_err(|source| StandardsError::Toml {
                    path: path.to_path_buf(),
                    source,
                })?;
            build(path, document.columns)
        }
        _ => Err(StandardsError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load the schema override if one is configured, otherwise the embedded one.
pub fn load_schema_or_default(explicit: Option<&Path>) -> Result<ColumnSchema, StandardsError> {
    match resolve_schema_path(explicit) {
        Some(path) => load_schema(&path),
        None => default_schema(),
    }
}

fn parse_json(path: &Path, contents: &str) -> Result<ColumnSchema, StandardsError> {
    let columns: Vec<String> =
        serde_json::from_str(contents).map_err(|source| StandardsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    build(path, columns)
}

fn build(path: &Path, columns: Vec<String>) -> Result<ColumnSchema, StandardsError> {
    ColumnSchema::new(columns).map_err(|source| StandardsError::InvalidSchema {
        path: path.to_path_buf(),
        source,
    })
}
