//! Frozen column layout of the trained model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::profile::ProfileField;

/// Ordered list of model input columns.
///
/// The order is the order the model was trained on and is never changed after
/// construction. Lookups by name go through a prebuilt index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl ColumnSchema {
    /// Builds a schema, rejecting empty layouts, blank names and duplicates.
    pub fn new(columns: Vec<String>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SchemaError::BlankColumn { position });
            }
            if index.insert(name.clone(), position).is_some() {
                return Err(SchemaError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self { columns, index })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Indicator columns belonging to one profile field, in schema order.
    pub fn indicator_columns(&self, field: ProfileField) -> impl Iterator<Item = &str> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(move |name| field.owns_column(name))
    }
}

impl TryFrom<Vec<String>> for ColumnSchema {
    type Error = SchemaError;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<ColumnSchema> for Vec<String> {
    fn from(schema: ColumnSchema) -> Self {
        schema.columns
    }
}
