//! Schema-aligned feature row.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::ColumnSchema;

/// One numeric value per schema column, in schema order.
///
/// The column set is borrowed from the schema, so a row can never gain or
/// lose columns relative to the layout it was built for.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow<'a> {
    schema: &'a ColumnSchema,
    values: Vec<f64>,
}

impl<'a> EncodedRow<'a> {
    /// A row with every column set to 0.
    pub fn zeros(schema: &'a ColumnSchema) -> Self {
        Self {
            schema,
            values: vec![0.0; schema.len()],
        }
    }

    /// Sets a column by name. Returns false when the schema has no such column.
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        match self.schema.position(name) {
            Some(idx) => {
                self.values[idx] = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.schema.position(name).map(|idx| self.values[idx])
    }

    pub fn schema(&self) -> &'a ColumnSchema {
        self.schema
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + '_ {
        self.schema
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Columns holding a non-zero value, in schema order.
    pub fn non_zero(&self) -> impl Iterator<Item = (&'a str, f64)> + '_ {
        self.iter().filter(|(_, value)| *value != 0.0)
    }
}

impl Serialize for EncodedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
