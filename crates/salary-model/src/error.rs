use thiserror::Error;

/// Structural problems with a column schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("column schema is empty")]
    Empty,
    #[error("blank column name at position {position}")]
    BlankColumn { position: usize },
    #[error("duplicate column in schema: {0}")]
    DuplicateColumn(String),
}
