use thiserror::Error;

/// Errors produced by the schema subsystem.
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    #[error("Schema not found: {0}")]
    NotFound(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Index {index} out of range for {len} sibling fields")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sled::Error> for SchemaError {
    fn from(error: sled::Error) -> Self {
        SchemaError::Database(error.to_string())
    }
}

impl From<SchemaError> for String {
    fn from(error: SchemaError) -> String {
        error.to_string()
    }
}
