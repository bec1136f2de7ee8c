//! Unified error handling for the crate

use thiserror::Error;

use crate::generation::GenerationError;
use crate::schema::types::SchemaError;

/// Top-level error type covering all subsystems
#[derive(Error, Debug)]
pub enum SchemafoldError {
    /// Schema model and persistence errors
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Prompt-driven generation errors
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    /// JSON serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the unified error
pub type SchemafoldResult<T> = Result<T, SchemafoldError>;
