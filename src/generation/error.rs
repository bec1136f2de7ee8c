//! Error types for the generation module

use thiserror::Error;

/// Errors that can occur while generating a schema from a prompt
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Model API communication errors
    #[error("Model API error: {0}")]
    ApiError(String),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing errors
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration errors (missing API keys, etc.)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Invalid input data
    #[error("Invalid input data: {0}")]
    InvalidInput(String),

    /// Model response validation errors
    #[error("Response validation error: {0}")]
    ResponseValidationError(String),
}

impl GenerationError {
    /// Create a new model API error
    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::ApiError(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new response validation error
    pub fn response_validation_error(msg: impl Into<String>) -> Self {
        Self::ResponseValidationError(msg.into())
    }
}
