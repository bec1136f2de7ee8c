//! Configuration for the generation module

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Configuration for prompt-driven schema generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// OpenRouter API key
    pub openrouter_api_key: String,
    /// OpenRouter model to use
    pub openrouter_model: String,
    /// OpenRouter API base URL
    pub openrouter_base_url: String,
    /// Whether generation is enabled
    pub enabled: bool,
    /// Maximum number of retries for API calls
    pub max_retries: u32,
    /// Timeout for API calls in seconds
    pub timeout_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            openrouter_api_key: String::new(),
            openrouter_model: "anthropic/claude-3.5-sonnet".to_string(),
            openrouter_base_url: "https://openrouter.ai/api/v1".to_string(),
            enabled: false,
            max_retries: 3,
            timeout_seconds: 30,
        }
    }
}

impl GenerationConfig {
    /// Create a new generation config from environment variables
    pub fn from_env() -> Result<Self, crate::generation::GenerationError> {
        let api_key = env::var("SCHEMAFOLD_OPENROUTER_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            return Err(crate::generation::GenerationError::configuration_error(
                "SCHEMAFOLD_OPENROUTER_API_KEY not set in environment",
            ));
        }

        let model = env::var("OPENROUTER_MODEL")
            .unwrap_or_else(|_| "anthropic/claude-3.5-sonnet".to_string());

        let base_url = env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string());

        let enabled = env::var("GENERATION_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        let max_retries = env::var("GENERATION_MAX_RETRIES")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .unwrap_or(3);

        let timeout_seconds = env::var("GENERATION_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            openrouter_api_key: api_key,
            openrouter_model: model,
            openrouter_base_url: base_url,
            enabled,
            max_retries,
            timeout_seconds,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::generation::GenerationError> {
        if self.openrouter_api_key.is_empty() {
            return Err(crate::generation::GenerationError::configuration_error(
                "OpenRouter API key is required",
            ));
        }

        if self.openrouter_model.is_empty() {
            return Err(crate::generation::GenerationError::configuration_error(
                "OpenRouter model is required",
            ));
        }

        if self.openrouter_base_url.is_empty() {
            return Err(crate::generation::GenerationError::configuration_error(
                "OpenRouter base URL is required",
            ));
        }

        Ok(())
    }

    /// Check if generation is enabled and properly configured
    pub fn is_ready(&self) -> bool {
        self.enabled && self.validate().is_ok()
    }

    /// Load a saved configuration from a JSON file
    pub fn load_from_file(
        path: impl AsRef<Path>,
    ) -> Result<Self, crate::generation::GenerationError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            crate::generation::GenerationError::configuration_error(format!(
                "Failed to read config file: {}",
                e
            ))
        })?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Save the configuration to a JSON file
    pub fn save_to_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(), crate::generation::GenerationError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents).map_err(|e| {
            crate::generation::GenerationError::configuration_error(format!(
                "Failed to write config file: {}",
                e
            ))
        })
    }
}
