//! # Generation Module
//!
//! The generation module turns a natural-language description into a
//! ready-to-edit field tree using an OpenRouter-hosted model.
//!
//! ## Components
//!
//! * `service` - OpenRouter API integration and response parsing
//! * `config` - Configuration sourced from environment variables
//! * `error` - Custom error types for generation operations
//!
//! ## Architecture
//!
//! The generation flow is:
//! 1. Accept a non-empty prompt
//! 2. Ask the model for a JSON array of field objects
//! 3. Strip fences and extract the array from the response text
//! 4. Parse the array into fields
//! 5. Structurally validate: unique ids, non-empty names, children only
//!    under container kinds
//!
//! The caller decides whether to accept the generated tree; a stale edit
//! check against the in-flight revision lives in the session layer.

pub mod config;
pub mod error;
pub mod service;

// Public re-exports
pub use config::GenerationConfig;
pub use error::GenerationError;
pub use service::{normalize_generated, GenerationService};

/// Result type for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;
