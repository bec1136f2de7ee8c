//! # SchemaFold
//!
//! A library for building, deriving, validating, and persisting JSON
//! schemas modeled as ordered trees of typed fields.
//!
//! ## Module Structure
//!
//! * `schema` - The field-tree model, edit operations, derivations,
//!   validation, templates, and history
//! * `generation` - Prompt-driven schema generation via OpenRouter
//! * `store` - Sled-backed persistence for named schemas
//! * `session` - Editing session tying the pieces together
//! * `error` - Unified error types
//!
//! ## Example
//!
//! ```no_run
//! use schemafold::schema::{derive_json, Field};
//! use schemafold::session::SchemaSession;
//!
//! let mut session = SchemaSession::with_fields(vec![
//!     Field::string("title", "Hello"),
//!     Field::number("count", 5.0),
//! ]);
//! let sample = derive_json(session.fields());
//! assert_eq!(sample["count"], 5);
//! ```

pub mod error;
pub mod generation;
pub mod schema;
pub mod session;
pub mod store;

pub use error::{SchemafoldError, SchemafoldResult};
pub use generation::{GenerationConfig, GenerationError, GenerationService};
pub use schema::{Field, FieldKind, FieldValue, SavedSchema, SchemaError};
pub use session::SchemaSession;
pub use store::SchemaStore;
