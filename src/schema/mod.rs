//! Field-tree schema model and the operations over it
//!
//! This module owns everything about a schema as data:
//!
//! * `types` - the field tree, scalar values, and saved-schema records
//! * `operations` - copy-on-write edits addressed by sibling index and path
//! * `export` - pure derivations to JSON, JSON Schema, TypeScript, Python
//! * `validation` - checking sample JSON documents against a tree
//! * `templates` - the built-in starter catalog
//! * `history` - bounded snapshot buffer for undo

pub mod export;
pub mod history;
pub mod operations;
pub mod templates;
pub mod types;
pub mod validation;

pub use export::{
    derive_json, derive_json_schema, derive_python, derive_typescript, to_pretty_json,
    to_pretty_json_schema,
};
pub use history::{HistoryEntry, SchemaHistory, HISTORY_CAPACITY};
pub use operations::{
    add_field, add_nested_field, delete_field, update_field, with_siblings_at, FieldPatch,
};
pub use templates::{builtin_templates, SchemaTemplate};
pub use types::{Field, FieldKind, FieldValue, SavedSchema, SchemaError};
pub use validation::{validate_json, validate_json_text, ValidationReport};
