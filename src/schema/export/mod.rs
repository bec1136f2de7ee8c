//! Derivations from a field tree to external representations
//!
//! All derivations are pure and total: calling them twice on the same
//! tree yields identical output, and a well-formed tree never fails to
//! derive.
//!
//! * `json` - plain sample JSON value and pretty text
//! * `json_schema` - JSON-Schema-shaped object
//! * `typescript` - interface declaration text
//! * `python` - class declaration text

pub mod json;
pub mod json_schema;
pub mod python;
pub mod typescript;

pub use json::{derive_json, to_pretty_json};
pub use json_schema::{derive_json_schema, to_pretty_json_schema};
pub use python::derive_python;
pub use typescript::derive_typescript;
