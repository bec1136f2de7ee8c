pub mod errors;
pub mod field;
pub mod saved;

pub use errors::SchemaError;
pub(crate) use field::{json_type_name, number_to_json};
pub use field::{
    collect_ids, count_fields, default_value_for, generate_id, today_iso, Field, FieldKind,
    FieldValue, PLACEHOLDER_EMAIL, PLACEHOLDER_URL, PLACEHOLDER_UUID,
};
pub use saved::SavedSchema;
