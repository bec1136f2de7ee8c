//! Derivation of a field tree into a plain JSON value
//!
//! Depth-first and total: every field produces exactly one JSON value.
//! Sibling order is preserved in the output object; when two siblings
//! share a name the later one wins.

use serde_json::{Map, Value};

use crate::schema::types::{
    number_to_json, today_iso, Field, FieldKind, PLACEHOLDER_EMAIL, PLACEHOLDER_URL,
    PLACEHOLDER_UUID,
};

/// Derives the sample JSON object for a sibling sequence, keyed by field
/// name in declaration order.
pub fn derive_json(fields: &[Field]) -> Value {
    let mut object = Map::new();
    for field in fields {
        object.insert(field.name.clone(), derive_field_value(field));
    }
    Value::Object(object)
}

/// 2-space-indented text form of [`derive_json`].
pub fn to_pretty_json(fields: &[Field]) -> String {
    serde_json::to_string_pretty(&derive_json(fields)).unwrap_or_else(|_| "{}".to_string())
}

fn derive_field_value(field: &Field) -> Value {
    if field.is_container() {
        return derive_json(field.child_fields());
    }
    if let Some(value) = &field.value {
        return value.to_json();
    }
    default_json_for(field)
}

fn default_json_for(field: &Field) -> Value {
    match field.kind {
        FieldKind::Array => Value::Array(Vec::new()),
        FieldKind::Boolean => Value::Bool(false),
        FieldKind::Date => Value::String(today_iso()),
        FieldKind::Email => Value::String(PLACEHOLDER_EMAIL.to_string()),
        FieldKind::Url => Value::String(PLACEHOLDER_URL.to_string()),
        FieldKind::Uuid => Value::String(PLACEHOLDER_UUID.to_string()),
        FieldKind::Enum => Value::String(
            field
                .enum_values
                .as_ref()
                .and_then(|values| values.first())
                .cloned()
                .unwrap_or_default(),
        ),
        FieldKind::Number | FieldKind::Integer | FieldKind::Float => number_to_json(0.0),
        _ => Value::String(String::new()),
    }
}
