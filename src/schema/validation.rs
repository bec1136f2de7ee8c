//! Validation of arbitrary JSON against a field tree
//!
//! Findings are data, not exceptions: the walk always completes and
//! returns a [`ValidationReport`] with accumulated errors and warnings.
//! Paths in messages are dot-joined field names from the root.

use serde_json::Value;

use super::types::{json_type_name, Field, FieldKind};

/// Outcome of validating a JSON value against a field tree.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn finish(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Validates a JSON value against the declared fields.
///
/// A declared field must be present unless explicitly marked optional.
/// String fields must hold strings (empty string is a warning), Number
/// fields finite numbers, container fields non-array objects which are
/// then validated recursively. Keys not declared in the tree produce
/// warnings, never errors.
pub fn validate_json(data: &Value, fields: &[Field]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    validate_level(data, fields, "", &mut errors, &mut warnings);
    ValidationReport::finish(errors, warnings)
}

/// Parses `text` as JSON and validates it. Unparseable input yields a
/// report with a single error rather than an exception, mirroring how
/// the editor surfaces pasted-JSON mistakes inline.
pub fn validate_json_text(text: &str, fields: &[Field]) -> ValidationReport {
    match serde_json::from_str::<Value>(text) {
        Ok(data) => validate_json(&data, fields),
        Err(_) => ValidationReport::finish(vec!["Invalid JSON format".to_string()], Vec::new()),
    }
}

fn validate_level(
    data: &Value,
    fields: &[Field],
    path: &str,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    let object = match data.as_object() {
        Some(object) => object,
        None => {
            if path.is_empty() {
                errors.push("Root data should be an object".to_string());
            } else {
                errors.push(format!(
                    "Field {} should be an object, got {}",
                    path,
                    json_type_name(data)
                ));
            }
            return;
        }
    };

    for field in fields {
        let field_path = join_path(path, &field.name);
        let value = match object.get(&field.name) {
            Some(value) => value,
            None => {
                if field.is_required() {
                    errors.push(format!("Missing required field: {}", field_path));
                }
                continue;
            }
        };
        validate_field(value, field, &field_path, errors, warnings);
    }

    for key in object.keys() {
        if !fields.iter().any(|field| &field.name == key) {
            warnings.push(format!("Extra field found: {}", join_path(path, key)));
        }
    }
}

fn validate_field(
    value: &Value,
    field: &Field,
    path: &str,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    match field.kind {
        FieldKind::String => match value.as_str() {
            Some(text) => {
                if text.is_empty() {
                    warnings.push(format!("Field {} is an empty string", path));
                }
            }
            None => errors.push(format!(
                "Field {} should be a string, got {}",
                path,
                json_type_name(value)
            )),
        },
        FieldKind::Number => match value.as_f64() {
            Some(number) => {
                if !number.is_finite() {
                    errors.push(format!("Field {} should be a finite number", path));
                }
            }
            None => errors.push(format!(
                "Field {} should be a number, got {}",
                path,
                json_type_name(value)
            )),
        },
        FieldKind::Nested | FieldKind::Object => {
            if value.is_array() || !value.is_object() {
                errors.push(format!(
                    "Field {} should be an object, got {}",
                    path,
                    json_type_name(value)
                ));
            } else {
                validate_level(value, field.child_fields(), path, errors, warnings);
            }
        }
        // Other kinds are presence-checked only; their metadata is a hint
        // for generation, not a validation rule.
        _ => {}
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}
