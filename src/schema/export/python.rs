//! Python class-stub generation
//!
//! Mirrors the TypeScript derivation: one class per container level with
//! `__init__` defaults, parent before children, depth-first.

use super::typescript::capitalize;
use crate::schema::types::{today_iso, Field, FieldKind, FieldValue};

/// Generates Python class declarations for the tree, rooted at a class
/// with the given name.
pub fn derive_python(fields: &[Field], root_name: &str) -> String {
    let mut output = String::new();
    emit_class(fields, root_name, &mut output);
    output
}

fn emit_class(fields: &[Field], name: &str, output: &mut String) {
    output.push_str(&format!("class {}:\n", name));
    output.push_str("    def __init__(self):\n");
    if fields.is_empty() {
        output.push_str("        pass\n");
    }
    for field in fields {
        output.push_str(&format!(
            "        self.{} = {}\n",
            field.name,
            member_default(field)
        ));
    }
    output.push('\n');

    for field in fields {
        if field.is_container() {
            emit_class(field.child_fields(), &capitalize(&field.name), output);
        }
    }
}

fn member_default(field: &Field) -> String {
    match field.kind {
        FieldKind::Nested | FieldKind::Object => format!("{}()", capitalize(&field.name)),
        FieldKind::Number | FieldKind::Integer | FieldKind::Float => field
            .value
            .as_ref()
            .and_then(FieldValue::as_f64)
            .map(format_number)
            .unwrap_or_else(|| "0".to_string()),
        FieldKind::Boolean => {
            let value = field.value.as_ref().and_then(FieldValue::as_bool).unwrap_or(false);
            if value { "True" } else { "False" }.to_string()
        }
        FieldKind::Array => "[]".to_string(),
        FieldKind::Date => quote(
            field
                .value
                .as_ref()
                .and_then(FieldValue::as_str)
                .map(str::to_string)
                .unwrap_or_else(today_iso),
        ),
        _ => quote(
            field
                .value
                .as_ref()
                .and_then(FieldValue::as_str)
                .unwrap_or("")
                .to_string(),
        ),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn quote(value: String) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
