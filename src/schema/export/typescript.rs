//! TypeScript interface generation
//!
//! One interface per container level, parent before children,
//! depth-first. Pure text templating; the output is never parsed back.

use crate::schema::types::{Field, FieldKind};

/// Generates TypeScript interface declarations for the tree, rooted at
/// an interface with the given name.
pub fn derive_typescript(fields: &[Field], root_name: &str) -> String {
    let mut output = String::new();
    emit_interface(fields, root_name, &mut output);
    output
}

fn emit_interface(fields: &[Field], name: &str, output: &mut String) {
    output.push_str(&format!("interface {} {{\n", name));
    for field in fields {
        output.push_str(&format!(
            "  {}{}: {};\n",
            field.name,
            if field.is_required() { "" } else { "?" },
            member_type(field)
        ));
    }
    output.push_str("}\n\n");

    for field in fields {
        if field.is_container() {
            emit_interface(field.child_fields(), &capitalize(&field.name), output);
        }
    }
}

fn member_type(field: &Field) -> String {
    match field.kind {
        FieldKind::Nested | FieldKind::Object => capitalize(&field.name),
        FieldKind::Number | FieldKind::Integer | FieldKind::Float => "number".to_string(),
        FieldKind::Boolean => "boolean".to_string(),
        FieldKind::Array => format!(
            "{}[]",
            item_type(field.array_item_type.as_deref())
        ),
        FieldKind::Enum => field
            .enum_values
            .as_ref()
            .filter(|values| !values.is_empty())
            .map(|values| {
                values
                    .iter()
                    .map(|v| format!("'{}'", v))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .unwrap_or_else(|| "string".to_string()),
        _ => "string".to_string(),
    }
}

fn item_type(item: Option<&str>) -> &'static str {
    match item {
        Some("Number") | Some("Integer") | Some("Float") => "number",
        Some("Boolean") => "boolean",
        _ => "string",
    }
}

pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_interface() {
        let fields = vec![
            Field::string("title", "Hello"),
            Field::number("count", 5.0),
        ];
        let ts = derive_typescript(&fields, "Schema");
        assert_eq!(
            ts,
            "interface Schema {\n  title: string;\n  count: number;\n}\n\n"
        );
    }

    #[test]
    fn test_nested_interface_emitted_after_parent() {
        let fields = vec![
            Field::string("title", "Hello"),
            Field::nested("author", vec![Field::string("name", "Ada")]),
        ];
        let ts = derive_typescript(&fields, "Schema");
        let parent = ts.find("interface Schema").unwrap();
        let child = ts.find("interface Author").unwrap();
        assert!(parent < child);
        assert!(ts.contains("  author: Author;\n"));
        assert!(ts.contains("  name: string;\n"));
    }

    #[test]
    fn test_optional_marker_and_rich_kinds() {
        let mut flag = Field::new("enabled", FieldKind::Boolean);
        flag.required = Some(false);
        let mut tags = Field::new("tags", FieldKind::Array);
        tags.array_item_type = Some("Number".to_string());
        let mut status = Field::new("status", FieldKind::Enum);
        status.enum_values = Some(vec!["on".to_string(), "off".to_string()]);

        let ts = derive_typescript(&[flag, tags, status], "Schema");
        assert!(ts.contains("  enabled?: boolean;\n"));
        assert!(ts.contains("  tags: number[];\n"));
        assert!(ts.contains("  status: 'on' | 'off';\n"));
    }

    #[test]
    fn test_empty_container_still_declared() {
        let fields = vec![Field::nested("meta", vec![])];
        let ts = derive_typescript(&fields, "Schema");
        assert!(ts.contains("interface Meta {\n}\n"));
    }
}
