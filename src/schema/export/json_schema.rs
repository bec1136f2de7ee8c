//! Derivation of a field tree into a JSON-Schema-shaped object
//!
//! Each level becomes `{type: "object", properties, required}`. A field
//! lands in `required` unless it is explicitly marked optional, the same
//! rule the sample validator applies. Duplicate sibling names are
//! last-write-wins, matching the plain JSON derivation.

use serde_json::{json, Map, Value};

use crate::schema::types::{number_to_json, Field, FieldKind, FieldValue};

/// Derives the JSON-Schema object for a sibling sequence.
pub fn derive_json_schema(fields: &[Field]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in fields {
        properties.insert(field.name.clone(), property_for(field));
        if field.is_required() {
            required.push(Value::String(field.name.clone()));
        }
    }

    json!({
        "type": "object",
        "properties": Value::Object(properties),
        "required": Value::Array(required),
    })
}

/// 2-space-indented text form of [`derive_json_schema`].
pub fn to_pretty_json_schema(fields: &[Field]) -> String {
    serde_json::to_string_pretty(&derive_json_schema(fields)).unwrap_or_else(|_| "{}".to_string())
}

fn property_for(field: &Field) -> Value {
    if field.is_container() {
        return derive_json_schema(field.child_fields());
    }

    let mut property = Map::new();
    match field.kind {
        FieldKind::String => {
            property.insert("type".to_string(), json!("string"));
            property.insert("default".to_string(), string_default(field));
        }
        FieldKind::Number | FieldKind::Float => {
            property.insert("type".to_string(), json!("number"));
            property.insert("default".to_string(), numeric_default(field));
        }
        FieldKind::Integer => {
            property.insert("type".to_string(), json!("integer"));
            property.insert("default".to_string(), numeric_default(field));
        }
        FieldKind::Boolean => {
            property.insert("type".to_string(), json!("boolean"));
            property.insert(
                "default".to_string(),
                json!(field.value.as_ref().and_then(FieldValue::as_bool).unwrap_or(false)),
            );
        }
        FieldKind::Date => {
            property.insert("type".to_string(), json!("string"));
            property.insert("format".to_string(), json!("date"));
        }
        FieldKind::Email => {
            property.insert("type".to_string(), json!("string"));
            property.insert("format".to_string(), json!("email"));
        }
        FieldKind::Url => {
            property.insert("type".to_string(), json!("string"));
            property.insert("format".to_string(), json!("uri"));
        }
        FieldKind::Uuid => {
            property.insert("type".to_string(), json!("string"));
            property.insert("format".to_string(), json!("uuid"));
        }
        FieldKind::Enum => {
            property.insert("type".to_string(), json!("string"));
            property.insert(
                "enum".to_string(),
                json!(field.enum_values.clone().unwrap_or_default()),
            );
            property.insert("default".to_string(), string_default(field));
        }
        FieldKind::Array => {
            property.insert("type".to_string(), json!("array"));
            property.insert(
                "items".to_string(),
                json!({ "type": item_type_name(field.array_item_type.as_deref()) }),
            );
        }
        FieldKind::Nested | FieldKind::Object => unreachable!("containers handled above"),
    }

    if let Some(description) = &field.description {
        property.insert("description".to_string(), json!(description));
    }
    if let Some(min_length) = field.min_length {
        property.insert("minLength".to_string(), json!(min_length));
    }
    if let Some(max_length) = field.max_length {
        property.insert("maxLength".to_string(), json!(max_length));
    }
    if let Some(pattern) = &field.pattern {
        property.insert("pattern".to_string(), json!(pattern));
    }
    if field.kind.is_numeric() {
        if let Some(min) = field.min {
            property.insert("minimum".to_string(), number_to_json(min));
        }
        if let Some(max) = field.max {
            property.insert("maximum".to_string(), number_to_json(max));
        }
    }

    Value::Object(property)
}

fn string_default(field: &Field) -> Value {
    json!(field
        .value
        .as_ref()
        .and_then(FieldValue::as_str)
        .unwrap_or(""))
}

fn numeric_default(field: &Field) -> Value {
    number_to_json(field.value.as_ref().and_then(FieldValue::as_f64).unwrap_or(0.0))
}

fn item_type_name(item_type: Option<&str>) -> &'static str {
    match item_type {
        Some("Number") | Some("Integer") | Some("Float") => "number",
        Some("Boolean") => "boolean",
        _ => "string",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_and_number_properties() {
        let fields = vec![
            Field::string("title", "Hello"),
            Field::number("count", 5.0),
        ];
        let schema = derive_json_schema(&fields);
        assert_eq!(
            schema["properties"]["title"],
            json!({"type": "string", "default": "Hello"})
        );
        assert_eq!(
            schema["properties"]["count"],
            json!({"type": "number", "default": 5})
        );
        assert_eq!(schema["required"], json!(["title", "count"]));
    }

    #[test]
    fn test_optional_field_left_out_of_required() {
        let mut fields = vec![Field::string("title", "Hello"), Field::number("count", 5.0)];
        fields[1].required = Some(false);
        let schema = derive_json_schema(&fields);
        assert_eq!(schema["required"], json!(["title"]));
    }

    #[test]
    fn test_nested_fields_recurse() {
        let fields = vec![Field::nested("author", vec![Field::string("name", "Ada")])];
        let schema = derive_json_schema(&fields);
        assert_eq!(schema["properties"]["author"]["type"], json!("object"));
        assert_eq!(
            schema["properties"]["author"]["properties"]["name"]["type"],
            json!("string")
        );
        assert_eq!(schema["properties"]["author"]["required"], json!(["name"]));
    }

    #[test]
    fn test_formatted_string_kinds() {
        let fields = vec![
            Field::new("when", FieldKind::Date),
            Field::new("who", FieldKind::Email),
            Field::new("site", FieldKind::Url),
            Field::new("uid", FieldKind::Uuid),
        ];
        let schema = derive_json_schema(&fields);
        assert_eq!(schema["properties"]["when"]["format"], json!("date"));
        assert_eq!(schema["properties"]["who"]["format"], json!("email"));
        assert_eq!(schema["properties"]["site"]["format"], json!("uri"));
        assert_eq!(schema["properties"]["uid"]["format"], json!("uuid"));
    }

    #[test]
    fn test_enum_and_array_properties() {
        let mut status = Field::new("status", FieldKind::Enum);
        status.enum_values = Some(vec!["active".to_string(), "inactive".to_string()]);
        let mut tags = Field::new("tags", FieldKind::Array);
        tags.array_item_type = Some("Number".to_string());

        let schema = derive_json_schema(&[status, tags]);
        assert_eq!(
            schema["properties"]["status"]["enum"],
            json!(["active", "inactive"])
        );
        assert_eq!(
            schema["properties"]["tags"]["items"],
            json!({"type": "number"})
        );
    }

    #[test]
    fn test_constraints_carried_over() {
        let mut age = Field::new("age", FieldKind::Integer);
        age.min = Some(0.0);
        age.max = Some(120.0);
        age.description = Some("Age in years".to_string());
        let schema = derive_json_schema(&[age]);
        assert_eq!(schema["properties"]["age"]["minimum"], json!(0));
        assert_eq!(schema["properties"]["age"]["maximum"], json!(120));
        assert_eq!(
            schema["properties"]["age"]["description"],
            json!("Age in years")
        );
    }
}
