//! Core field-tree data structures
//!
//! A schema-in-progress is an ordered sequence of [`Field`] nodes. Leaf
//! kinds carry an optional scalar default; the container kinds (`Nested`
//! and `Object`) carry an ordered list of child fields instead. Every node
//! gets a fresh opaque id at creation time and keeps it for its lifetime.

use chrono::Utc;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Placeholder emitted for Email fields without a default value.
pub const PLACEHOLDER_EMAIL: &str = "user@example.com";
/// Placeholder emitted for URL fields without a default value.
pub const PLACEHOLDER_URL: &str = "https://example.com";
/// Fixed UUID-shaped template emitted for UUID fields without a default.
/// Deliberately not a random UUID so derived output stays deterministic.
pub const PLACEHOLDER_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// Closed set of field kinds. `Nested` and `Object` are the container
/// kinds; everything else is a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Date,
    Email,
    #[serde(rename = "URL")]
    Url,
    #[serde(rename = "UUID")]
    Uuid,
    Integer,
    Float,
    Enum,
    Nested,
}

impl FieldKind {
    /// Whether fields of this kind own child fields.
    pub fn is_container(&self) -> bool {
        matches!(self, FieldKind::Nested | FieldKind::Object)
    }

    /// Whether fields of this kind hold numeric values.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldKind::Number | FieldKind::Integer | FieldKind::Float
        )
    }
}

/// Scalar default value of a field. Serialized untagged so the wire form
/// stays a plain JSON string, number or boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts to a `serde_json::Value`, collapsing integral floats to
    /// JSON integers so `5.0` round-trips as `5`.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Number(n) => number_to_json(*n),
            FieldValue::Flag(b) => Value::Bool(*b),
        }
    }
}

/// Integral finite floats become JSON integers, everything else stays f64.
pub(crate) fn number_to_json(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Number(n) => {
                if n.is_finite()
                    && n.fract() == 0.0
                    && *n >= i64::MIN as f64
                    && *n <= i64::MAX as f64
                {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            FieldValue::Flag(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(FieldValue::Text(s)),
            Value::Bool(b) => Ok(FieldValue::Flag(b)),
            Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Number)
                .ok_or_else(|| de::Error::custom("numeric field value out of range")),
            other => Err(de::Error::custom(format!(
                "field value must be a string, number or boolean, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// Human-readable JSON type name used in validation messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One node of the schema tree.
///
/// `children` is present iff the kind is a container kind; the optional
/// metadata attributes are meaningful only for the kinds that declare
/// them and are reset on every kind change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Generates a fresh opaque field id. Ids are never reused.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Today's date in ISO calendar form, the default for Date fields.
pub fn today_iso() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

impl Field {
    /// Creates a field of the given kind with a fresh id and the
    /// kind-appropriate default value and children.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            kind,
            value: default_value_for(kind),
            children: if kind.is_container() {
                Some(Vec::new())
            } else {
                None
            },
            enum_values: if kind == FieldKind::Enum {
                Some(Vec::new())
            } else {
                None
            },
            array_item_type: if kind == FieldKind::Array {
                Some("String".to_string())
            } else {
                None
            },
            required: None,
            description: None,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            pattern: None,
        }
    }

    /// Shorthand for a String leaf with a default value.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut field = Self::new(name, FieldKind::String);
        field.value = Some(FieldValue::Text(value.into()));
        field
    }

    /// Shorthand for a Number leaf with a default value.
    pub fn number(name: impl Into<String>, value: f64) -> Self {
        let mut field = Self::new(name, FieldKind::Number);
        field.value = Some(FieldValue::Number(value));
        field
    }

    /// Shorthand for a container field with the given children.
    pub fn nested(name: impl Into<String>, children: Vec<Field>) -> Self {
        let mut field = Self::new(name, FieldKind::Nested);
        field.children = Some(children);
        field
    }

    /// The default shape appended by the editor's "add field" action.
    pub fn new_default(position: usize) -> Self {
        let mut field = Self::new(format!("field_{}", position), FieldKind::String);
        field.value = Some(FieldValue::Text("Default String".to_string()));
        field
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Whether a sample document must contain this field. Absent flag
    /// means required, so trees that never set it behave as before.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(true)
    }

    /// Child fields, empty for leaves.
    pub fn child_fields(&self) -> &[Field] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns a copy of this field with the new kind applied.
    ///
    /// This is a full reset, not a partial merge: the value, children and
    /// all kind-specific metadata are replaced by the new kind's defaults
    /// so no stale, kind-incompatible metadata survives. Only `id`,
    /// `name`, `required` and `description` carry over, plus `enumValues`
    /// when retyping to Enum. Applying the same retype twice yields the
    /// same result as applying it once.
    pub fn retype(&self, new_kind: FieldKind) -> Field {
        Field {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: new_kind,
            value: default_value_for(new_kind),
            children: if new_kind.is_container() {
                Some(Vec::new())
            } else {
                None
            },
            enum_values: if new_kind == FieldKind::Enum {
                Some(self.enum_values.clone().unwrap_or_default())
            } else {
                None
            },
            array_item_type: if new_kind == FieldKind::Array {
                Some("String".to_string())
            } else {
                None
            },
            required: self.required,
            description: self.description.clone(),
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            pattern: None,
        }
    }
}

/// Default scalar value assigned when a field is created with or changed
/// to the given kind. Containers have no scalar value.
pub fn default_value_for(kind: FieldKind) -> Option<FieldValue> {
    match kind {
        FieldKind::String => Some(FieldValue::Text(String::new())),
        FieldKind::Email => Some(FieldValue::Text(PLACEHOLDER_EMAIL.to_string())),
        FieldKind::Url => Some(FieldValue::Text(PLACEHOLDER_URL.to_string())),
        FieldKind::Uuid => Some(FieldValue::Text(PLACEHOLDER_UUID.to_string())),
        FieldKind::Number | FieldKind::Integer | FieldKind::Float => {
            Some(FieldValue::Number(0.0))
        }
        FieldKind::Boolean => Some(FieldValue::Flag(false)),
        FieldKind::Date => Some(FieldValue::Text(today_iso())),
        FieldKind::Enum => Some(FieldValue::Text(String::new())),
        FieldKind::Array => None,
        FieldKind::Nested | FieldKind::Object => None,
    }
}

/// Collects every id in the tree, depth-first.
pub fn collect_ids(fields: &[Field]) -> Vec<String> {
    let mut ids = Vec::new();
    fn walk(fields: &[Field], ids: &mut Vec<String>) {
        for field in fields {
            ids.push(field.id.clone());
            walk(field.child_fields(), ids);
        }
    }
    walk(fields, &mut ids);
    ids
}

/// Total number of fields in the tree, containers included.
pub fn count_fields(fields: &[Field]) -> usize {
    fields
        .iter()
        .map(|f| 1 + count_fields(f.child_fields()))
        .sum()
}
