//! Pure mutation operations over sibling sequences
//!
//! Every operation takes a slice of sibling fields and returns a fresh
//! `Vec<Field>` instead of mutating in place. Callers replace their
//! reference with the result, which keeps prior snapshots intact for
//! undo/history built on top.

use super::types::{Field, FieldKind, FieldValue, SchemaError};

/// Partial update applied to one field by [`update_field`].
///
/// Unset attributes keep their current value. A kind change is applied
/// first as a full retype, then the remaining patch attributes are merged
/// over the reset field.
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    pub name: Option<String>,
    pub kind: Option<FieldKind>,
    pub value: Option<FieldValue>,
    pub children: Option<Vec<Field>>,
    pub enum_values: Option<Vec<String>>,
    pub array_item_type: Option<String>,
    pub required: Option<bool>,
    pub description: Option<String>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
}

impl FieldPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn change_kind(kind: FieldKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn set_value(value: impl Into<FieldValue>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    fn apply(self, existing: &Field) -> Field {
        let mut field = match self.kind {
            Some(kind) if kind != existing.kind => existing.retype(kind),
            _ => existing.clone(),
        };
        if let Some(name) = self.name {
            field.name = name;
        }
        if let Some(value) = self.value {
            field.value = Some(value);
        }
        if let Some(children) = self.children {
            // Children only make sense on containers; a patch cannot turn
            // a leaf into a container without a kind change.
            if field.is_container() {
                field.children = Some(children);
            }
        }
        if let Some(enum_values) = self.enum_values {
            field.enum_values = Some(enum_values);
        }
        if let Some(item_type) = self.array_item_type {
            field.array_item_type = Some(item_type);
        }
        if let Some(required) = self.required {
            field.required = Some(required);
        }
        if let Some(description) = self.description {
            field.description = Some(description);
        }
        if let Some(min_length) = self.min_length {
            field.min_length = Some(min_length);
        }
        if let Some(max_length) = self.max_length {
            field.max_length = Some(max_length);
        }
        if let Some(min) = self.min {
            field.min = Some(min);
        }
        if let Some(max) = self.max {
            field.max = Some(max);
        }
        if let Some(pattern) = self.pattern {
            field.pattern = Some(pattern);
        }
        field
    }
}

fn check_bounds(index: usize, len: usize) -> Result<(), SchemaError> {
    if index >= len {
        return Err(SchemaError::IndexOutOfRange { index, len });
    }
    Ok(())
}

/// Appends a freshly-created default String leaf to the sibling sequence.
pub fn add_field(siblings: &[Field]) -> Vec<Field> {
    let mut fields = siblings.to_vec();
    fields.push(Field::new_default(siblings.len() + 1));
    fields
}

/// Replaces `siblings[index]` with the merge of the existing field and
/// the patch. Out-of-range indices are reported, not silently ignored.
pub fn update_field(
    siblings: &[Field],
    index: usize,
    patch: FieldPatch,
) -> Result<Vec<Field>, SchemaError> {
    check_bounds(index, siblings.len())?;
    let mut fields = siblings.to_vec();
    fields[index] = patch.apply(&siblings[index]);
    Ok(fields)
}

/// Removes the field at `index` together with its entire subtree.
pub fn delete_field(siblings: &[Field], index: usize) -> Result<Vec<Field>, SchemaError> {
    check_bounds(index, siblings.len())?;
    let mut fields = siblings.to_vec();
    fields.remove(index);
    Ok(fields)
}

/// Appends a new default leaf to the children of the container at
/// `index`. Invoking this on a leaf field is a silent no-op; only an
/// out-of-range index is an error.
pub fn add_nested_field(siblings: &[Field], index: usize) -> Result<Vec<Field>, SchemaError> {
    check_bounds(index, siblings.len())?;
    let mut fields = siblings.to_vec();
    if !fields[index].is_container() {
        return Ok(fields);
    }
    let mut children = fields[index].children.take().unwrap_or_default();
    let mut child = Field::new_default(children.len() + 1);
    child.name = format!("nested_field_{}", children.len() + 1);
    children.push(child);
    fields[index].children = Some(children);
    Ok(fields)
}

/// Rebuilds the tree with `op` applied to the sibling sequence addressed
/// by `path`, a chain of container indices from the root. The empty path
/// addresses the root siblings.
pub fn with_siblings_at<F>(
    fields: &[Field],
    path: &[usize],
    op: F,
) -> Result<Vec<Field>, SchemaError>
where
    F: FnOnce(&[Field]) -> Result<Vec<Field>, SchemaError>,
{
    match path.split_first() {
        None => op(fields),
        Some((&index, rest)) => {
            check_bounds(index, fields.len())?;
            if !fields[index].is_container() {
                return Err(SchemaError::InvalidField(format!(
                    "Field '{}' has no child fields",
                    fields[index].name
                )));
            }
            let new_children = with_siblings_at(fields[index].child_fields(), rest, op)?;
            let mut result = fields.to_vec();
            result[index].children = Some(new_children);
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::collect_ids;

    fn sample_tree() -> Vec<Field> {
        vec![
            Field::string("title", "Hello"),
            Field::nested(
                "author",
                vec![Field::string("name", "Ada"), Field::number("age", 36.0)],
            ),
        ]
    }

    #[test]
    fn test_add_field_appends_default_leaf() {
        let fields = sample_tree();
        let updated = add_field(&fields);
        assert_eq!(updated.len(), 3);
        assert_eq!(updated[2].name, "field_3");
        assert_eq!(updated[2].kind, FieldKind::String);
        assert_eq!(
            updated[2].value,
            Some(FieldValue::Text("Default String".to_string()))
        );
        // input untouched
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_add_field_ids_are_fresh() {
        let fields = add_field(&add_field(&[]));
        assert_ne!(fields[0].id, fields[1].id);
    }

    #[test]
    fn test_update_field_merges_patch() {
        let fields = sample_tree();
        let updated = update_field(&fields, 0, FieldPatch::rename("headline")).unwrap();
        assert_eq!(updated[0].name, "headline");
        assert_eq!(
            updated[0].value,
            Some(FieldValue::Text("Hello".to_string()))
        );
        assert_eq!(fields[0].name, "title");
    }

    #[test]
    fn test_update_field_kind_change_resets_then_merges() {
        let fields = sample_tree();
        let patch = FieldPatch::change_kind(FieldKind::Number).with_value(7.0);
        let updated = update_field(&fields, 0, patch).unwrap();
        assert_eq!(updated[0].kind, FieldKind::Number);
        assert_eq!(updated[0].value, Some(FieldValue::Number(7.0)));
        assert_eq!(updated[0].id, fields[0].id);
    }

    #[test]
    fn test_update_field_out_of_range() {
        let fields = sample_tree();
        let err = update_field(&fields, 5, FieldPatch::default()).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::IndexOutOfRange { index: 5, len: 2 }
        ));
    }

    #[test]
    fn test_delete_field_removes_subtree_ids() {
        let fields = sample_tree();
        let removed_ids = collect_ids(&fields[1..2]);
        let updated = delete_field(&fields, 1).unwrap();
        assert_eq!(updated.len(), fields.len() - 1);
        let remaining = collect_ids(&updated);
        for id in removed_ids {
            assert!(!remaining.contains(&id));
        }
    }

    #[test]
    fn test_delete_field_out_of_range() {
        assert!(delete_field(&[], 0).is_err());
    }

    #[test]
    fn test_add_nested_field_appends_child() {
        let fields = sample_tree();
        let updated = add_nested_field(&fields, 1).unwrap();
        let children = updated[1].child_fields();
        assert_eq!(children.len(), 3);
        assert_eq!(children[2].name, "nested_field_3");
    }

    #[test]
    fn test_add_nested_field_on_leaf_is_noop() {
        let fields = sample_tree();
        let updated = add_nested_field(&fields, 0).unwrap();
        assert_eq!(updated, fields);
    }

    #[test]
    fn test_with_siblings_at_rebuilds_path() {
        let fields = sample_tree();
        let updated = with_siblings_at(&fields, &[1], |siblings| {
            update_field(siblings, 0, FieldPatch::rename("full_name"))
        })
        .unwrap();
        assert_eq!(updated[1].child_fields()[0].name, "full_name");
        // untouched siblings still share structure with the original
        assert_eq!(updated[0], fields[0]);
    }

    #[test]
    fn test_with_siblings_at_rejects_leaf_path() {
        let fields = sample_tree();
        let err = with_siblings_at(&fields, &[0], |s| Ok(s.to_vec())).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidField(_)));
    }
}
