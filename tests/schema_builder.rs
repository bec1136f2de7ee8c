//! End-to-end tests across the schema model, derivations, validation,
//! persistence, and session orchestration.

use schemafold::schema::operations::FieldPatch;
use schemafold::schema::{
    builtin_templates, derive_json, derive_json_schema, derive_python, derive_typescript,
    to_pretty_json, validate_json, validate_json_text, Field, FieldKind, FieldValue,
};
use schemafold::session::SchemaSession;
use schemafold::store::SchemaStore;
use serde_json::json;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn article_fields() -> Vec<Field> {
    vec![
        Field::string("title", "Hello"),
        Field::number("count", 5.0),
        Field::nested(
            "author",
            vec![Field::string("name", "Ada"), Field::number("age", 36.0)],
        ),
    ]
}

#[test]
fn derivations_agree_on_one_tree() {
    let fields = article_fields();

    let sample = derive_json(&fields);
    assert_eq!(
        sample,
        json!({
            "title": "Hello",
            "count": 5,
            "author": { "name": "Ada", "age": 36 }
        })
    );

    let schema = derive_json_schema(&fields);
    assert_eq!(schema["type"], json!("object"));
    assert_eq!(schema["required"], json!(["title", "count", "author"]));
    assert_eq!(
        schema["properties"]["author"]["properties"]["age"]["type"],
        json!("number")
    );

    let ts = derive_typescript(&fields, "Schema");
    assert!(ts.contains("interface Schema {"));
    assert!(ts.contains("  author: Author;"));
    assert!(ts.contains("interface Author {"));

    let py = derive_python(&fields, "Schema");
    assert!(py.contains("class Schema:"));
    assert!(py.contains("self.author = Author()"));
    assert!(py.contains("class Author:"));
}

#[test]
fn derived_sample_always_validates() {
    let fields = article_fields();
    let report = validate_json(&derive_json(&fields), &fields);
    assert!(report.is_valid, "errors: {:?}", report.errors);
    assert!(report.warnings.is_empty());
}

#[test]
fn pretty_json_preserves_declaration_order() {
    let fields = article_fields();
    let text = to_pretty_json(&fields);
    let title = text.find("\"title\"").unwrap();
    let count = text.find("\"count\"").unwrap();
    let author = text.find("\"author\"").unwrap();
    assert!(title < count && count < author);
}

#[test]
fn validation_reports_missing_and_extra_fields() {
    let fields = article_fields();
    let report = validate_json_text(
        r#"{"title": "Hi", "author": {"name": "Ada", "age": 36}, "unknown": 1}"#,
        &fields,
    );
    assert!(!report.is_valid);
    assert_eq!(report.errors, vec!["Missing required field: count"]);
    assert_eq!(report.warnings, vec!["Extra field found: unknown"]);
}

#[test]
fn session_edits_flow_through_to_derivations() {
    let mut session = SchemaSession::new();
    session.add_field(&[]).unwrap();
    session
        .update_field(&[], 0, FieldPatch::rename("title").with_value("Hello"))
        .unwrap();
    session.add_field(&[]).unwrap();
    session
        .update_field(
            &[],
            1,
            FieldPatch::change_kind(FieldKind::Number).with_value(5.0),
        )
        .unwrap();
    session
        .update_field(&[], 1, FieldPatch::rename("count"))
        .unwrap();

    assert_eq!(
        derive_json(session.fields()),
        json!({"title": "Hello", "count": 5})
    );
}

#[test]
fn type_change_resets_incompatible_metadata() {
    let mut session = SchemaSession::with_fields(vec![Field::nested(
        "meta",
        vec![Field::string("inner", "x")],
    )]);

    session
        .update_field(&[], 0, FieldPatch::change_kind(FieldKind::String))
        .unwrap();

    let field = &session.fields()[0];
    assert_eq!(field.kind, FieldKind::String);
    assert!(field.children.is_none());
    assert_eq!(field.value, Some(FieldValue::Text(String::new())));
}

#[test]
fn store_scopes_and_orders_saved_schemas() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let store = SchemaStore::open(dir.path()).unwrap();

    let mut session = SchemaSession::with_fields(article_fields());
    let first = session.save(&store, "alice", "Articles v1").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    session.add_field(&[]).unwrap();
    let second = session.save(&store, "alice", "Articles v2").unwrap();
    session.save(&store, "bob", "Unrelated").unwrap();

    let listed = store.list_schemas("alice").unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);

    assert!(store.delete_schema(&first.id).unwrap());
    assert_eq!(store.list_schemas("alice").unwrap().len(), 1);
}

#[test]
fn saved_schema_roundtrips_through_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = SchemaStore::open(dir.path()).unwrap();

    let mut session = SchemaSession::with_fields(article_fields());
    let saved = session.save(&store, "alice", "Articles").unwrap();

    let mut restored = SchemaSession::new();
    restored.load(&store, &saved.id).unwrap();
    assert_eq!(
        derive_json(restored.fields()),
        derive_json(session.fields())
    );
}

#[test]
fn template_load_is_undoable() {
    let mut session = SchemaSession::with_fields(vec![Field::string("title", "Hello")]);
    let initial = session.fields().to_vec();
    session.replace_fields(initial, "Initial");

    let templates = builtin_templates();
    session.load_template(&templates[0]);
    assert!(session.fields().len() > 1);

    // entry 1 is the pre-template snapshot
    session.restore_history(1).unwrap();
    assert_eq!(session.fields().len(), 1);
    assert_eq!(session.fields()[0].name, "title");
}

#[test]
fn stale_generation_result_is_discarded() {
    init_logs();
    let mut session = SchemaSession::with_fields(article_fields());
    let observed = session.revision();

    // a user edit lands while the model request is in flight
    session.delete_field(&[], 1).unwrap();

    let generated = vec![Field::string("generated", "x")];
    assert!(session.apply_generated(generated, observed).is_err());
    assert_eq!(session.fields().len(), 2);

    // retry with the fresh revision succeeds
    let generated = vec![Field::string("generated", "x")];
    session
        .apply_generated(generated, session.revision())
        .unwrap();
    assert_eq!(session.fields()[0].name, "generated");
}

#[test]
fn wire_format_matches_editor_payloads() {
    let payload = json!([
        {
            "id": "field_1",
            "name": "status",
            "type": "Enum",
            "value": "active",
            "enumValues": ["active", "inactive"],
            "required": false
        },
        {
            "id": "field_2",
            "name": "profile",
            "type": "Nested",
            "children": [
                {"id": "field_3", "name": "email", "type": "Email"}
            ]
        }
    ]);

    let fields: Vec<Field> = serde_json::from_value(payload.clone()).unwrap();
    assert_eq!(fields[0].kind, FieldKind::Enum);
    assert_eq!(fields[0].required, Some(false));
    assert_eq!(fields[1].child_fields()[0].kind, FieldKind::Email);

    let back = serde_json::to_value(&fields).unwrap();
    assert_eq!(back, payload);
}
