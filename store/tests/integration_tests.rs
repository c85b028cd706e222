use std::fs;
use std::path::Path;

use object_schema_core::{CompileError, ModuleEmitter};
use object_schema_store::{
    ArtifactWriter, GeneratorConfig, SourceChain, StoreError, load_bundle, load_dir,
};
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn orders_type() -> Value {
    json!({
        "type": "object",
        "properties": {
            "id": { "type": "string", "isImplied": true },
            "createdTime": { "type": "string", "format": "date-time" }
        }
    })
}

fn contacts_type() -> Value {
    json!({
        "type": "object",
        "properties": {
            "email": { "type": "string", "isImplied": true },
            "tags": { "type": "array", "items": { "type": "string", "isImplied": true } }
        }
    })
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_directory_and_bundle_agree() {
    let dir = tempfile::tempdir().unwrap();
    let types_dir = dir.path().join("types");
    fs::create_dir_all(&types_dir).unwrap();
    write_json(&types_dir.join("contacts.json"), &contacts_type());
    write_json(&types_dir.join("orders.json"), &orders_type());

    let bundle = dir.path().join("bundle.json");
    write_json(
        &bundle,
        &json!({ "contacts": contacts_type(), "orders": orders_type() }),
    );

    let from_dir = load_dir(&types_dir).unwrap();
    let from_bundle = load_bundle(&bundle).unwrap();
    assert_eq!(from_dir, from_bundle);
}

#[test]
fn test_bundle_keeps_key_order() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("bundle.json");
    fs::write(
        &bundle,
        r#"{ "orders": { "properties": {} }, "contacts": { "properties": {} }, "activities": { "properties": {} } }"#,
    )
    .unwrap();

    let doc = load_bundle(&bundle).unwrap();
    assert_eq!(doc.names().collect::<Vec<_>>(), ["orders", "contacts", "activities"]);
}

#[test]
fn test_bundle_that_is_not_json() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("bundle.json");
    fs::write(&bundle, "not json").unwrap();

    assert!(matches!(load_bundle(&bundle), Err(StoreError::JsonError(_))));
}

// ---------------------------------------------------------------------------
// End-to-end generation
// ---------------------------------------------------------------------------

#[test]
fn test_generate_with_config() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("bundle.json");
    write_json(
        &bundle,
        &json!({ "orders": orders_type(), "contacts": contacts_type() }),
    );

    let config = GeneratorConfig {
        output: dir.path().join("out/schemas.ts"),
        exclude: vec!["contacts".to_string()],
        ..Default::default()
    };

    let loaded = SourceChain::new().from_bundle(&bundle).load().unwrap();
    let document = config.select(&loaded.document);
    let module = ModuleEmitter::new(config.emit_options())
        .emit(&document)
        .unwrap();
    let report = ArtifactWriter::new(&config.output).write(&module).unwrap();

    assert_eq!(report.object_types, ["orders"]);
    let text = fs::read_to_string(&config.output).unwrap();
    assert!(text.contains("export const ordersSchema"));
    assert!(!text.contains("contactsSchema"));
    assert!(text.ends_with("export type RecordType = \"orders\";\n"));
}

#[test]
fn test_collision_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("bundle.json");
    write_json(
        &bundle,
        &json!({
            "Job Applications": { "properties": {} },
            "JobApplications": { "properties": {} }
        }),
    );
    let output = dir.path().join("schemas.ts");

    let document = load_bundle(&bundle).unwrap();
    let result = ModuleEmitter::default().emit(&document);
    assert!(matches!(result, Err(CompileError::NameCollision { .. })));
    assert!(!output.exists());
}

#[test]
fn test_failed_generation_keeps_previous_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("schemas.ts");
    fs::write(&output, "// previous artifact\n").unwrap();

    let bundle = dir.path().join("bundle.json");
    write_json(&bundle, &json!({ "orders": { "type": "object" } }));

    let err = SourceChain::new().from_bundle(&bundle).load().unwrap_err();
    assert!(matches!(
        err,
        StoreError::Compile(CompileError::MalformedDocument { ref type_name, .. })
            if type_name.as_deref() == Some("orders")
    ));
    assert_eq!(fs::read_to_string(&output).unwrap(), "// previous artifact\n");
}
