use object_schema_core::{
    CompileError, ModuleEmitter, ObjectTypeDescriptor, PropertyDescriptor, SchemaDocument,
    emit_module, parse_document,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const ORDERS_DOCUMENT: &str = r#"{
    "orders": {
        "type": "object",
        "properties": {
            "id": { "type": "string", "isImplied": true, "readonly": true },
            "totalAmount": { "type": "number", "isImplied": true },
            "billingAddress": {
                "type": "object",
                "isImplied": true,
                "properties": {
                    "city": { "type": "string", "isImplied": true },
                    "zip": { "type": "string" }
                }
            },
            "lineItems": {
                "type": "array",
                "isImplied": true,
                "items": {
                    "type": "object",
                    "isImplied": true,
                    "properties": {
                        "sku": { "type": "string", "isImplied": true },
                        "shippedAt": { "type": "string", "format": "date-time", "isImplied": true }
                    }
                }
            },
            "createdTime": { "type": "string", "format": "date-time" },
            "location": { "type": "unsupported-new-type" }
        }
    },
    "job-applications": {
        "type": "object",
        "properties": {
            "candidateId": { "type": "string", "isImplied": true },
            "archived": { "type": "boolean" },
            "attachments": { "type": "array" },
            "metadata": { "type": "object" }
        }
    }
}"#;

fn names_document(names: &[&str]) -> SchemaDocument {
    names.iter().copied().map(ObjectTypeDescriptor::new).collect()
}

// ---------------------------------------------------------------------------
// Full module
// ---------------------------------------------------------------------------

#[test]
fn test_full_module_text() {
    let doc = parse_document(ORDERS_DOCUMENT).unwrap();
    let module = emit_module(&doc).unwrap();

    let expected = "\
import { z } from 'zod';

export const ordersSchema = z.object({
  id: z.string(),
  totalAmount: z.number(),
  billingAddress: z.object({
  city: z.string(),
  zip: z.string().optional()
}),
  lineItems: z.array(z.object({
  sku: z.string(),
  shippedAt: z.string().datetime()
})),
  createdTime: z.string().datetime().optional(),
  location: z.unknown().optional()
});

export const jobapplicationsSchema = z.object({
  candidateId: z.string(),
  archived: z.boolean().optional(),
  attachments: z.array(z.unknown()).optional(),
  metadata: z.object({}).optional()
});

export type RecordType = \"orders\" | \"job-applications\";
";
    assert_eq!(module.as_str(), expected);
    assert_eq!(module.type_names(), ["orders", "job-applications"]);
}

#[test]
fn test_compilation_is_idempotent() {
    let doc = parse_document(ORDERS_DOCUMENT).unwrap();
    let first = emit_module(&doc).unwrap();
    let second = emit_module(&doc).unwrap();
    assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());

    let reparsed = parse_document(ORDERS_DOCUMENT).unwrap();
    assert_eq!(emit_module(&reparsed).unwrap(), first);
}

#[test]
fn test_compilation_does_not_mutate_document() {
    let doc = parse_document(ORDERS_DOCUMENT).unwrap();
    let snapshot = doc.clone();
    emit_module(&doc).unwrap();
    assert_eq!(doc, snapshot);
}

#[test]
fn test_unsupported_kind_still_compiles() {
    let doc: SchemaDocument = [ObjectTypeDescriptor::new("places")
        .with_field("geo", PropertyDescriptor::unknown("unsupported-new-type"))]
    .into_iter()
    .collect();

    let module = emit_module(&doc).unwrap();
    assert!(module.as_str().contains("  geo: z.unknown().optional()\n"));
}

#[test]
fn test_non_string_type_tag_still_compiles() {
    let doc = parse_document(
        r#"{"orders":{"properties":{"id":{"type":["string","null"]},"rank":{"type":3}}}}"#,
    )
    .unwrap();

    let module = emit_module(&doc).unwrap();
    assert!(module.as_str().contains("  id: z.unknown().optional(),\n"));
    assert!(module.as_str().contains("  rank: z.unknown().optional()\n"));
}

// ---------------------------------------------------------------------------
// Union type
// ---------------------------------------------------------------------------

#[test]
fn test_union_uses_lowercased_raw_keys() {
    let module = emit_module(&names_document(&["job-applications", "companies"])).unwrap();
    let union_line = module
        .as_str()
        .lines()
        .find(|line| line.starts_with("export type RecordType"))
        .unwrap();
    assert_eq!(
        union_line,
        "export type RecordType = \"job-applications\" | \"companies\";"
    );
}

#[test]
fn test_union_lowercases_mixed_case_keys() {
    let module = emit_module(&names_document(&["Job Applications", "DEALS"])).unwrap();
    assert!(
        module
            .as_str()
            .ends_with("export type RecordType = \"job applications\" | \"deals\";\n")
    );
    assert!(module.as_str().contains("export const JobApplicationsSchema"));
    assert!(module.as_str().contains("export const DEALSSchema"));
}

// ---------------------------------------------------------------------------
// Fatal errors
// ---------------------------------------------------------------------------

#[test]
fn test_name_collision_aborts() {
    let result = emit_module(&names_document(&["Job Applications", "JobApplications"]));
    assert_eq!(
        result.unwrap_err(),
        CompileError::NameCollision {
            identifier: "JobApplications".to_string(),
            first: "Job Applications".to_string(),
            second: "JobApplications".to_string(),
        }
    );
}

#[test]
fn test_collision_message_names_both_types() {
    let err = emit_module(&names_document(&["job-applications", "jobapplications"])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "object types `job-applications` and `jobapplications` both map to identifier `jobapplications`"
    );
}

#[test]
fn test_malformed_document_message_names_type() {
    let err = parse_document(r#"{ "contacts": 42 }"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed schema document (object type `contacts`): expected an object type description, found a number"
    );
}

#[test]
fn test_default_depth_bound_accepts_realistic_nesting() {
    let mut descriptor = PropertyDescriptor::string();
    for _ in 0..20 {
        descriptor = PropertyDescriptor::array(descriptor);
    }
    let doc: SchemaDocument = [ObjectTypeDescriptor::new("deep").with_field("cube", descriptor)]
        .into_iter()
        .collect();

    assert!(ModuleEmitter::default().emit(&doc).is_ok());
}
