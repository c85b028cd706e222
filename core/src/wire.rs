//! Decoding of the platform's schema wire format.
//!
//! A schema document arrives as a JSON object keyed by object-type name. Each
//! value describes one object type and carries its fields under `properties`
//! (`fields` is accepted as an alias; `properties` wins when both appear).
//! Property descriptors use the members
//! `type`, `format`, `isImplied`, `items` and `properties`; anything else the
//! platform sends (`title`, `readonly`, `referenceUdm`, ...) is ignored.
//!
//! # Examples
//!
//! ```
//! use object_schema_core::{PropertyKind, parse_document};
//!
//! let doc = parse_document(r#"{
//!     "orders": {
//!         "type": "object",
//!         "properties": {
//!             "id": { "type": "string", "isImplied": true },
//!             "createdTime": { "type": "string", "format": "date-time" }
//!         }
//!     }
//! }"#).unwrap();
//!
//! let orders = doc.get("orders").unwrap();
//! assert!(orders.fields["id"].required);
//! assert!(matches!(orders.fields["createdTime"].kind, PropertyKind::String { format: Some(_) }));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::CompileError;
use crate::types::{
    FieldMap, ObjectTypeDescriptor, PropertyDescriptor, PropertyKind, SchemaDocument,
    StringFormat,
};

/// Property descriptor exactly as it appears on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireProperty {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_tag",
        skip_serializing_if = "Option::is_none"
    )]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_implied: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Box<PropertyDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<FieldMap>,
    #[serde(default, skip_serializing)]
    fields: Option<FieldMap>,
}

/// Reads a `type` tag, treating anything but a string as absent.
fn lenient_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(tag) => Some(tag),
        _ => None,
    })
}

impl From<WireProperty> for PropertyDescriptor {
    fn from(wire: WireProperty) -> Self {
        let kind = match wire.kind.as_deref() {
            Some("string") => PropertyKind::String {
                format: wire.format.as_deref().map(StringFormat::parse),
            },
            Some("number") => PropertyKind::Number,
            Some("boolean") => PropertyKind::Boolean,
            Some("array") => PropertyKind::Array { items: wire.items },
            Some("object") => PropertyKind::Object {
                fields: wire.properties.or(wire.fields),
            },
            _ => PropertyKind::Unknown(wire.kind.clone()),
        };

        Self {
            kind,
            required: wire.is_implied == Some(true),
        }
    }
}

impl From<PropertyDescriptor> for WireProperty {
    fn from(descriptor: PropertyDescriptor) -> Self {
        let mut wire = WireProperty {
            kind: descriptor.kind.tag().map(String::from),
            is_implied: descriptor.required.then_some(true),
            ..Default::default()
        };

        match descriptor.kind {
            PropertyKind::String { format } => {
                wire.format = format.map(|f| f.as_str().to_string());
            }
            PropertyKind::Array { items } => wire.items = items,
            PropertyKind::Object { fields } => wire.properties = fields,
            PropertyKind::Number | PropertyKind::Boolean | PropertyKind::Unknown(_) => {}
        }

        wire
    }
}

/// Parses a schema document from JSON text.
///
/// # Errors
///
/// Returns [`CompileError::MalformedDocument`] when the text is not JSON, the
/// top level is not an object, or an object type cannot be decoded. The error
/// names the offending object type where one is known.
pub fn parse_document(json: &str) -> Result<SchemaDocument, CompileError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| CompileError::malformed(None, err.to_string()))?;
    document_from_value(value)
}

/// Builds a schema document from an already-parsed JSON value.
///
/// # Errors
///
/// See [`parse_document`].
pub fn document_from_value(value: Value) -> Result<SchemaDocument, CompileError> {
    let entries = match value {
        Value::Object(entries) => entries,
        other => {
            return Err(CompileError::malformed(
                None,
                format!("expected a mapping of object types, found {}", value_kind(&other)),
            ));
        }
    };

    let mut document = SchemaDocument::new();
    for (name, body) in entries {
        let descriptor = object_type_from_value(&name, body)?;
        document.insert(descriptor);
    }
    Ok(document)
}

/// Decodes one object-type description.
///
/// `name` is the object-type key; it is not read from the body.
///
/// # Errors
///
/// Returns [`CompileError::MalformedDocument`] naming `name` when the body is
/// not an object, has no `properties`/`fields` mapping, or holds a property
/// that is not a valid descriptor.
pub fn object_type_from_value(name: &str, body: Value) -> Result<ObjectTypeDescriptor, CompileError> {
    let mut body = match body {
        Value::Object(body) => body,
        other => {
            return Err(CompileError::malformed(
                Some(name),
                format!("expected an object type description, found {}", value_kind(&other)),
            ));
        }
    };

    let members = match body.remove("properties").or_else(|| body.remove("fields")) {
        Some(Value::Object(members)) => members,
        Some(other) => {
            return Err(CompileError::malformed(
                Some(name),
                format!("`properties` must be a mapping, found {}", value_kind(&other)),
            ));
        }
        None => {
            return Err(CompileError::malformed(
                Some(name),
                "missing `properties` mapping".to_string(),
            ));
        }
    };

    let mut descriptor = ObjectTypeDescriptor::new(name);
    for (field, raw) in members {
        let property: PropertyDescriptor = serde_json::from_value(raw).map_err(|err| {
            CompileError::malformed(Some(name), format!("property `{field}`: {err}"))
        })?;
        descriptor.fields.insert(field, property);
    }
    Ok(descriptor)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
