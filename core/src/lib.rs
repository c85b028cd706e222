//! Schema compiler for platform object types.
//!
//! Takes the platform's dynamically-typed description of each object type and
//! emits a self-contained zod module: one validator declaration per object
//! type plus a closed union of all object-type names.
//!
//! - [`SchemaDocument`] / [`ObjectTypeDescriptor`] / [`PropertyDescriptor`]
//!   — the typed input model, decoded from the wire with [`parse_document`].
//! - [`PropertyTypeResolver`] — one descriptor to one validator expression.
//! - [`ObjectCompiler`] — a field map to a `z.object({...})` expression.
//! - [`ModuleEmitter`] — a whole document to a [`CompiledModule`].
//!
//! Compilation is a pure function of the document. Unrecognized property
//! kinds fall back to `z.unknown()`; structural problems (name collisions,
//! illegal identifiers, excessive nesting, malformed input) are fatal
//! [`CompileError`]s.
//!
//! # Example
//!
//! ```
//! use object_schema_core::*;
//!
//! let doc = parse_document(r#"{
//!     "orders": {
//!         "properties": {
//!             "id": { "type": "string", "isImplied": true },
//!             "lineItems": {
//!                 "type": "array",
//!                 "items": {
//!                     "type": "object",
//!                     "isImplied": true,
//!                     "properties": { "sku": { "type": "string" } }
//!                 }
//!             }
//!         }
//!     }
//! }"#).unwrap();
//!
//! let module = emit_module(&doc).unwrap();
//! assert!(module.as_str().contains("export const ordersSchema = z.object({"));
//! assert!(module.as_str().contains("lineItems: z.array(z.object({"));
//! assert!(module.as_str().ends_with("export type RecordType = \"orders\";\n"));
//! ```

mod compile;
mod emit;
mod error;
mod naming;
mod resolve;
mod types;
mod validate;
mod wire;
mod zod;

pub use compile::ObjectCompiler;
pub use emit::{DECLARATION_SUFFIX, DEFAULT_UNION_NAME, EmitOptions, ModuleEmitter, emit_module};
pub use error::CompileError;
pub use naming::{is_valid_identifier, property_key, safe_identifier, string_literal};
pub use resolve::{DEFAULT_MAX_DEPTH, PropertyTypeResolver};
pub use types::*;
pub use validate::validate_document;
pub use wire::{document_from_value, object_type_from_value, parse_document};
