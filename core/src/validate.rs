//! Document validation ahead of emission.
//!
//! Checks the naming invariants the emitter relies on: every object-type name
//! must sanitize to a non-empty, legal identifier, and no two names may
//! sanitize to the same identifier (their declarations would shadow each
//! other).
//!
//! # Examples
//!
//! ```
//! use object_schema_core::*;
//!
//! let doc: SchemaDocument = ["job-applications", "companies"]
//!     .into_iter()
//!     .map(ObjectTypeDescriptor::new)
//!     .collect();
//! assert!(validate_document(&doc).is_empty());
//!
//! let clash: SchemaDocument = ["Job Applications", "JobApplications"]
//!     .into_iter()
//!     .map(ObjectTypeDescriptor::new)
//!     .collect();
//! assert!(matches!(
//!     validate_document(&clash).as_slice(),
//!     [CompileError::NameCollision { .. }]
//! ));
//! ```

use std::collections::HashMap;

use crate::error::CompileError;
use crate::naming::{is_valid_identifier, safe_identifier};
use crate::types::SchemaDocument;

/// Validates the naming invariants of a schema document.
///
/// Stops at the first problem, like the rest of compilation: the result is
/// either empty or holds exactly one error.
pub fn validate_document(document: &SchemaDocument) -> Vec<CompileError> {
    let mut errors = Vec::new();
    let mut seen: HashMap<String, &str> = HashMap::new();

    for name in document.names() {
        let identifier = safe_identifier(name);
        if identifier.is_empty() {
            errors.push(CompileError::EmptyIdentifier(name.to_string()));
            return errors;
        }
        if !is_valid_identifier(&identifier) {
            errors.push(CompileError::InvalidIdentifier {
                name: name.to_string(),
                identifier,
            });
            return errors;
        }
        if let Some(first) = seen.get(&identifier) {
            errors.push(CompileError::NameCollision {
                identifier,
                first: first.to_string(),
                second: name.to_string(),
            });
            return errors;
        }
        seen.insert(identifier, name);
    }

    errors
}
