//! Errors raised while decoding or compiling a schema document.
//!
//! Only structural problems are errors. An unrecognized property kind is not:
//! it compiles to the unconstrained validator and is logged instead.

use thiserror::Error;

/// Fatal compilation errors.
///
/// Any of these aborts the whole run. There is no per-type partial success,
/// since the emitted union type must agree with every emitted declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Two object-type names sanitize to the same declaration identifier.
    #[error("object types `{first}` and `{second}` both map to identifier `{identifier}`")]
    NameCollision {
        identifier: String,
        first: String,
        second: String,
    },
    /// The object-type name is empty once whitespace and hyphens are removed.
    #[error("object type name `{0}` leaves an empty identifier after sanitization")]
    EmptyIdentifier(String),
    /// The sanitized name is not a legal identifier in the generated module.
    #[error("object type name `{name}` sanitizes to invalid identifier `{identifier}`")]
    InvalidIdentifier { name: String, identifier: String },
    /// Descriptor nesting exceeded the configured bound. `path` starts with
    /// the object type when one is known.
    #[error("nesting depth exceeds {limit} at `{path}`")]
    DepthExceeded {
        type_name: Option<String>,
        path: String,
        limit: usize,
    },
    /// The input cannot be read as a schema document.
    #[error("malformed schema document{}: {reason}", type_context(.type_name))]
    MalformedDocument {
        type_name: Option<String>,
        reason: String,
    },
}

impl CompileError {
    pub(crate) fn malformed(type_name: Option<&str>, reason: String) -> Self {
        Self::MalformedDocument {
            type_name: type_name.map(String::from),
            reason,
        }
    }
}

fn type_context(type_name: &Option<String>) -> String {
    match type_name {
        Some(name) => format!(" (object type `{name}`)"),
        None => String::new(),
    }
}
