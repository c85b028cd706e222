//! Error types for document loading and artifact writing.
//!
//! Covers I/O, serialization, configuration, compilation and atomic-persist
//! failures under one enum.

use object_schema_core::CompileError;
use thiserror::Error;

/// Errors that can occur while loading documents or writing artifacts.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The document could not be decoded or compiled.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Configuration is readable but not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// None of the configured document sources exists.
    #[error("no schema sources available")]
    NoSourcesAvailable,

    /// The finished artifact could not be moved into place.
    #[error("failed to persist artifact: {0}")]
    PersistError(String),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
