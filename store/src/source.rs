//! Schema document loading with fallback chains.
//!
//! A document comes either from a single JSON bundle (the full mapping of
//! object-type name to description) or from a directory holding one
//! `<object-type>.json` file per object type, as written by a per-type fetch.
//!
//! ```no_run
//! use object_schema_store::{DocumentSource, SchemaSource, SourceChain};
//!
//! // One bundle file
//! let doc = DocumentSource::Bundle("schemas/app-objects.json".into()).load().unwrap();
//!
//! // Per-type files, falling back to a bundle
//! let loaded = SourceChain::new()
//!     .from_dir("schemas/app-objects/")
//!     .from_bundle("schemas/app-objects.json")
//!     .load()
//!     .unwrap();
//! println!("{} object types from {:?}", loaded.document.len(), loaded.source);
//! ```
//!
//! Directory files are read and decoded in parallel. The document is only
//! assembled after every file has been decoded, in file-name order, so the
//! result does not depend on scheduling.

use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use object_schema_core::{
    CompileError, ObjectTypeDescriptor, SchemaDocument, document_from_value,
    object_type_from_value,
};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// Anything that can produce a complete [`SchemaDocument`].
///
/// Implementations must return either the whole document or an error; the
/// compiler never sees a partial document.
pub trait SchemaSource {
    /// Loads the document.
    fn load(&self) -> Result<SchemaDocument>;
}

/// Describes where a document is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A single JSON file holding the whole document.
    Bundle(PathBuf),
    /// A directory of `<object-type>.json` files.
    Directory(PathBuf),
}

impl SchemaSource for DocumentSource {
    fn load(&self) -> Result<SchemaDocument> {
        match self {
            Self::Bundle(path) => load_bundle(path),
            Self::Directory(path) => load_dir(path),
        }
    }
}

/// Loads a document from a single JSON bundle.
///
/// # Errors
///
/// Returns [`StoreError::IoError`] if the file cannot be read,
/// [`StoreError::JsonError`] if it is not JSON, or [`StoreError::Compile`] if
/// it is not a valid schema document.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<SchemaDocument> {
    let path = path.as_ref();
    let file = fs::File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    let document = document_from_value(value)?;
    debug!(path = %path.display(), object_types = document.len(), "loaded schema bundle");
    Ok(document)
}

/// Loads a document from a directory of per-type JSON files.
///
/// Each `*.json` file holds one object-type description; the file stem is the
/// object-type name. Other files are ignored.
///
/// # Errors
///
/// Returns [`StoreError::IoError`] if the directory or a file cannot be read,
/// [`StoreError::JsonError`] if a file is not JSON, or [`StoreError::Compile`]
/// if a file is not a valid object-type description.
pub fn load_dir(path: impl AsRef<Path>) -> Result<SchemaDocument> {
    let path = path.as_ref();
    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let file_path = entry?.path();
        if file_path.is_file() && file_path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(file_path);
        }
    }
    files.sort();

    let descriptors = files
        .par_iter()
        .map(|file_path| load_object_type(file_path))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        path = %path.display(),
        object_types = descriptors.len(),
        "loaded schema directory"
    );
    Ok(descriptors.into_iter().collect())
}

fn load_object_type(path: &Path) -> Result<ObjectTypeDescriptor> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| CompileError::MalformedDocument {
            type_name: None,
            reason: format!("file name '{}' is not valid UTF-8", path.display()),
        })?;

    let file = fs::File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    let descriptor = object_type_from_value(name, value)?;
    debug!(path = %path.display(), fields = descriptor.fields.len(), "loaded object type");
    Ok(descriptor)
}

/// A document together with the source that produced it.
#[derive(Debug)]
pub struct LoadedDocument {
    pub document: SchemaDocument,
    pub source: DocumentSource,
}

/// Fallback chain of document sources.
///
/// Sources are tried in the order they are added. A source whose path does
/// not exist is skipped; the first one that exists decides the outcome, so a
/// malformed document is reported rather than masked by a later source. If
/// no source exists, [`StoreError::NoSourcesAvailable`] is returned.
///
/// # Example
///
/// ```no_run
/// use object_schema_store::SourceChain;
///
/// let loaded = SourceChain::new()
///     .from_dir("/var/cache/app-objects/")
///     .from_bundle("/opt/app-objects.json")
///     .load()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct SourceChain {
    sources: Vec<DocumentSource>,
}

impl SourceChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory of per-type JSON files.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(DocumentSource::Directory(path.into()));
        self
    }

    /// Adds a single JSON bundle.
    pub fn from_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(DocumentSource::Bundle(path.into()));
        self
    }

    /// Adds an already-described source.
    pub fn with_source(mut self, source: DocumentSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Sources in the order they will be tried.
    pub fn sources(&self) -> &[DocumentSource] {
        &self.sources
    }

    /// Loads from the first source that exists.
    ///
    /// # Errors
    ///
    /// Returns the error of the first existing source if it cannot be
    /// loaded, or [`StoreError::NoSourcesAvailable`] if none exists.
    pub fn load(&self) -> Result<LoadedDocument> {
        for source in &self.sources {
            match source.load() {
                Ok(document) => {
                    return Ok(LoadedDocument {
                        document,
                        source: source.clone(),
                    });
                }
                Err(StoreError::IoError(err)) if err.kind() == io::ErrorKind::NotFound => {
                    warn!(source = ?source, error = %err, "schema source not found");
                }
                Err(err) => return Err(err),
            }
        }

        Err(StoreError::NoSourcesAvailable)
    }
}
