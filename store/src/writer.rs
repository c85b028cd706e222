//! Atomic artifact writing.
//!
//! The generated module is written to a temporary file in the destination
//! directory and renamed over the target, so readers see either the previous
//! artifact or the complete new one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use object_schema_core::CompiledModule;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{Result, StoreError};

/// Summary of a written (or checked) artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    /// Artifact path.
    pub output: PathBuf,
    /// Size of the generated text in bytes.
    pub bytes: usize,
    /// Hex-encoded SHA-256 of the generated text.
    pub sha256: String,
    /// Object types compiled into the artifact, in document order.
    pub object_types: Vec<String>,
}

impl ArtifactReport {
    /// Builds a report for `module` destined for `output`.
    pub fn new(output: impl Into<PathBuf>, module: &CompiledModule) -> Self {
        Self {
            output: output.into(),
            bytes: module.as_str().len(),
            sha256: sha256_hex(module.as_str().as_bytes()),
            object_types: module.type_names().to_vec(),
        }
    }
}

/// Writes compiled modules to a fixed path.
///
/// # Examples
///
/// ```no_run
/// use object_schema_core::{SchemaDocument, emit_module};
/// use object_schema_store::ArtifactWriter;
///
/// let module = emit_module(&SchemaDocument::new()).unwrap();
/// let report = ArtifactWriter::new("src/lib/schemas.ts").write(&module).unwrap();
/// println!("wrote {} bytes ({})", report.bytes, report.sha256);
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    path: PathBuf,
}

impl ArtifactWriter {
    /// Creates a writer targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `module` atomically, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IoError`] if the temporary file cannot be
    /// created or written, or [`StoreError::PersistError`] if it cannot be
    /// renamed into place. The target is left untouched on failure.
    pub fn write(&self, module: &CompiledModule) -> Result<ArtifactReport> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(module.as_str().as_bytes())?;
        staged.as_file().sync_all()?;
        staged
            .persist(&self.path)
            .map_err(|err| StoreError::PersistError(format!("{}: {}", self.path.display(), err.error)))?;

        let report = ArtifactReport::new(&self.path, module);
        info!(
            path = %self.path.display(),
            bytes = report.bytes,
            object_types = report.object_types.len(),
            "wrote validator module"
        );
        Ok(report)
    }

    /// Returns `true` if the file at the target path already holds exactly
    /// the text of `module`. A missing file is not up to date.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IoError`] for read failures other than the file
    /// not existing.
    pub fn is_up_to_date(&self, module: &CompiledModule) -> Result<bool> {
        match fs::read(&self.path) {
            Ok(existing) => Ok(existing == module.as_str().as_bytes()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Hex-encoded SHA-256 digest of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
