//! Filesystem side of the schema compiler.
//!
//! Loads schema documents, reads generator configuration, and writes the
//! compiled module atomically. Compilation itself lives in
//! `object-schema-core` and never touches the filesystem.
//!
//! # Quick start
//!
//! ```no_run
//! use object_schema_core::ModuleEmitter;
//! use object_schema_store::{ArtifactWriter, GeneratorConfig, SourceChain};
//!
//! let config = GeneratorConfig::load("schema-codegen.yml").unwrap();
//! let loaded = SourceChain::new()
//!     .from_dir("schemas/app-objects/")
//!     .from_bundle("schemas/app-objects.json")
//!     .load()
//!     .unwrap();
//!
//! let document = config.select(&loaded.document);
//! let module = ModuleEmitter::new(config.emit_options()).emit(&document).unwrap();
//! let report = ArtifactWriter::new(&config.output).write(&module).unwrap();
//! println!("compiled {}", report.object_types.join(", "));
//! ```

mod config;
mod error;
mod source;
mod writer;

pub use config::{DEFAULT_OUTPUT, GeneratorConfig};
pub use error::{Result, StoreError};
pub use source::{
    DocumentSource, LoadedDocument, SchemaSource, SourceChain, load_bundle, load_dir,
};
pub use writer::{ArtifactReport, ArtifactWriter, sha256_hex};
