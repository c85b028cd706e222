//! Generator configuration.
//!
//! Loaded from a YAML file (typically `schema-codegen.yml` in the project
//! root). Every field is optional.
//!
//! # Example YAML
//!
//! ```yaml
//! output: src/lib/schemas.ts
//! union_name: RecordType
//! max_depth: 32
//! include: []
//! exclude:
//!   - files
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use object_schema_core::{
    DEFAULT_MAX_DEPTH, DEFAULT_UNION_NAME, EmitOptions, SchemaDocument, is_valid_identifier,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, StoreError};

/// Default artifact location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "src/lib/schemas.ts";

/// Settings for one generation run.
///
/// # Examples
///
/// ```
/// # use object_schema_store::GeneratorConfig;
/// let config: GeneratorConfig = serde_yaml::from_str("exclude: [files]").unwrap();
/// assert!(config.is_allowed("orders"));
/// assert!(!config.is_allowed("files"));
/// assert_eq!(config.union_name, "RecordType");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Where the generated module is written.
    pub output: PathBuf,
    /// Name of the emitted union type.
    pub union_name: String,
    /// Maximum descriptor nesting depth.
    pub max_depth: usize,
    /// Object types to compile (empty = all).
    pub include: Vec<String>,
    /// Object types to skip.
    pub exclude: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            union_name: DEFAULT_UNION_NAME.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from a YAML file and checks it.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) if the file cannot be
    /// read, [`YamlError`](crate::StoreError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](crate::StoreError::InvalidConfig) if a value is out
    /// of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(BufReader::new(file))?;
        config.check()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::StoreError::IoError) if the file cannot be
    /// written, or [`YamlError`](crate::StoreError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Rejects values the emitter cannot work with.
    pub fn check(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(StoreError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if !is_valid_identifier(&self.union_name) {
            return Err(StoreError::InvalidConfig(format!(
                "union_name `{}` is not a valid identifier",
                self.union_name
            )));
        }
        Ok(())
    }

    /// Returns `true` if `object_type` is in the exclusion list.
    pub fn is_excluded(&self, object_type: &str) -> bool {
        self.exclude.iter().any(|t| t == object_type)
    }

    /// Returns `true` if `object_type` should be compiled.
    ///
    /// With an empty include list every non-excluded type is allowed.
    /// Exclusions always win.
    pub fn is_allowed(&self, object_type: &str) -> bool {
        if self.is_excluded(object_type) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|t| t == object_type)
    }

    /// Returns the subset of `document` this configuration selects.
    ///
    /// Include entries that name no object type are logged and ignored.
    pub fn select(&self, document: &SchemaDocument) -> SchemaDocument {
        for name in &self.include {
            if !document.contains(name) {
                warn!(object_type = %name, "included object type not present in document");
            }
        }
        document.filtered(|name| self.is_allowed(name))
    }

    /// Emitter options derived from this configuration.
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            max_depth: self.max_depth,
            union_name: self.union_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use object_schema_core::ObjectTypeDescriptor;

    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
output: generated/objects.ts
union_name: ObjectTypeKey
max_depth: 8
include:
  - orders
  - contacts
exclude:
  - contacts
"#
    }

    #[test]
    fn test_parse_full_config() {
        let config: GeneratorConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.output, PathBuf::from("generated/objects.ts"));
        assert_eq!(config.union_name, "ObjectTypeKey");
        assert_eq!(config.max_depth, 8);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: GeneratorConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_exclusion_beats_inclusion() {
        let config: GeneratorConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert!(config.is_allowed("orders"));
        assert!(!config.is_allowed("contacts"));
        assert!(!config.is_allowed("deals"));
    }

    #[test]
    fn test_select_keeps_document_order() {
        let config: GeneratorConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        let doc: SchemaDocument = ["deals", "contacts", "orders"]
            .into_iter()
            .map(ObjectTypeDescriptor::new)
            .collect();

        let selected = config.select(&doc);
        assert_eq!(selected.names().collect::<Vec<_>>(), ["orders"]);
    }

    #[test]
    fn test_check_rejects_zero_depth() {
        let config = GeneratorConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(matches!(config.check(), Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_check_rejects_bad_union_name() {
        let config = GeneratorConfig {
            union_name: "record-type".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.check(), Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema-codegen.yml");
        let config: GeneratorConfig = serde_yaml::from_str(sample_yaml()).unwrap();

        config.save(&path).unwrap();
        assert_eq!(GeneratorConfig::load(&path).unwrap(), config);
    }
}
