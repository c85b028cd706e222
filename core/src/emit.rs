//! Module emission.
//!
//! Produces the full validator module for a [`SchemaDocument`]:
//!
//! 1. the import header;
//! 2. one `export const <Identifier>Schema = z.object({...});` per object
//!    type, in document order;
//! 3. one closed union type over the lower-cased object-type names.
//!
//! Emission is all-or-nothing. The document is validated first and every
//! declaration is compiled before any text is assembled, so a failure never
//! yields a partial module.

use indexmap::IndexSet;
use tracing::debug;

use crate::compile::ObjectCompiler;
use crate::error::CompileError;
use crate::naming::{is_valid_identifier, safe_identifier, string_literal};
use crate::resolve::{DEFAULT_MAX_DEPTH, PropertyTypeResolver, Scope};
use crate::types::{CompiledModule, SchemaDocument};
use crate::validate::validate_document;
use crate::zod;

/// Default name of the emitted union type.
pub const DEFAULT_UNION_NAME: &str = "RecordType";

/// Suffix appended to each sanitized identifier.
pub const DECLARATION_SUFFIX: &str = "Schema";

/// Options controlling module emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Maximum descriptor nesting depth.
    pub max_depth: usize,
    /// Name of the union type listing every object-type name.
    pub union_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            union_name: DEFAULT_UNION_NAME.to_string(),
        }
    }
}

/// Compiles whole schema documents into validator modules.
///
/// # Examples
///
/// ```
/// use object_schema_core::*;
///
/// let doc: SchemaDocument = [ObjectTypeDescriptor::new("job-applications")
///     .with_field("id", PropertyDescriptor::string().required())]
/// .into_iter()
/// .collect();
///
/// let module = ModuleEmitter::default().emit(&doc).unwrap();
/// assert_eq!(
///     module.as_str(),
///     "import { z } from 'zod';\n\
///      \n\
///      export const jobapplicationsSchema = z.object({\n  id: z.string()\n});\n\
///      \n\
///      export type RecordType = \"job-applications\";\n"
/// );
/// assert_eq!(module.type_names(), ["job-applications"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleEmitter {
    options: EmitOptions,
}

impl ModuleEmitter {
    /// Creates an emitter with the given options.
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Compiles `document` into a module.
    ///
    /// Pure and deterministic: the same document always yields byte-identical
    /// text.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`] found: an invalid union name, a
    /// naming problem reported by [`validate_document`], or a nesting depth
    /// violation.
    pub fn emit(&self, document: &SchemaDocument) -> Result<CompiledModule, CompileError> {
        if !is_valid_identifier(&self.options.union_name) {
            return Err(CompileError::InvalidIdentifier {
                name: self.options.union_name.clone(),
                identifier: self.options.union_name.clone(),
            });
        }
        if let Some(err) = validate_document(document).into_iter().next() {
            return Err(err);
        }

        let compiler = ObjectCompiler::new(PropertyTypeResolver::new(self.options.max_depth));
        let mut builder = ModuleBuilder::new();
        builder.push(format!("{}\n", zod::IMPORT));

        for object_type in document.iter() {
            let identifier = safe_identifier(&object_type.name);
            let mut scope = Scope::new(&object_type.name);
            let expr = compiler.compile_in(&object_type.fields, &mut scope)?;
            debug!(
                object_type = %object_type.name,
                fields = object_type.fields.len(),
                "compiled object type"
            );
            builder.push(format!(
                "export const {identifier}{DECLARATION_SUFFIX} = {expr};\n"
            ));
        }

        builder.push(union_declaration(&self.options.union_name, document));

        let type_names = document.names().map(String::from).collect();
        Ok(CompiledModule::new(builder.finish(), type_names))
    }
}

/// Compiles `document` with default options.
///
/// # Errors
///
/// See [`ModuleEmitter::emit`].
pub fn emit_module(document: &SchemaDocument) -> Result<CompiledModule, CompileError> {
    ModuleEmitter::default().emit(document)
}

/// Ordered list of top-level blocks, separated by one blank line on output.
struct ModuleBuilder {
    blocks: Vec<String>,
}

impl ModuleBuilder {
    fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    fn push(&mut self, block: String) {
        self.blocks.push(block);
    }

    fn finish(self) -> String {
        self.blocks.join("\n")
    }
}

/// Union over the lower-cased raw keys. Keys are not sanitized: members are
/// string literals, not identifiers.
fn union_declaration(union_name: &str, document: &SchemaDocument) -> String {
    let members: IndexSet<String> = document
        .names()
        .map(|name| string_literal(&name.to_lowercase()))
        .collect();

    let body = if members.is_empty() {
        zod::EMPTY_UNION.to_string()
    } else {
        members
            .into_iter()
            .collect::<Vec<_>>()
            .join(zod::UNION_SEPARATOR)
    };

    format!("export type {union_name} = {body};\n")
}
