//! Object compilation: a field map becomes one composite object validator.

use crate::error::CompileError;
use crate::naming::property_key;
use crate::resolve::{PropertyTypeResolver, Scope};
use crate::types::FieldMap;
use crate::zod;

/// Compiles ordered field maps into object validator expressions.
///
/// Entries are emitted in field-map order. An empty map compiles to the
/// explicit empty-object validator.
///
/// # Examples
///
/// ```
/// use object_schema_core::{FieldMap, ObjectCompiler, PropertyDescriptor};
///
/// let mut fields = FieldMap::new();
/// fields.insert("id".into(), PropertyDescriptor::string().required());
/// fields.insert("total".into(), PropertyDescriptor::number());
///
/// let compiler = ObjectCompiler::default();
/// assert_eq!(
///     compiler.compile(&fields).unwrap(),
///     "z.object({\n  id: z.string(),\n  total: z.number().optional()\n})"
/// );
/// assert_eq!(compiler.compile(&FieldMap::new()).unwrap(), "z.object({})");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectCompiler {
    resolver: PropertyTypeResolver,
}

impl ObjectCompiler {
    /// Creates a compiler that resolves fields with `resolver`.
    pub fn new(resolver: PropertyTypeResolver) -> Self {
        Self { resolver }
    }

    /// Compiles `fields` into an object validator expression.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::DepthExceeded`] if any field nests deeper than
    /// the resolver allows.
    pub fn compile(&self, fields: &FieldMap) -> Result<String, CompileError> {
        compile_fields(&self.resolver, fields, &mut Scope::new(""))
    }

    pub(crate) fn compile_in(&self, fields: &FieldMap, scope: &mut Scope) -> Result<String, CompileError> {
        compile_fields(&self.resolver, fields, scope)
    }
}

pub(crate) fn compile_fields(
    resolver: &PropertyTypeResolver,
    fields: &FieldMap,
    scope: &mut Scope,
) -> Result<String, CompileError> {
    let mut entries = Vec::with_capacity(fields.len());
    for (name, descriptor) in fields {
        let expr = resolver.resolve_in(descriptor, name, scope)?;
        entries.push(format!("{}{}: {expr}", zod::FIELD_INDENT, property_key(name)));
    }
    Ok(zod::object(&entries))
}
