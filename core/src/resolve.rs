//! Property type resolution.
//!
//! Maps one [`PropertyDescriptor`] to a validator expression, recursing into
//! array element types and nested objects. Unrecognized kinds resolve to the
//! unconstrained validator rather than failing, so a new upstream kind never
//! breaks generation. The only failure is exceeding the nesting bound.

use tracing::info;

use crate::compile::compile_fields;
use crate::error::CompileError;
use crate::types::{PropertyDescriptor, PropertyKind, StringFormat};
use crate::zod;

/// Default bound on descriptor nesting (object and array levels).
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Position of the descriptor being resolved, for depth checks and error
/// paths such as `orders.lineItems.lineItemsItem.sku`.
#[derive(Debug)]
pub(crate) struct Scope {
    root: String,
    segments: Vec<String>,
}

impl Scope {
    pub(crate) fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            segments: Vec::new(),
        }
    }

    fn enter(&mut self, segment: &str, limit: usize) -> Result<(), CompileError> {
        self.segments.push(segment.to_string());
        if self.segments.len() > limit {
            return Err(CompileError::DepthExceeded {
                type_name: (!self.root.is_empty()).then(|| self.root.clone()),
                path: self.path(),
                limit,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.segments.pop();
    }

    pub(crate) fn path(&self) -> String {
        let mut parts = Vec::with_capacity(self.segments.len() + 1);
        if !self.root.is_empty() {
            parts.push(self.root.as_str());
        }
        parts.extend(self.segments.iter().map(String::as_str));
        parts.join(".")
    }
}

/// Resolves property descriptors to validator expressions.
///
/// # Examples
///
/// ```
/// use object_schema_core::{PropertyDescriptor, PropertyTypeResolver};
///
/// let resolver = PropertyTypeResolver::default();
/// let expr = resolver
///     .resolve(&PropertyDescriptor::array(PropertyDescriptor::date_time().required()), "stamps")
///     .unwrap();
/// assert_eq!(expr, "z.array(z.string().datetime()).optional()");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyTypeResolver {
    max_depth: usize,
}

impl Default for PropertyTypeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl PropertyTypeResolver {
    /// Creates a resolver that rejects nesting deeper than `max_depth`.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Nesting bound enforced by this resolver.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolves `descriptor` to a validator expression.
    ///
    /// `hint` names the property. It only labels nested positions in logs and
    /// errors; it never changes the generated expression.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::DepthExceeded`] if the descriptor nests deeper
    /// than [`max_depth`](Self::max_depth).
    pub fn resolve(&self, descriptor: &PropertyDescriptor, hint: &str) -> Result<String, CompileError> {
        self.resolve_in(descriptor, hint, &mut Scope::new(""))
    }

    pub(crate) fn resolve_in(
        &self,
        descriptor: &PropertyDescriptor,
        hint: &str,
        scope: &mut Scope,
    ) -> Result<String, CompileError> {
        scope.enter(hint, self.max_depth)?;
        let base = self.base_expression(descriptor, hint, scope);
        scope.leave();

        let mut expr = base?;
        if !descriptor.required {
            expr.push_str(zod::OPTIONAL);
        }
        Ok(expr)
    }

    fn base_expression(
        &self,
        descriptor: &PropertyDescriptor,
        hint: &str,
        scope: &mut Scope,
    ) -> Result<String, CompileError> {
        let expr = match &descriptor.kind {
            PropertyKind::String {
                format: Some(StringFormat::DateTime),
            } => zod::DATE_TIME.to_string(),
            PropertyKind::String { .. } => zod::STRING.to_string(),
            PropertyKind::Number => zod::NUMBER.to_string(),
            PropertyKind::Boolean => zod::BOOLEAN.to_string(),
            PropertyKind::Array { items: Some(items) } => {
                let item = self.resolve_in(items, &format!("{hint}Item"), scope)?;
                zod::array(&item)
            }
            PropertyKind::Array { items: None } => zod::array(zod::UNKNOWN),
            PropertyKind::Object {
                fields: Some(fields),
            } => compile_fields(self, fields, scope)?,
            PropertyKind::Object { fields: None } => zod::EMPTY_OBJECT.to_string(),
            PropertyKind::Unknown(tag) => {
                info!(
                    path = %scope.path(),
                    kind = tag.as_deref().unwrap_or("<none>"),
                    "unrecognized property kind, using unconstrained validator"
                );
                zod::UNKNOWN.to_string()
            }
        };
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldMap;

    fn resolve(descriptor: &PropertyDescriptor) -> String {
        PropertyTypeResolver::default()
            .resolve(descriptor, "field")
            .unwrap()
    }

    #[test]
    fn test_primitive_mappings() {
        assert_eq!(resolve(&PropertyDescriptor::string().required()), "z.string()");
        assert_eq!(
            resolve(&PropertyDescriptor::date_time().required()),
            "z.string().datetime()"
        );
        assert_eq!(resolve(&PropertyDescriptor::number().required()), "z.number()");
        assert_eq!(resolve(&PropertyDescriptor::boolean().required()), "z.boolean()");
    }

    #[test]
    fn test_other_string_formats_are_plain_strings() {
        let email = PropertyDescriptor::new(PropertyKind::String {
            format: Some(StringFormat::parse("email")),
        })
        .required();
        assert_eq!(resolve(&email), "z.string()");
    }

    #[test]
    fn test_optional_modifier_only_when_not_required() {
        let cases = [
            PropertyDescriptor::string(),
            PropertyDescriptor::number(),
            PropertyDescriptor::untyped_array(),
            PropertyDescriptor::open_object(),
            PropertyDescriptor::unknown("geo"),
        ];
        for descriptor in cases {
            assert!(resolve(&descriptor).ends_with(".optional()"));
            assert!(!resolve(&descriptor.required()).ends_with(".optional()"));
        }
    }

    #[test]
    fn test_array_without_items() {
        assert_eq!(
            resolve(&PropertyDescriptor::untyped_array().required()),
            "z.array(z.unknown())"
        );
    }

    #[test]
    fn test_item_optionality_is_independent() {
        let arr = PropertyDescriptor::array(PropertyDescriptor::number()).required();
        assert_eq!(resolve(&arr), "z.array(z.number().optional())");
    }

    #[test]
    fn test_open_object_differs_from_unknown() {
        let open = resolve(&PropertyDescriptor::open_object().required());
        let unknown = resolve(&PropertyDescriptor::unknown("mystery").required());
        assert_eq!(open, "z.object({})");
        assert_eq!(unknown, "z.unknown()");
    }

    #[test]
    fn test_unsupported_kind_falls_back() {
        let descriptor = PropertyDescriptor::unknown("unsupported-new-type");
        assert_eq!(resolve(&descriptor), "z.unknown().optional()");
        assert_eq!(
            resolve(&PropertyDescriptor::new(PropertyKind::Unknown(None)).required()),
            "z.unknown()"
        );
    }

    #[test]
    fn test_nested_object() {
        let mut fields = FieldMap::new();
        fields.insert("city".into(), PropertyDescriptor::string().required());
        fields.insert("zip".into(), PropertyDescriptor::string());
        let address = PropertyDescriptor::object(fields).required();

        assert_eq!(
            resolve(&address),
            "z.object({\n  city: z.string(),\n  zip: z.string().optional()\n})"
        );
    }

    #[test]
    fn test_depth_bound_rejects_deep_nesting() {
        let mut descriptor = PropertyDescriptor::string();
        for _ in 0..5 {
            descriptor = PropertyDescriptor::array(descriptor);
        }

        let resolver = PropertyTypeResolver::new(5);
        let err = resolver.resolve(&descriptor, "tags").unwrap_err();
        assert_eq!(
            err,
            CompileError::DepthExceeded {
                type_name: None,
                path: "tags.tagsItem.tagsItemItem.tagsItemItemItem.tagsItemItemItemItem.tagsItemItemItemItemItem"
                    .to_string(),
                limit: 5,
            }
        );

        assert!(PropertyTypeResolver::new(6).resolve(&descriptor, "tags").is_ok());
    }
}
