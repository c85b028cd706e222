//! Typed model of a platform schema document.
//!
//! The platform describes each object type as a loosely-typed JSON tree. This
//! module gives that tree an explicit shape: every property is a
//! [`PropertyDescriptor`] whose [`PropertyKind`] carries exactly the payload
//! its tag allows, so the resolver can match on it exhaustively.
//!
//! All collections keep insertion order. Generated code follows the order the
//! platform reported, which keeps diffs of the emitted module stable.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::wire::WireProperty;

/// Ordered mapping from field name to its descriptor.
pub type FieldMap = IndexMap<String, PropertyDescriptor>;

/// Refinement tag attached to a string property.
///
/// # Examples
///
/// ```
/// use object_schema_core::StringFormat;
///
/// assert_eq!(StringFormat::parse("date-time"), StringFormat::DateTime);
/// assert_eq!(StringFormat::parse("email").as_str(), "email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringFormat {
    /// ISO-8601 date-time (`"date-time"`).
    DateTime,
    /// Any other format tag. Carried through but not enforced.
    Other(String),
}

impl StringFormat {
    /// Parses a wire format tag.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "date-time" => Self::DateTime,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::DateTime => "date-time",
            Self::Other(tag) => tag,
        }
    }
}

/// Kind of a property, with the payload each kind may carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// `type: "string"`, optionally refined by a format.
    String { format: Option<StringFormat> },
    /// `type: "number"`.
    Number,
    /// `type: "boolean"`.
    Boolean,
    /// `type: "array"`; `items` is absent when the element type is unknown.
    Array { items: Option<Box<PropertyDescriptor>> },
    /// `type: "object"`; `fields` is absent when the shape is open.
    Object { fields: Option<FieldMap> },
    /// Any other tag, or no tag at all. Holds the raw tag when present.
    Unknown(Option<String>),
}

impl PropertyKind {
    /// Returns the wire tag for this kind, if it has one.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::String { .. } => Some("string"),
            Self::Number => Some("number"),
            Self::Boolean => Some("boolean"),
            Self::Array { .. } => Some("array"),
            Self::Object { .. } => Some("object"),
            Self::Unknown(tag) => tag.as_deref(),
        }
    }
}

/// Schema-level description of one field.
///
/// A field is strictly required only when the platform marks it as implied;
/// everything else is optional. Deserializes from and serializes to the
/// platform wire shape (`type`, `format`, `isImplied`, `items`,
/// `properties`).
///
/// # Examples
///
/// ```
/// use object_schema_core::{PropertyDescriptor, PropertyKind};
///
/// let id = PropertyDescriptor::string().required();
/// assert!(id.required);
///
/// let tags = PropertyDescriptor::array(PropertyDescriptor::string());
/// assert!(matches!(tags.kind, PropertyKind::Array { items: Some(_) }));
/// assert!(!tags.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireProperty", into = "WireProperty")]
pub struct PropertyDescriptor {
    /// Kind and kind-specific payload.
    pub kind: PropertyKind,
    /// `true` only when the platform guarantees the field is present.
    pub required: bool,
}

impl PropertyDescriptor {
    /// Creates an optional descriptor of the given kind.
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            required: false,
        }
    }

    /// Plain string.
    pub fn string() -> Self {
        Self::new(PropertyKind::String { format: None })
    }

    /// ISO-8601 date-time string.
    pub fn date_time() -> Self {
        Self::new(PropertyKind::String {
            format: Some(StringFormat::DateTime),
        })
    }

    /// Number without range constraints.
    pub fn number() -> Self {
        Self::new(PropertyKind::Number)
    }

    /// Boolean.
    pub fn boolean() -> Self {
        Self::new(PropertyKind::Boolean)
    }

    /// Array whose elements match `item`.
    pub fn array(item: PropertyDescriptor) -> Self {
        Self::new(PropertyKind::Array {
            items: Some(Box::new(item)),
        })
    }

    /// Array with no declared element type.
    pub fn untyped_array() -> Self {
        Self::new(PropertyKind::Array { items: None })
    }

    /// Nested object with the given fields.
    pub fn object(fields: FieldMap) -> Self {
        Self::new(PropertyKind::Object {
            fields: Some(fields),
        })
    }

    /// Object with no declared fields.
    pub fn open_object() -> Self {
        Self::new(PropertyKind::Object { fields: None })
    }

    /// Unrecognized kind tag.
    pub fn unknown(tag: impl Into<String>) -> Self {
        Self::new(PropertyKind::Unknown(Some(tag.into())))
    }

    /// Marks the descriptor as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// One named object type and its fields.
///
/// # Examples
///
/// ```
/// use object_schema_core::{ObjectTypeDescriptor, PropertyDescriptor};
///
/// let orders = ObjectTypeDescriptor::new("orders")
///     .with_field("id", PropertyDescriptor::string().required())
///     .with_field("total", PropertyDescriptor::number());
/// assert_eq!(orders.fields.len(), 2);
/// assert_eq!(orders.fields.get_index(0).map(|(k, _)| k.as_str()), Some("id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTypeDescriptor {
    /// Object-type name as reported by the platform (e.g. `"job-applications"`).
    pub name: String,
    /// Fields in platform order.
    pub fields: FieldMap,
}

impl ObjectTypeDescriptor {
    /// Creates an object type with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: FieldMap::new(),
        }
    }

    /// Appends a field, replacing any existing field of the same name in place.
    pub fn with_field(mut self, name: impl Into<String>, descriptor: PropertyDescriptor) -> Self {
        self.fields.insert(name.into(), descriptor);
        self
    }
}

impl Serialize for ObjectTypeDescriptor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "object")?;
        map.serialize_entry("properties", &self.fields)?;
        map.end()
    }
}

/// The full compiler input: object types keyed by name, in platform order.
///
/// # Examples
///
/// ```
/// use object_schema_core::{ObjectTypeDescriptor, SchemaDocument};
///
/// let mut doc = SchemaDocument::new();
/// doc.insert(ObjectTypeDescriptor::new("orders"));
/// doc.insert(ObjectTypeDescriptor::new("contacts"));
/// assert_eq!(doc.names().collect::<Vec<_>>(), ["orders", "contacts"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    types: IndexMap<String, ObjectTypeDescriptor>,
}

impl SchemaDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object type keyed by its name.
    ///
    /// Returns the previous descriptor when the name was already present; the
    /// replacement keeps the original position.
    pub fn insert(&mut self, descriptor: ObjectTypeDescriptor) -> Option<ObjectTypeDescriptor> {
        self.types.insert(descriptor.name.clone(), descriptor)
    }

    /// Looks up an object type by name.
    pub fn get(&self, name: &str) -> Option<&ObjectTypeDescriptor> {
        self.types.get(name)
    }

    /// Returns `true` if the document has an object type named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of object types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if the document has no object types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Object-type names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Object types in document order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectTypeDescriptor> {
        self.types.values()
    }

    /// Returns a new document holding only the object types `keep` accepts.
    ///
    /// # Examples
    ///
    /// ```
    /// use object_schema_core::{ObjectTypeDescriptor, SchemaDocument};
    ///
    /// let doc: SchemaDocument = ["orders", "contacts", "deals"]
    ///     .into_iter()
    ///     .map(ObjectTypeDescriptor::new)
    ///     .collect();
    /// let subset = doc.filtered(|name| name != "contacts");
    /// assert_eq!(subset.names().collect::<Vec<_>>(), ["orders", "deals"]);
    /// assert_eq!(doc.len(), 3);
    /// ```
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        self.types
            .values()
            .filter(|descriptor| keep(&descriptor.name))
            .cloned()
            .collect()
    }
}

impl FromIterator<ObjectTypeDescriptor> for SchemaDocument {
    fn from_iter<I: IntoIterator<Item = ObjectTypeDescriptor>>(iter: I) -> Self {
        let mut doc = Self::new();
        for descriptor in iter {
            doc.insert(descriptor);
        }
        doc
    }
}

impl Serialize for SchemaDocument {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.types.iter())
    }
}

/// Emitted validator module.
///
/// Immutable once produced. Carries the generated text and the object-type
/// names it covers, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledModule {
    text: String,
    type_names: Vec<String>,
}

impl CompiledModule {
    pub(crate) fn new(text: String, type_names: Vec<String>) -> Self {
        Self { text, type_names }
    }

    /// Generated source text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Object-type names compiled into this module.
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    /// Consumes the module, returning the generated text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for CompiledModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
