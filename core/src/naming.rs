//! Identifier and literal helpers for the generated module.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("static regex must compile"));
static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{XID_Start}_$][\p{XID_Continue}$]*$").expect("static regex must compile")
});

/// Strips whitespace and hyphens from an object-type name.
///
/// Case and every other character are preserved, so two different names can
/// map to the same identifier; [`validate_document`](crate::validate_document)
/// reports that as a collision.
///
/// # Examples
///
/// ```
/// use object_schema_core::safe_identifier;
///
/// assert_eq!(safe_identifier("job-applications"), "jobapplications");
/// assert_eq!(safe_identifier("Job Applications"), "JobApplications");
/// assert_eq!(safe_identifier("orders"), "orders");
/// ```
pub fn safe_identifier(name: &str) -> String {
    SEPARATORS.replace_all(name, "").into_owned()
}

/// Returns `true` if `candidate` can be used verbatim as an identifier in the
/// generated module.
pub fn is_valid_identifier(candidate: &str) -> bool {
    IDENTIFIER.is_match(candidate)
}

/// Renders a property key for an object literal.
///
/// Keys that are legal identifiers are emitted bare; anything else is quoted.
///
/// # Examples
///
/// ```
/// use object_schema_core::property_key;
///
/// assert_eq!(property_key("createdTime"), "createdTime");
/// assert_eq!(property_key("first-name"), "\"first-name\"");
/// ```
pub fn property_key(name: &str) -> Cow<'_, str> {
    if is_valid_identifier(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(string_literal(name))
    }
}

/// Renders `value` as a double-quoted, escaped string literal.
pub fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
