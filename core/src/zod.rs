//! Validator vocabulary of the generated module.

pub(crate) const IMPORT: &str = "import { z } from 'zod';";

pub(crate) const STRING: &str = "z.string()";
pub(crate) const DATE_TIME: &str = "z.string().datetime()";
pub(crate) const NUMBER: &str = "z.number()";
pub(crate) const BOOLEAN: &str = "z.boolean()";
pub(crate) const UNKNOWN: &str = "z.unknown()";
pub(crate) const EMPTY_OBJECT: &str = "z.object({})";
pub(crate) const OPTIONAL: &str = ".optional()";

pub(crate) const FIELD_INDENT: &str = "  ";
pub(crate) const FIELD_SEPARATOR: &str = ",\n";
pub(crate) const UNION_SEPARATOR: &str = " | ";
pub(crate) const EMPTY_UNION: &str = "never";

pub(crate) fn array(item: &str) -> String {
    format!("z.array({item})")
}

pub(crate) fn object(entries: &[String]) -> String {
    if entries.is_empty() {
        return EMPTY_OBJECT.to_string();
    }
    format!("z.object({{\n{}\n}})", entries.join(FIELD_SEPARATOR))
}
