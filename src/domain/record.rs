//! Accessors over raw user documents, mirroring the text-extraction rules the
//! normalization SQL applies (`->>` stringifies scalars, missing is NULL).
use chrono::DateTime;
use serde_json::Value;

/// Text rendering of a JSON scalar, matching Postgres `->>`: strings come
/// back as-is, numbers and booleans as their literal text, everything else
/// (null, objects, arrays) as `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_text(doc: &Value, pointer: &str) -> Option<String> {
    doc.pointer(pointer).and_then(scalar_text)
}

/// Synthetic identity key: `id.name` followed by `id.value`. Missing parts
/// contribute nothing, like `CONCAT` treating NULL as empty, so a record
/// with no external id yields an empty key.
pub fn identity_key(doc: &Value) -> String {
    let name = field_text(doc, "/id/name").unwrap_or_default();
    let value = field_text(doc, "/id/value").unwrap_or_default();
    format!("{name}{value}")
}

pub fn has_external_id(doc: &Value) -> bool {
    !identity_key(doc).is_empty()
}

pub fn username(doc: &Value) -> Option<String> {
    field_text(doc, "/login/username")
}

pub fn dob_date(doc: &Value) -> Option<String> {
    field_text(doc, "/dob/date")
}

/// Whether the record's dob string would survive the `::timestamptz` cast.
/// The API emits RFC 3339 with millisecond fractions (`...T09:44:18.674Z`).
pub fn dob_is_well_formed(doc: &Value) -> bool {
    match dob_date(doc) {
        Some(raw) => DateTime::parse_from_rfc3339(&raw).is_ok(),
        None => true,
    }
}
