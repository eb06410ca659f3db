//! Empty-string normalization of outgoing payloads
//!
//! Form inputs produce `""` for untouched optional fields, while the backend
//! treats `""` and "not provided" differently. Before a request leaves the
//! client every empty string in the body or query is rewritten to `null`.

use crate::api::types::Payload;
use serde_json::Value;

/// Rewrite every empty string in `value` to `null`, recursing into objects
/// and arrays. All other values are left untouched.
pub fn normalize_in_place(value: &mut Value) {
    match value {
        Value::String(s) if s.is_empty() => *value = Value::Null,
        Value::Array(items) => items.iter_mut().for_each(normalize_in_place),
        Value::Object(map) => map.values_mut().for_each(normalize_in_place),
        _ => {}
    }
}

/// Owned variant of [`normalize_in_place`]
pub fn normalize(mut value: Value) -> Value {
    normalize_in_place(&mut value);
    value
}

/// Normalize every field of a payload
pub fn normalize_payload(payload: &mut Payload) {
    payload.values_mut().for_each(normalize_in_place);
}
