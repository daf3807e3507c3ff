//! Envelope accessors
//!
//! Small read-only helpers over a decoded `{success, data|error}` payload.

use serde_json::Value;

/// `true` only when the payload carries `success: true`
pub fn is_success(payload: &Value) -> bool {
    payload.get("success").and_then(Value::as_bool) == Some(true)
}

pub fn error_message(payload: &Value) -> Option<&str> {
    payload.get("error").and_then(Value::as_str)
}

/// Case-insensitive substring match against the envelope's `error` message.
/// A payload without an `error` string never matches.
pub fn error_contains(payload: &Value, needle: &str) -> bool {
    error_message(payload)
        .map(|message| message.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// Number of records under `data`, when `data` is a sequence
pub fn record_count(payload: &Value) -> Option<usize> {
    payload.get("data").and_then(Value::as_array).map(Vec::len)
}

/// Whether `key` appears as an object key anywhere in `value`
pub fn contains_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| contains_key(v, key)),
        Value::Array(items) => items.iter().any(|v| contains_key(v, key)),
        _ => false,
    }
}
