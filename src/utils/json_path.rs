//! Dot-path traversal helpers for loosely-typed JSON values.
//!
//! Shared by assertion evaluation and data-flow analysis: a missing
//! intermediate key yields `None` ("undefined"), never a panic.

use serde_json::Value;

/// Resolve a dot-separated path against a JSON value.
///
/// An empty path resolves to the value itself. Array indices are supported
/// as numeric segments.
///
/// # Examples
///
/// ```rust
/// use flowscope::utils::json_path::resolve_path;
/// use serde_json::json;
///
/// let value = json!({"steps": [{"status": "SUCCESS"}]});
/// assert_eq!(resolve_path(&value, "steps.0.status"), Some(&json!("SUCCESS")));
/// assert_eq!(resolve_path(&value, "steps.9.status"), None);
/// ```
pub fn resolve_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// String/array/object-aware emptiness.
///
/// `None` (an unresolved path) and `null` both count as empty; numbers and
/// booleans never do.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}
