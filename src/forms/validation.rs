//! Schema-driven form data validation and coercion.
//!
//! [`validate_form_data`] collects *all* violations rather than stopping at
//! the first, and never panics on a malformed schema: shape problems in the
//! schema itself surface as a single schema-kind violation.

use regex::Regex;
use serde_json::{Map, Value};

/// Options controlling a validation pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Attempt type coercion before type checks: string→number (numeric
    /// parse, unchanged on failure), string→boolean (case-insensitive
    /// `"true"` match), non-string→string (stringify).
    pub coerce: bool,
}

/// What kind of rule a violation broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field is missing or null.
    Required,
    /// The value has the wrong JSON type.
    Type,
    /// A per-field constraint failed (length, pattern, enum, range).
    Constraint,
    /// The schema itself is malformed; reported exactly once.
    Schema,
}

/// One validation violation, addressed by field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub path: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    fn new(path: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Result of a validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValidation {
    pub valid: bool,
    pub errors: Vec<FieldViolation>,
    /// The input data, with coercions applied when requested.
    pub data: Value,
}

/// Validate `data` against a JSON-Schema-like object schema.
pub fn validate_form_data(data: &Value, schema: &Value, options: &ValidationOptions) -> FormValidation {
    match run_validation(data, schema, options) {
        Ok((errors, data)) => FormValidation {
            valid: errors.is_empty(),
            errors,
            data,
        },
        Err(cause) => FormValidation {
            valid: false,
            errors: vec![FieldViolation::new(
                "",
                ViolationKind::Schema,
                format!("malformed schema: {cause}"),
            )],
            data: data.clone(),
        },
    }
}

fn run_validation(
    data: &Value,
    schema: &Value,
    options: &ValidationOptions,
) -> Result<(Vec<FieldViolation>, Value), String> {
    let schema_obj = schema
        .as_object()
        .ok_or_else(|| "schema is not an object".to_string())?;

    let mut errors = Vec::new();
    let mut working = data.clone();

    if let Some(required) = schema_obj.get("required") {
        let required = required
            .as_array()
            .ok_or_else(|| "'required' is not an array".to_string())?;
        for field in required {
            let field = field
                .as_str()
                .ok_or_else(|| "'required' entry is not a string".to_string())?;
            let value = working.get(field);
            if value.is_none() || value == Some(&Value::Null) {
                errors.push(FieldViolation::new(
                    field,
                    ViolationKind::Required,
                    format!("required field '{field}' is missing"),
                ));
            }
        }
    }

    if let Some(properties) = schema_obj.get("properties") {
        let properties = properties
            .as_object()
            .ok_or_else(|| "'properties' is not an object".to_string())?
            .clone();
        for (name, prop) in &properties {
            let prop = prop
                .as_object()
                .ok_or_else(|| format!("property schema '{name}' is not an object"))?;
            let Some(value) = working.get(name).cloned() else {
                continue;
            };
            if value.is_null() {
                continue;
            }

            let expected = prop.get("type").and_then(Value::as_str);
            let value = if options.coerce {
                let coerced = coerce(&value, expected);
                if let Some(map) = working.as_object_mut() {
                    map.insert(name.clone(), coerced.clone());
                }
                coerced
            } else {
                value
            };

            if let Some(expected) = expected {
                if !type_matches(&value, expected) {
                    errors.push(FieldViolation::new(
                        name.clone(),
                        ViolationKind::Type,
                        format!("field '{name}' expected type {expected}, got {}", type_name(&value)),
                    ));
                    continue;
                }
            }

            check_constraints(name, &value, prop, &mut errors)?;
        }
    }

    Ok((errors, working))
}

fn check_constraints(
    name: &str,
    value: &Value,
    prop: &Map<String, Value>,
    errors: &mut Vec<FieldViolation>,
) -> Result<(), String> {
    if let Some(s) = value.as_str() {
        if let Some(min) = prop.get("minLength").and_then(Value::as_u64) {
            if (s.chars().count() as u64) < min {
                errors.push(FieldViolation::new(
                    name,
                    ViolationKind::Constraint,
                    format!("field '{name}' is shorter than minLength {min}"),
                ));
            }
        }
        if let Some(max) = prop.get("maxLength").and_then(Value::as_u64) {
            if (s.chars().count() as u64) > max {
                errors.push(FieldViolation::new(
                    name,
                    ViolationKind::Constraint,
                    format!("field '{name}' is longer than maxLength {max}"),
                ));
            }
        }
        if let Some(pattern) = prop.get("pattern").and_then(Value::as_str) {
            let re = Regex::new(pattern)
                .map_err(|err| format!("invalid pattern for '{name}': {err}"))?;
            if !re.is_match(s) {
                errors.push(FieldViolation::new(
                    name,
                    ViolationKind::Constraint,
                    format!("field '{name}' does not match pattern '{pattern}'"),
                ));
            }
        }
        if let Some(allowed) = prop.get("enum").and_then(Value::as_array) {
            if !allowed.contains(value) {
                errors.push(FieldViolation::new(
                    name,
                    ViolationKind::Constraint,
                    format!("field '{name}' value {value} is not one of the allowed values"),
                ));
            }
        }
    }

    if let Some(n) = value.as_f64() {
        if let Some(min) = prop.get("minimum").and_then(Value::as_f64) {
            if n < min {
                errors.push(FieldViolation::new(
                    name,
                    ViolationKind::Constraint,
                    format!("field '{name}' value {n} is below minimum {min}"),
                ));
            }
        }
        if let Some(max) = prop.get("maximum").and_then(Value::as_f64) {
            if n > max {
                errors.push(FieldViolation::new(
                    name,
                    ViolationKind::Constraint,
                    format!("field '{name}' value {n} is above maximum {max}"),
                ));
            }
        }
    }

    Ok(())
}

/// Coerce a value toward the expected type. Returns the value unchanged
/// when no coercion applies or the parse fails.
fn coerce(value: &Value, expected: Option<&str>) -> Value {
    match (expected, value) {
        (Some("number"), Value::String(s)) => s
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| value.clone()),
        (Some("integer"), Value::String(s)) => s
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .unwrap_or_else(|_| value.clone()),
        (Some("boolean"), Value::String(s)) => Value::Bool(s.eq_ignore_ascii_case("true")),
        (Some("string"), other) if !other.is_string() => Value::String(stringify(other)),
        _ => value.clone(),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn type_matches(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        "null" => value.is_null(),
        // Unknown type names do not fail the value.
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
