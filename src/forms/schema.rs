//! Form schema generation from component config schemas.
//!
//! [`generate_form_schema`] is a stateless transformer: it normalizes a
//! possibly-partial JSON-Schema-like value, derives per-field UI hints, and
//! extracts static default values. It never consults the registry.

use serde_json::{json, Map, Value};

/// Output of [`generate_form_schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedForm {
    /// The normalized schema: `type` defaulted to `object`, object types
    /// seeded with `properties`, nested property schemas normalized
    /// recursively.
    pub schema: Value,
    /// Per-field UI hints keyed like the data shape.
    pub ui_schema: Value,
    /// Static defaults extracted from the schema. Array fields deliberately
    /// receive no default so empty-collection semantics stay explicit to
    /// the caller.
    pub default_values: Value,
}

/// Turn a component's config schema into a normalized schema, UI hints,
/// and default values.
pub fn generate_form_schema(component_schema: &Value) -> GeneratedForm {
    let schema = normalize_schema(component_schema);
    let ui_schema = build_ui_schema(&schema);
    let default_values = extract_defaults(&schema);
    GeneratedForm {
        schema,
        ui_schema,
        default_values,
    }
}

/// Normalize a possibly-partial schema node.
///
/// Non-object input normalizes to an empty object schema.
pub fn normalize_schema(schema: &Value) -> Value {
    let mut normalized = match schema.as_object() {
        Some(map) => map.clone(),
        None => Map::new(),
    };

    if !normalized.contains_key("type") {
        normalized.insert("type".into(), json!("object"));
    }

    if normalized.get("type").and_then(Value::as_str) == Some("object") {
        let properties = normalized
            .remove("properties")
            .and_then(|p| p.as_object().cloned())
            .unwrap_or_default();
        let properties = properties
            .into_iter()
            .map(|(name, prop)| (name, normalize_schema(&prop)))
            .collect::<Map<_, _>>();
        normalized.insert("properties".into(), Value::Object(properties));
    }

    if let Some(items) = normalized.remove("items") {
        normalized.insert("items".into(), normalize_schema(&items));
    }

    Value::Object(normalized)
}

fn build_ui_schema(schema: &Value) -> Value {
    let mut ui = Map::new();
    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, prop) in properties {
            let hints = field_hints(name, prop);
            if !hints.as_object().map(Map::is_empty).unwrap_or(true) {
                ui.insert(name.clone(), hints);
            }
        }
    }
    Value::Object(ui)
}

/// UI hints for a single field, derived from its type and format.
fn field_hints(name: &str, prop: &Value) -> Value {
    if prop.get("enum").is_some() {
        return json!({"ui:widget": "select"});
    }

    match prop.get("type").and_then(Value::as_str) {
        Some("string") => match prop.get("format").and_then(Value::as_str) {
            Some("password") => json!({"ui:widget": "password"}),
            Some("email") => json!({"ui:widget": "email"}),
            Some("uri") => json!({"ui:widget": "uri"}),
            Some("date-time") => json!({"ui:widget": "datetime"}),
            _ => {
                let max_length = prop.get("maxLength").and_then(Value::as_u64).unwrap_or(0);
                if max_length > 100 {
                    json!({"ui:widget": "textarea"})
                } else {
                    json!({})
                }
            }
        },
        Some("array") => json!({
            "ui:options": {"orderable": true, "addable": true, "removable": true}
        }),
        Some("object") => {
            let label = prop
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(name)
                .to_string();
            let mut hints = Map::new();
            hints.insert("ui:group".into(), json!(label));
            // Nested fields get their own hints, mirrored under this key.
            if let Value::Object(nested) = build_ui_schema(prop) {
                hints.extend(nested);
            }
            Value::Object(hints)
        }
        _ => json!({}),
    }
}

/// Recursively extract static `default` values.
fn extract_defaults(schema: &Value) -> Value {
    let mut defaults = Map::new();
    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, prop) in properties {
            match prop.get("type").and_then(Value::as_str) {
                Some("object") => {
                    let nested = extract_defaults(prop);
                    if !nested.as_object().map(Map::is_empty).unwrap_or(true) {
                        defaults.insert(name.clone(), nested);
                    }
                }
                Some("array") => {}
                _ => {
                    if let Some(default) = prop.get("default") {
                        defaults.insert(name.clone(), default.clone());
                    }
                }
            }
        }
    }
    Value::Object(defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_schema_is_normalized_to_object() {
        let form = generate_form_schema(&json!({}));
        assert_eq!(form.schema["type"], "object");
        assert!(form.schema["properties"].is_object());
    }

    #[test]
    fn nested_property_schemas_are_normalized() {
        let form = generate_form_schema(&json!({
            "properties": {"nested": {"properties": {"inner": {"type": "string"}}}}
        }));
        assert_eq!(form.schema["properties"]["nested"]["type"], "object");
        assert_eq!(
            form.schema["properties"]["nested"]["properties"]["inner"]["type"],
            "string"
        );
    }

    #[test]
    fn format_and_enum_hints() {
        let form = generate_form_schema(&json!({
            "type": "object",
            "properties": {
                "secret": {"type": "string", "format": "password"},
                "mode": {"type": "string", "enum": ["a", "b"]},
                "notes": {"type": "string", "maxLength": 500},
                "short": {"type": "string", "maxLength": 10},
                "tags": {"type": "array", "items": {"type": "string"}},
            }
        }));
        assert_eq!(form.ui_schema["secret"]["ui:widget"], "password");
        assert_eq!(form.ui_schema["mode"]["ui:widget"], "select");
        assert_eq!(form.ui_schema["notes"]["ui:widget"], "textarea");
        assert!(form.ui_schema.get("short").is_none());
        assert_eq!(form.ui_schema["tags"]["ui:options"]["orderable"], true);
    }

    #[test]
    fn object_fields_get_labeled_group_hint() {
        let form = generate_form_schema(&json!({
            "type": "object",
            "properties": {
                "auth": {"type": "object", "title": "Authentication", "properties": {}}
            }
        }));
        assert_eq!(form.ui_schema["auth"]["ui:group"], "Authentication");
    }

    #[test]
    fn defaults_recurse_but_skip_arrays() {
        let form = generate_form_schema(&json!({
            "type": "object",
            "properties": {
                "timeout": {"type": "number", "default": 30},
                "retries": {"type": "array", "default": [1, 2, 3]},
                "auth": {
                    "type": "object",
                    "properties": {"scheme": {"type": "string", "default": "basic"}}
                }
            }
        }));
        assert_eq!(form.default_values["timeout"], 30);
        assert!(form.default_values.get("retries").is_none());
        assert_eq!(form.default_values["auth"]["scheme"], "basic");
    }
}
