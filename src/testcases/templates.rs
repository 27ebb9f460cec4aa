//! Template test-case generation.

use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use crate::registry::ModuleRegistry;
use crate::testcases::{FlowTestCase, TestCaseAssertion};

/// Builds template test cases for flows resolvable through the registry.
#[derive(Clone)]
pub struct TestCaseSynthesizer {
    registry: ModuleRegistry,
}

impl TestCaseSynthesizer {
    pub fn new(registry: ModuleRegistry) -> Self {
        Self { registry }
    }

    pub(crate) fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    /// Produce the fixed template set for a flow.
    ///
    /// Always a *Happy Path* and an *Error Handling* template, plus a
    /// *Performance* template when the flow has more than 3 steps. A flow
    /// that cannot be resolved yields an empty list, not an error.
    #[instrument(skip(self))]
    pub fn generate_templates(&self, flow_fqn: &str) -> Vec<FlowTestCase> {
        let Some(flow) = self.registry.get_flow_definition(flow_fqn) else {
            debug!("flow not resolvable, no templates generated");
            return Vec::new();
        };

        let happy_input = trigger_input_for(flow.trigger_type());
        let mut templates = vec![
            FlowTestCase {
                name: "Happy Path".to_string(),
                description: "Successful execution with valid trigger input".to_string(),
                flow_fqn: flow_fqn.to_string(),
                trigger_input: happy_input.clone(),
                context_overrides: Map::new(),
                component_mocks: Vec::new(),
                assertions: vec![TestCaseAssertion::new("status", json!("COMPLETED"), "equals")],
            },
            FlowTestCase {
                name: "Error Handling".to_string(),
                description: "Invalid trigger input leading to a failed execution".to_string(),
                flow_fqn: flow_fqn.to_string(),
                trigger_input: invalidate(happy_input.clone()),
                context_overrides: Map::new(),
                component_mocks: Vec::new(),
                assertions: vec![TestCaseAssertion::new("status", json!("FAILED"), "equals")],
            },
        ];

        if flow.steps.len() > 3 {
            templates.push(FlowTestCase {
                name: "Performance".to_string(),
                description: "Execution completes within the latency budget".to_string(),
                flow_fqn: flow_fqn.to_string(),
                trigger_input: happy_input,
                context_overrides: Map::new(),
                component_mocks: Vec::new(),
                assertions: vec![TestCaseAssertion::new(
                    "durationMs",
                    json!(5000),
                    "lessThan",
                )],
            });
        }

        templates
    }
}

/// Synthetic trigger input by trigger type. Unknown trigger types get a
/// generic placeholder object.
fn trigger_input_for(trigger_type: Option<&str>) -> Value {
    match trigger_type {
        Some("HttpTrigger") => json!({
            "method": "POST",
            "path": "/test",
            "body": {"message": "test"},
            "headers": {"Content-Type": "application/json"},
        }),
        Some("ScheduleTrigger") => json!({
            "scheduledTime": Utc::now().to_rfc3339(),
        }),
        Some("ManualTrigger") => json!({
            "triggeredBy": "test-user",
            "reason": "template test case",
        }),
        _ => json!({"data": "test-input"}),
    }
}

/// Mutate a happy-path input toward invalidity: null the body if present,
/// push the method out of its enum if present.
fn invalidate(mut input: Value) -> Value {
    if let Some(object) = input.as_object_mut() {
        if object.contains_key("body") {
            object.insert("body".to_string(), Value::Null);
        }
        if object.contains_key("method") {
            object.insert("method".to_string(), json!("INVALID_METHOD"));
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_input_is_invalidated_in_place() {
        let input = trigger_input_for(Some("HttpTrigger"));
        let invalid = invalidate(input);
        assert_eq!(invalid["body"], Value::Null);
        assert_eq!(invalid["method"], "INVALID_METHOD");
        // Untouched keys survive.
        assert_eq!(invalid["path"], "/test");
    }

    #[test]
    fn unknown_trigger_gets_placeholder() {
        let input = trigger_input_for(Some("CustomTrigger"));
        assert_eq!(input["data"], "test-input");
        assert_eq!(trigger_input_for(None)["data"], "test-input");
    }
}
