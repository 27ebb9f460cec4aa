//! Test-case validation.
//!
//! All violations are aggregated into one ordered list; validation never
//! short-circuits on the first problem.

use tracing::instrument;

use crate::testcases::{FlowTestCase, TestCaseSynthesizer};

impl TestCaseSynthesizer {
    /// Validate a test case against the registry and its own shape.
    ///
    /// Returns the ordered list of violations; an empty list means the
    /// test case is runnable.
    #[instrument(skip(self, test_case), fields(flow_fqn = %test_case.flow_fqn))]
    pub fn validate(&self, test_case: &FlowTestCase) -> Vec<String> {
        let mut violations = Vec::new();

        if self
            .registry()
            .get_flow_definition(&test_case.flow_fqn)
            .is_none()
        {
            violations.push(format!("flow not found: {}", test_case.flow_fqn));
        }

        if test_case.trigger_input.is_null() {
            violations.push("test case must define trigger input".to_string());
        }

        if test_case.assertions.is_empty() {
            violations.push("test case must define at least one assertion".to_string());
        }
        for (index, assertion) in test_case.assertions.iter().enumerate() {
            if assertion.target_path.is_empty() {
                violations.push(format!("assertion {index} is missing targetPath"));
            }
            if assertion.expected_value.is_null() {
                violations.push(format!("assertion {index} is missing expectedValue"));
            }
            if assertion.comparison.is_empty() {
                violations.push(format!("assertion {index} is missing comparison"));
            }
        }

        for (index, mock) in test_case.component_mocks.iter().enumerate() {
            if mock.step_id_pattern.is_empty() {
                violations.push(format!("component mock {index} is missing stepIdPattern"));
            }
        }

        violations
    }
}
