//! Test-case synthesis, validation, and assertion evaluation.
//!
//! The synthesizer reads flow definitions through the registry to build
//! template test cases; assertion evaluation is a pure function over an
//! externally-produced execution result.

pub mod assertions;
pub mod templates;
pub mod validation;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use assertions::evaluate_assertions;
pub use templates::TestCaseSynthesizer;

/// A runnable test case for one flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowTestCase {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub flow_fqn: String,
    pub trigger_input: Value,
    #[serde(default)]
    pub context_overrides: Map<String, Value>,
    #[serde(default)]
    pub component_mocks: Vec<ComponentMock>,
    #[serde(default)]
    pub assertions: Vec<TestCaseAssertion>,
}

/// A canned response substituted for the steps matching a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMock {
    pub step_id_pattern: String,
    #[serde(default)]
    pub response: Value,
}

/// One assertion against the execution result.
///
/// `comparison` stays a free-form operator name: an unrecognized operator
/// evaluates to a failed assertion, never a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseAssertion {
    pub target_path: String,
    pub expected_value: Value,
    pub comparison: String,
}

impl TestCaseAssertion {
    pub fn new(
        target_path: impl Into<String>,
        expected_value: Value,
        comparison: impl Into<String>,
    ) -> Self {
        Self {
            target_path: target_path.into(),
            expected_value,
            comparison: comparison.into(),
        }
    }
}

/// An assertion paired with what was actually observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResult {
    pub assertion: TestCaseAssertion,
    /// `None` when the target path did not resolve ("undefined").
    pub actual_value: Option<Value>,
    pub passed: bool,
    pub message: String,
}
