//! Assertion evaluation against execution results.

use regex::Regex;
use serde_json::Value;

use crate::testcases::{AssertionResult, TestCaseAssertion};
use crate::utils::json_path::{is_empty_value, resolve_path};

/// Evaluate each assertion by dot-path traversal of `result`.
///
/// A missing intermediate key yields an undefined actual value, never a
/// panic, and an unrecognized comparison operator evaluates to
/// `passed: false`.
pub fn evaluate_assertions(
    assertions: &[TestCaseAssertion],
    result: &Value,
) -> Vec<AssertionResult> {
    assertions
        .iter()
        .map(|assertion| evaluate_one(assertion, result))
        .collect()
}

fn evaluate_one(assertion: &TestCaseAssertion, result: &Value) -> AssertionResult {
    let actual = resolve_path(result, &assertion.target_path);
    let expected = &assertion.expected_value;

    let passed = match assertion.comparison.as_str() {
        "equals" => actual.map(|a| a == expected).unwrap_or(false),
        "notEquals" => actual.map(|a| a != expected).unwrap_or(true),
        // Substring check, string-only on both sides.
        "contains" => match (actual.and_then(Value::as_str), expected.as_str()) {
            (Some(haystack), Some(needle)) => haystack.contains(needle),
            _ => false,
        },
        "greaterThan" => match (actual.and_then(Value::as_f64), expected.as_f64()) {
            (Some(a), Some(e)) => a > e,
            _ => false,
        },
        "lessThan" => match (actual.and_then(Value::as_f64), expected.as_f64()) {
            (Some(a), Some(e)) => a < e,
            _ => false,
        },
        "matchesRegex" => match (actual.and_then(Value::as_str), expected.as_str()) {
            (Some(text), Some(pattern)) => Regex::new(pattern)
                .map(|re| re.is_match(text))
                .unwrap_or(false),
            _ => false,
        },
        "exists" => actual.is_some(),
        "isEmpty" => is_empty_value(actual),
        _ => false,
    };

    let actual_repr = actual
        .map(Value::to_string)
        .unwrap_or_else(|| "undefined".to_string());
    let message = if passed {
        format!(
            "'{}' {} {}: passed",
            assertion.target_path, assertion.comparison, expected
        )
    } else if known_comparison(&assertion.comparison) {
        format!(
            "'{}': expected {} {}, actual was {}",
            assertion.target_path, assertion.comparison, expected, actual_repr
        )
    } else {
        format!(
            "'{}': unknown comparison operator '{}'",
            assertion.target_path, assertion.comparison
        )
    };

    AssertionResult {
        assertion: assertion.clone(),
        actual_value: actual.cloned(),
        passed,
        message,
    }
}

fn known_comparison(comparison: &str) -> bool {
    matches!(
        comparison,
        "equals"
            | "notEquals"
            | "contains"
            | "greaterThan"
            | "lessThan"
            | "matchesRegex"
            | "exists"
            | "isEmpty"
    )
}
