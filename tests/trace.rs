mod common;
use common::*;

use serde_json::json;

use flowscope::trace::{
    analyze_data_flow, execution_metrics, execution_summary, FlowExecutionTrace, StepStatus,
};

#[test]
fn summary_partitions_steps_by_status() {
    let trace = trace_with_steps(
        vec![
            step("a", StepStatus::Success, Some(100)),
            step("b", StepStatus::Failure, Some(50)),
            step("c", StepStatus::Skipped, None),
            step("d", StepStatus::Success, Some(20)),
        ],
        Some(200),
    );

    let summary = execution_summary(&trace);
    assert_eq!(summary.total_steps, 4);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.duration_ms, Some(200));
    assert_eq!(summary.flow_fqn, "com.acme.orders.ProcessOrder");
}

#[test]
fn metrics_on_zero_steps_are_all_zero() {
    let trace = trace_with_steps(vec![], Some(0));
    let metrics = execution_metrics(&trace);

    assert_eq!(metrics.average_step_duration_ms, 0.0);
    assert!(metrics.slowest_step.is_none());
    assert!(metrics.fastest_step.is_none());
    assert_eq!(metrics.error_rate, 0.0);
    assert_eq!(metrics.throughput_steps_per_sec, 0.0);
}

#[test]
fn metrics_average_only_counts_timed_steps() {
    let trace = trace_with_steps(
        vec![
            step("a", StepStatus::Success, Some(100)),
            step("b", StepStatus::Success, None),
            step("c", StepStatus::Failure, Some(300)),
        ],
        Some(1000),
    );

    let metrics = execution_metrics(&trace);
    assert_eq!(metrics.average_step_duration_ms, 200.0);
    assert_eq!(metrics.slowest_step.as_ref().unwrap().step_id, "c");
    assert_eq!(metrics.fastest_step.as_ref().unwrap().step_id, "a");
    assert!((metrics.error_rate - 1.0 / 3.0).abs() < 1e-9);
    assert_eq!(metrics.throughput_steps_per_sec, 3.0);
}

#[test]
fn metric_ties_keep_the_first_encountered_step() {
    let trace = trace_with_steps(
        vec![
            step("first", StepStatus::Success, Some(100)),
            step("second", StepStatus::Success, Some(100)),
        ],
        Some(200),
    );

    let metrics = execution_metrics(&trace);
    assert_eq!(metrics.slowest_step.unwrap().step_id, "first");
    assert_eq!(metrics.fastest_step.unwrap().step_id, "first");
}

#[test]
fn zero_total_duration_yields_zero_throughput() {
    let trace = trace_with_steps(vec![step("a", StepStatus::Success, Some(5))], None);
    let metrics = execution_metrics(&trace);
    assert_eq!(metrics.total_duration_ms, 0);
    assert_eq!(metrics.throughput_steps_per_sec, 0.0);
}

#[test]
fn data_flow_without_trace_is_a_design_time_call() {
    let analysis = analyze_data_flow("com.acme.orders.ProcessOrder", None, None);
    assert!(analysis.path.is_empty());
    assert!(analysis.context_variables.is_empty());
    assert_eq!(analysis.flow_fqn, "com.acme.orders.ProcessOrder");
}

#[test]
fn data_flow_is_one_indexed_and_stops_at_target() {
    let mut trace = trace_with_steps(
        vec![
            step("fetch", StepStatus::Success, Some(10)),
            step("validate", StepStatus::Success, Some(10)),
            step("persist", StepStatus::Success, Some(10)),
        ],
        Some(30),
    );
    trace.final_context = json!({"apiKey": "secret"});

    let full = analyze_data_flow(&trace.flow_fqn.clone(), None, Some(&trace));
    assert_eq!(full.path.len(), 3);
    assert_eq!(full.path[0].execution_order, 1);
    assert_eq!(full.path[2].execution_order, 3);
    assert_eq!(full.path[1].step_type, "StdLib:validate");
    assert_eq!(full.context_variables["apiKey"], json!("secret"));

    let partial = analyze_data_flow(&trace.flow_fqn.clone(), Some("validate"), Some(&trace));
    assert_eq!(partial.path.len(), 2);
    assert_eq!(partial.path.last().unwrap().step_id, "validate");
    assert_eq!(partial.target_step_id.as_deref(), Some("validate"));
}

#[test]
fn trace_deserializes_engine_wire_names() {
    let raw = json!({
        "flowFqn": "com.acme.orders.ProcessOrder",
        "status": "FAILED",
        "startTime": "2026-08-26T12:00:00Z",
        "durationMs": 42,
        "steps": [
            {"stepId": "fetch", "status": "FAILURE", "durationMs": 42}
        ],
        "finalContext": {}
    });

    let trace: FlowExecutionTrace = serde_json::from_value(raw).expect("wire format parses");
    assert_eq!(trace.steps[0].status, StepStatus::Failure);
    assert_eq!(trace.duration_ms, Some(42));
}
