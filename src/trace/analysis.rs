//! Summary, metric, and data-flow computations over execution traces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::trace::{FlowExecutionTrace, FlowStatus, StepStatus};

/// Status partition of a trace combined with its trace-level timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub flow_fqn: String,
    pub status: FlowStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_ms: Option<u64>,
    pub total_steps: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// A step identified together with its recorded duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTiming {
    pub step_id: String,
    pub duration_ms: u64,
}

/// Aggregate timing and failure metrics for one trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    pub total_duration_ms: u64,
    /// Mean over steps that carry a duration; `0` when none do.
    pub average_step_duration_ms: f64,
    pub slowest_step: Option<StepTiming>,
    pub fastest_step: Option<StepTiming>,
    /// Failed-step count over total step count; `0` with no steps.
    pub error_rate: f64,
    /// Steps per second; `0` when the total duration is `0`.
    pub throughput_steps_per_sec: f64,
}

/// One record of the data-flow path through an execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFlowStep {
    pub step_id: String,
    pub step_type: String,
    pub input_data: Option<Value>,
    pub output_data: Option<Value>,
    /// 1-indexed position in execution order.
    pub execution_order: usize,
}

/// Data-flow path for a flow, built purely from a supplied trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFlowAnalysis {
    pub flow_fqn: String,
    pub target_step_id: Option<String>,
    pub path: Vec<DataFlowStep>,
    pub context_variables: Map<String, Value>,
}

/// Partition the trace's steps by status in a single pass.
pub fn execution_summary(trace: &FlowExecutionTrace) -> ExecutionSummary {
    let mut succeeded = 0;
    let mut failed = 0;
    let mut skipped = 0;
    for step in &trace.steps {
        match step.status {
            StepStatus::Success => succeeded += 1,
            StepStatus::Failure => failed += 1,
            StepStatus::Skipped => skipped += 1,
        }
    }
    ExecutionSummary {
        flow_fqn: trace.flow_fqn.clone(),
        status: trace.status,
        start_time: trace.start_time,
        end_time: trace.end_time,
        duration_ms: trace.duration_ms,
        total_steps: trace.steps.len(),
        succeeded,
        failed,
        skipped,
    }
}

/// Compute aggregate metrics for a trace.
///
/// All edge cases degrade to zero rather than dividing by it: an empty
/// trace yields zero averages, no extrema, and zero throughput.
pub fn execution_metrics(trace: &FlowExecutionTrace) -> ExecutionMetrics {
    let total_duration_ms = trace.duration_ms.unwrap_or(0);
    let step_count = trace.steps.len();

    let mut timed_count = 0u64;
    let mut timed_sum = 0u64;
    let mut slowest: Option<StepTiming> = None;
    let mut fastest: Option<StepTiming> = None;
    let mut failed = 0usize;

    for step in &trace.steps {
        if step.status == StepStatus::Failure {
            failed += 1;
        }
        let Some(duration) = step.duration_ms else {
            continue;
        };
        timed_count += 1;
        timed_sum += duration;
        // Strict comparisons keep the first-encountered extremum on ties.
        if slowest.as_ref().map(|s| duration > s.duration_ms).unwrap_or(true) {
            slowest = Some(StepTiming {
                step_id: step.step_id.clone(),
                duration_ms: duration,
            });
        }
        if fastest.as_ref().map(|f| duration < f.duration_ms).unwrap_or(true) {
            fastest = Some(StepTiming {
                step_id: step.step_id.clone(),
                duration_ms: duration,
            });
        }
    }

    let average_step_duration_ms = if timed_count == 0 {
        0.0
    } else {
        timed_sum as f64 / timed_count as f64
    };
    let error_rate = if step_count == 0 {
        0.0
    } else {
        failed as f64 / step_count as f64
    };
    let throughput_steps_per_sec = if total_duration_ms == 0 {
        0.0
    } else {
        step_count as f64 / total_duration_ms as f64 * 1000.0
    };

    ExecutionMetrics {
        total_duration_ms,
        average_step_duration_ms,
        slowest_step: slowest,
        fastest_step: fastest,
        error_rate,
        throughput_steps_per_sec,
    }
}

/// Build the 1-indexed data-flow path for a flow.
///
/// Without a trace this is a design-time call: the path and context map are
/// empty. With a trace, the path follows recorded execution order and stops
/// after `target_step_id` when that step occurs in the trace.
pub fn analyze_data_flow(
    flow_fqn: &str,
    target_step_id: Option<&str>,
    trace: Option<&FlowExecutionTrace>,
) -> DataFlowAnalysis {
    let mut path = Vec::new();
    let mut context_variables = Map::new();

    if let Some(trace) = trace {
        for (index, step) in trace.steps.iter().enumerate() {
            path.push(DataFlowStep {
                step_id: step.step_id.clone(),
                step_type: step
                    .component_fqn
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
                input_data: step.input_data.clone(),
                output_data: step.output_data.clone(),
                execution_order: index + 1,
            });
            if target_step_id == Some(step.step_id.as_str()) {
                break;
            }
        }
        if let Some(object) = trace.final_context.as_object() {
            context_variables = object.clone();
        }
    }

    DataFlowAnalysis {
        flow_fqn: flow_fqn.to_string(),
        target_step_id: target_step_id.map(str::to_string),
        path,
        context_variables,
    }
}
