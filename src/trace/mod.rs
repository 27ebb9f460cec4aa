//! Execution traces and their read-only analysis.
//!
//! Traces are owned and produced by the external execution engine; this
//! module only models their shape and computes summaries, metrics, and
//! data-flow paths from them. Nothing here ever mutates a trace.

pub mod analysis;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use analysis::{
    analyze_data_flow, execution_metrics, execution_summary, DataFlowAnalysis, DataFlowStep,
    ExecutionMetrics, ExecutionSummary, StepTiming,
};

/// Terminal and in-progress states of a whole flow execution, using the
/// wire names the execution engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStatus {
    #[serde(rename = "RUNNING")]
    Running,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "FAILED")]
    Failed,
}

/// Per-step outcome states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "FAILURE")]
    Failure,
    #[serde(rename = "SKIPPED")]
    Skipped,
}

/// One recorded step of a flow execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTrace {
    pub step_id: String,
    /// The component type executed at this step, when the engine reports it.
    #[serde(default)]
    pub component_fqn: Option<String>,
    pub status: StepStatus,
    #[serde(default)]
    pub input_data: Option<Value>,
    #[serde(default)]
    pub output_data: Option<Value>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

/// A recorded execution of a flow: ordered step records with status,
/// timing, and data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowExecutionTrace {
    pub flow_fqn: String,
    pub status: FlowStatus,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub steps: Vec<StepTrace>,
    #[serde(default)]
    pub final_context: Value,
}
