//! Shared fixtures for integration tests: canned module sources and
//! trace builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rustc_hash::FxHashMap;
use serde_json::Value;
use tokio::sync::Notify;

use flowscope::registry::{ModuleSource, ModuleText, SourceError};
use flowscope::trace::{FlowExecutionTrace, FlowStatus, StepStatus, StepTrace};

/// Module text with a named-component alias and two flows, in the flat
/// root layout.
pub const ORDERS_MODULE: &str = "\
imports:
  - com.acme.shared
components:
  - name: FetchOrder
    type: StdLib:HttpCall
    config:
      url: https://example.test/orders
  - name: Untyped
    config: {}
context:
  - name: apiKey
    initialValue: secret
flows:
  - name: ProcessOrder
    trigger:
      type: HttpTrigger
    steps:
      - { id: fetch, component: FetchOrder }
      - { id: validate, component: StdLib:Validate }
      - { id: enrich, component: StdLib:MapData }
      - { id: persist, component: StdLib:DbWrite }
  - name: Ping
    trigger:
      type: ManualTrigger
    steps:
      - { id: reply, component: StdLib:Echo }
";

/// The same shape in the namespaced `definitions` layout.
pub const NAMESPACED_MODULE: &str = "\
definitions:
  components:
    - name: Notify
      type: StdLib:SendEmail
  flows:
    - name: Alert
      trigger:
        type: ScheduleTrigger
      steps:
        - { id: send, component: Notify }
";

pub const MALFORMED_MODULE: &str = "flows:\n  - name: [unclosed\n";

/// In-memory module source with per-FQN text and a fetch counter.
pub struct MapSource {
    modules: FxHashMap<String, String>,
    pub fetches: AtomicUsize,
}

impl MapSource {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            modules: entries
                .iter()
                .map(|(fqn, text)| (fqn.to_string(), text.to_string()))
                .collect(),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModuleSource for MapSource {
    async fn request_module(&self, fqn: &str) -> Result<Option<ModuleText>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .modules
            .get(fqn)
            .map(|text| ModuleText::new(fqn, text.clone())))
    }
}

/// Source that always rejects.
pub struct RejectingSource;

#[async_trait]
impl ModuleSource for RejectingSource {
    async fn request_module(&self, _fqn: &str) -> Result<Option<ModuleText>, SourceError> {
        Err(SourceError::msg("connection refused"))
    }
}

/// Source that blocks until released, for in-flight dedup tests.
pub struct GatedSource {
    pub gate: Arc<Notify>,
    pub fetches: AtomicUsize,
    text: String,
}

impl GatedSource {
    pub fn new(text: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        (
            Self {
                gate: Arc::clone(&gate),
                fetches: AtomicUsize::new(0),
                text: text.to_string(),
            },
            gate,
        )
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModuleSource for GatedSource {
    async fn request_module(&self, fqn: &str) -> Result<Option<ModuleText>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(Some(ModuleText::new(fqn, self.text.clone())))
    }
}

pub fn step(id: &str, status: StepStatus, duration_ms: Option<u64>) -> StepTrace {
    StepTrace {
        step_id: id.to_string(),
        component_fqn: Some(format!("StdLib:{id}")),
        status,
        input_data: Some(serde_json::json!({"in": id})),
        output_data: Some(serde_json::json!({"out": id})),
        duration_ms,
        started_at: None,
    }
}

pub fn trace_with_steps(steps: Vec<StepTrace>, duration_ms: Option<u64>) -> FlowExecutionTrace {
    FlowExecutionTrace {
        flow_fqn: "com.acme.orders.ProcessOrder".to_string(),
        status: FlowStatus::Completed,
        start_time: Utc.with_ymd_and_hms(2026, 8, 26, 12, 0, 0).unwrap(),
        end_time: None,
        duration_ms,
        steps,
        final_context: Value::Object(Default::default()),
    }
}
