//! # Flowscope: DSL Module Registry & Resolution Engine
//!
//! Flowscope parses textual flow-definition modules into structured
//! representations, deduplicates asynchronous loads keyed by fully-qualified
//! name (FQN), and resolves component, flow, and context references across
//! module boundaries — including indirection through module-local
//! named-component aliases. On top of the registry it provides three
//! read-only consumers: form-schema generation for component configs,
//! test-case synthesis, and execution-trace analysis.
//!
//! Flowscope never executes a flow; it models and resolves flow
//! *definitions* and analyzes *traces* produced elsewhere.
//!
//! ## Core Concepts
//!
//! - **Modules**: parsed DSL sources with status, definitions, diagnostics
//! - **Loader**: host-fed async fetch with per-FQN dedup
//! - **Resolver**: null-safe lookups over loaded modules
//! - **Events**: one notification per terminal load outcome
//!
//! ## Quick Start
//!
//! ```rust
//! use async_trait::async_trait;
//! use flowscope::registry::{ModuleRegistry, ModuleSource, ModuleText, SourceError};
//!
//! struct InlineSource;
//!
//! #[async_trait]
//! impl ModuleSource for InlineSource {
//!     async fn request_module(&self, fqn: &str) -> Result<Option<ModuleText>, SourceError> {
//!         let text = "\
//! components:
//!   - name: FetchUser
//!     type: StdLib:HttpCall
//!     config: { url: \"https://example.test/users\" }
//! flows:
//!   - name: Onboard
//!     trigger: { type: HttpTrigger }
//!     steps:
//!       - { id: fetch, component: FetchUser }
//! ";
//!         Ok(Some(ModuleText::new(fqn, text)))
//!     }
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let registry = ModuleRegistry::new(InlineSource);
//! registry.load("com.acme.users").await;
//!
//! let info = registry
//!     .resolve_component_type_info("FetchUser", "com.acme.users")
//!     .unwrap();
//! assert_eq!(info.base_type, "StdLib:HttpCall");
//! assert!(info.is_named_component);
//!
//! let flow = registry.get_flow_definition("com.acme.users.Onboard").unwrap();
//! assert_eq!(flow.steps.len(), 1);
//! # });
//! ```
//!
//! ## Module Guide
//!
//! - [`registry`] - Module loading, storage, and reference resolution
//! - [`modules`] - Module representations and extracted definitions
//! - [`forms`] - Form schema generation and data validation
//! - [`testcases`] - Test-case templates, validation, assertions
//! - [`trace`] - Execution-trace summaries and metrics
//! - [`events`] - Registry update notifications

pub mod events;
pub mod forms;
pub mod modules;
pub mod registry;
pub mod telemetry;
pub mod testcases;
pub mod trace;
pub mod types;
pub mod utils;
