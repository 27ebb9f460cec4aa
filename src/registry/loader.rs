//! Asynchronous module loading with per-FQN deduplication.
//!
//! [`ModuleRegistry::load`] fetches module text through the host-supplied
//! [`ModuleSource`], decodes it as YAML, extracts definitions, and stores
//! the resulting [`ModuleRepresentation`]. For a given FQN at most one
//! fetch is ever in flight; the second concurrent caller observes the
//! in-flight flag and gets `None` without retriggering a fetch.
//!
//! Loads never fail across the `load()` boundary: transport and parse
//! failures become terminal `Error` entries in the registry, visible to
//! every consumer, plus exactly one [`RegistryEvent::ModuleLoadFailed`]
//! notification.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::events::RegistryEvent;
use crate::modules::{extract_definitions, extract_imports, ModuleRepresentation};
use crate::registry::store::{ModuleRegistry, RegistryInner};
use crate::types::ModuleStatus;

/// Raw module text supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleText {
    pub fqn: String,
    pub content: String,
}

impl ModuleText {
    pub fn new(fqn: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            content: content.into(),
        }
    }
}

/// Failure reported by a [`ModuleSource`].
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(flowscope::loader::source))]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Host callback supplying raw module text.
///
/// `Ok(None)` and `Err(_)` are both terminal for the load attempt; the
/// registry never retries on its own.
#[async_trait]
pub trait ModuleSource: Send + Sync {
    async fn request_module(&self, fqn: &str) -> Result<Option<ModuleText>, SourceError>;
}

/// A terminal load failure, recorded on the registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum LoadError {
    /// The host fetch callback failed or returned no content.
    #[error("transport error: {0}")]
    #[diagnostic(
        code(flowscope::loader::transport),
        help("The module source rejected the request or had no content for this FQN.")
    )]
    Transport(String),

    /// The fetched text failed to decode as a module document.
    #[error("parsing failed: {0}")]
    #[diagnostic(
        code(flowscope::loader::parse),
        help("Check the module text for YAML syntax errors; the raw content is retained on the entry.")
    )]
    Parse(String),
}

/// Clears the in-flight flag for one FQN when dropped, so every exit path
/// of a load attempt releases it.
struct InFlightGuard {
    inner: Arc<Mutex<RegistryInner>>,
    fqn: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.in_flight.remove(&self.fqn);
        }
    }
}

impl ModuleRegistry {
    /// Load the module named `fqn`, returning its representation.
    ///
    /// - Returns the cached entry without fetching when `fqn` is already
    ///   present with a non-`Error` status (idempotent).
    /// - Returns `None` immediately when a load for `fqn` is already in
    ///   flight: no new fetch and no queued waiter. The caller re-issues
    ///   after the first load completes if it still needs the value.
    /// - Returns `None` for an empty `fqn`.
    ///
    /// A failed attempt still persists an entry (`status == Error` with
    /// diagnostics) and emits one `ModuleLoadFailed` event; it is never
    /// silently dropped. A subsequent `load` of a failed FQN retries.
    #[instrument(skip(self))]
    pub async fn load(&self, fqn: &str) -> Option<ModuleRepresentation> {
        if fqn.is_empty() {
            warn!("load called with empty fqn");
            return None;
        }

        {
            let mut inner = self.locked();
            if inner.in_flight.contains(fqn) {
                debug!("load already in flight, not retriggering");
                return None;
            }
            if let Some(existing) = inner.modules.get(fqn) {
                if existing.status != ModuleStatus::Error {
                    debug!(status = %existing.status, "returning cached module");
                    return Some(existing.clone());
                }
            }
            inner.in_flight.insert(fqn.to_string());
            inner
                .modules
                .entry(fqn.to_string())
                .and_modify(|m| {
                    m.status = ModuleStatus::Loading;
                    m.errors.clear();
                })
                .or_insert_with(|| ModuleRepresentation::loading(fqn));
        }
        let _guard = InFlightGuard {
            inner: Arc::clone(&self.inner),
            fqn: fqn.to_string(),
        };

        // Suspension point: the lock is not held across the host fetch.
        let fetched = self.source.request_module(fqn).await;

        let outcome = match fetched {
            Err(err) => Err((String::new(), LoadError::Transport(err.to_string()))),
            Ok(None) => Err((
                String::new(),
                LoadError::Transport(format!("module source returned no content for '{fqn}'")),
            )),
            Ok(Some(text)) => match decode_module(&text.content) {
                Ok(parsed) => Ok((text.content, parsed)),
                Err(err) => Err((text.content, err)),
            },
        };

        let representation = {
            let mut inner = self.locked();
            let entry = inner
                .modules
                .get_mut(fqn)
                .expect("loading entry present for in-flight fqn");
            match outcome {
                Ok((raw, parsed)) => {
                    let definitions = extract_definitions(&parsed);
                    let imports = extract_imports(&parsed);
                    entry.complete(raw, parsed, definitions, imports);
                }
                Err((raw, error)) => {
                    warn!(%error, "module load failed");
                    entry.fail(raw, error);
                }
            }
            entry.clone()
        };

        let event = if representation.is_loaded() {
            RegistryEvent::module_loaded(fqn)
        } else {
            let message = representation
                .errors
                .last()
                .map(ToString::to_string)
                .unwrap_or_default();
            RegistryEvent::module_load_failed(fqn, message)
        };
        self.emit(event);

        Some(representation)
    }
}

/// Decode module text as a YAML-equivalent document.
fn decode_module(content: &str) -> Result<Value, LoadError> {
    match serde_yaml::from_str::<Value>(content) {
        Ok(Value::Null) if content.trim().is_empty() => Ok(Value::Object(Default::default())),
        Ok(parsed) => Ok(parsed),
        Err(err) => Err(LoadError::Parse(err.to_string())),
    }
}
