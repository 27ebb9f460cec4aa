//! Registry notification events.
//!
//! The registry emits exactly one event per terminal load outcome so a
//! rendering layer can refresh without polling. Events travel over a flume
//! channel obtained from [`crate::registry::ModuleRegistry::subscribe`];
//! the core never depends on any specific reactive framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A notification emitted by the registry after a load reaches a terminal
/// outcome.
///
/// `ModuleLoadFailed` doubles as the host error callback: it is emitted at
/// most once per failed load attempt.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum RegistryEvent {
    ModuleLoaded {
        fqn: String,
        when: DateTime<Utc>,
    },
    ModuleLoadFailed {
        fqn: String,
        message: String,
        when: DateTime<Utc>,
    },
}

impl RegistryEvent {
    pub fn module_loaded(fqn: impl Into<String>) -> Self {
        RegistryEvent::ModuleLoaded {
            fqn: fqn.into(),
            when: Utc::now(),
        }
    }

    pub fn module_load_failed(fqn: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryEvent::ModuleLoadFailed {
            fqn: fqn.into(),
            message: message.into(),
            when: Utc::now(),
        }
    }

    /// The FQN this event concerns.
    pub fn fqn(&self) -> &str {
        match self {
            RegistryEvent::ModuleLoaded { fqn, .. } => fqn,
            RegistryEvent::ModuleLoadFailed { fqn, .. } => fqn,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RegistryEvent::ModuleLoadFailed { .. })
    }

    /// Convert the event to a normalized JSON value.
    ///
    /// ```json
    /// {
    ///   "type": "module_loaded" | "module_load_failed",
    ///   "fqn": "com.acme.orders",
    ///   "timestamp": "2026-08-26T12:34:56.789Z",
    ///   "metadata": { /* variant-specific fields */ }
    /// }
    /// ```
    pub fn to_json_value(&self) -> Value {
        match self {
            RegistryEvent::ModuleLoaded { fqn, when } => json!({
                "type": "module_loaded",
                "fqn": fqn,
                "timestamp": when.to_rfc3339(),
                "metadata": {},
            }),
            RegistryEvent::ModuleLoadFailed { fqn, message, when } => json!({
                "type": "module_load_failed",
                "fqn": fqn,
                "timestamp": when.to_rfc3339(),
                "metadata": { "message": message },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_is_normalized() {
        let event = RegistryEvent::module_load_failed("a.b", "transport error: boom");
        let value = event.to_json_value();
        assert_eq!(value["type"], "module_load_failed");
        assert_eq!(value["fqn"], "a.b");
        assert_eq!(value["metadata"]["message"], "transport error: boom");
        assert!(event.is_failure());
    }
}
