//! Core identifier types for the flowscope registry.
//!
//! Modules, flows, named components, and context variables are all addressed
//! by fully-qualified names (FQNs): dot-separated identifiers where the final
//! segment is the local name and everything before it locates the module.
//!
//! # Examples
//!
//! ```rust
//! use flowscope::types::split_fqn;
//!
//! assert_eq!(split_fqn("com.acme.orders.ProcessOrder"), ("com.acme.orders", "ProcessOrder"));
//! assert_eq!(split_fqn("ProcessOrder"), ("", "ProcessOrder"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Load status of a registry entry.
///
/// Entries are created in `Loading` and transition exactly once to a terminal
/// status (`Loaded` or `Error`). A failed entry may be re-attempted, in which
/// case it passes through `Loading` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    Loading,
    Loaded,
    Error,
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStatus::Loading => write!(f, "loading"),
            ModuleStatus::Loaded => write!(f, "loaded"),
            ModuleStatus::Error => write!(f, "error"),
        }
    }
}

/// Splits a fully-qualified name at its *last* dot into
/// `(module_fqn, local_name)`.
///
/// A name with no dot belongs to the root module `""`. There is no deeper
/// namespace modeling than this single split.
pub fn split_fqn(fqn: &str) -> (&str, &str) {
    match fqn.rfind('.') {
        Some(idx) => (&fqn[..idx], &fqn[idx + 1..]),
        None => ("", fqn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_last_dot() {
        assert_eq!(split_fqn("a.b.MyFlow"), ("a.b", "MyFlow"));
        assert_eq!(split_fqn("a.MyFlow"), ("a", "MyFlow"));
    }

    #[test]
    fn dotless_name_maps_to_root_module() {
        assert_eq!(split_fqn("MyFlow"), ("", "MyFlow"));
    }

    #[test]
    fn trailing_dot_yields_empty_local_name() {
        assert_eq!(split_fqn("a.b."), ("a.b", ""));
    }
}
