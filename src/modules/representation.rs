//! The per-module registry entry.

use serde_json::Value;

use crate::modules::definitions::DefinitionSet;
use crate::registry::loader::LoadError;
use crate::types::ModuleStatus;

/// The parsed, structured form of one DSL source module, its load status,
/// and diagnostics.
///
/// # Invariants
///
/// - `status == Loaded` ⇒ `definitions` is present and `errors` is empty.
/// - `status == Error` ⇒ `parsed_content` is absent, `raw_content` is
///   retained as fetched, and `errors` is non-empty.
///
/// Entries are keyed by module FQN in the registry and are append-only at
/// the key level: only their status and content transition, never their
/// identity, and nothing is deleted during a session.
#[derive(Debug, Clone)]
pub struct ModuleRepresentation {
    pub fqn: String,
    /// The module text exactly as fetched, kept even when parsing fails.
    pub raw_content: String,
    /// The decoded tree, kept for `*_dsl` round-trip lookups.
    pub parsed_content: Option<Value>,
    pub definitions: Option<DefinitionSet>,
    pub imports: Vec<String>,
    pub status: ModuleStatus,
    pub errors: Vec<LoadError>,
}

impl ModuleRepresentation {
    /// A fresh entry for a load that has just been issued.
    pub fn loading(fqn: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            raw_content: String::new(),
            parsed_content: None,
            definitions: None,
            imports: Vec::new(),
            status: ModuleStatus::Loading,
            errors: Vec::new(),
        }
    }

    /// Transition this entry to its loaded terminal state.
    pub fn complete(
        &mut self,
        raw_content: String,
        parsed_content: Value,
        definitions: DefinitionSet,
        imports: Vec<String>,
    ) {
        self.raw_content = raw_content;
        self.parsed_content = Some(parsed_content);
        self.definitions = Some(definitions);
        self.imports = imports;
        self.status = ModuleStatus::Loaded;
        self.errors.clear();
    }

    /// Transition this entry to its error terminal state, preserving
    /// whatever raw content was fetched before the failure.
    pub fn fail(&mut self, raw_content: String, error: LoadError) {
        self.raw_content = raw_content;
        self.parsed_content = None;
        self.definitions = None;
        self.status = ModuleStatus::Error;
        self.errors.push(error);
    }

    pub fn is_loaded(&self) -> bool {
        self.status == ModuleStatus::Loaded
    }
}
