//! Typed definitions extracted from parsed DSL modules.
//!
//! Extraction turns the loosely-typed parsed tree into a tagged set of
//! [`FlowDefinition`], [`NamedComponentDefinition`], and [`ContextDefinition`]
//! values so the resolver never threads raw nodes around. The raw tree is
//! still retained on the module entry for round-trip display (`*_dsl`
//! lookups).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A module-local alias binding a name to an underlying component type plus
/// fixed configuration.
///
/// References inside a module resolve against these aliases first; a
/// reference that matches no alias is treated as a direct standard-library
/// type reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedComponentDefinition {
    pub name: String,
    /// The underlying component type FQN (e.g. `StdLib:HttpCall`).
    #[serde(rename = "type", default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub config: Value,
}

/// A flow definition: an entry trigger plus an ordered list of steps.
///
/// Steps stay as raw nodes; downstream consumers (graph construction, test
/// synthesis) only need counts and a handful of well-known keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDefinition {
    pub name: String,
    #[serde(default)]
    pub trigger: Option<Value>,
    #[serde(default)]
    pub steps: Vec<Value>,
}

impl FlowDefinition {
    /// The trigger's `type` field, when present.
    pub fn trigger_type(&self) -> Option<&str> {
        self.trigger.as_ref()?.get("type")?.as_str()
    }
}

/// A context-variable definition. Only the name is modeled; the remaining
/// keys ride along untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextDefinition {
    pub name: String,
    #[serde(flatten, default)]
    pub rest: Value,
}

/// The three definition lists extracted from one module.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DefinitionSet {
    #[serde(default)]
    pub context: Vec<ContextDefinition>,
    #[serde(default)]
    pub components: Vec<NamedComponentDefinition>,
    #[serde(default)]
    pub flows: Vec<FlowDefinition>,
}

impl DefinitionSet {
    pub fn flow(&self, name: &str) -> Option<&FlowDefinition> {
        self.flows.iter().find(|f| f.name == name)
    }

    pub fn component(&self, name: &str) -> Option<&NamedComponentDefinition> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn context_var(&self, name: &str) -> Option<&ContextDefinition> {
        self.context.iter().find(|c| c.name == name)
    }
}

/// Result of resolving a component reference against a module.
///
/// `is_named_component` distinguishes the alias path (the reference matched a
/// module-local named component) from the direct path (the reference is taken
/// verbatim as a standard-library type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTypeInfo {
    pub base_type: String,
    pub component_definition: Option<NamedComponentDefinition>,
    pub source_module_fqn: String,
    pub is_named_component: bool,
}
