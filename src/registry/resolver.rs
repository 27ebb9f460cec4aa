//! Reference resolution across module boundaries.
//!
//! All lookups here are pure reads over the registry store. Every miss —
//! absent module, still-loading module, absent name — returns `None`
//! rather than failing, and never triggers a load.

use serde_json::Value;
use tracing::instrument;

use crate::modules::extract::definition_list;
use crate::modules::{
    ComponentTypeInfo, ContextDefinition, FlowDefinition, ModuleRepresentation,
    NamedComponentDefinition,
};
use crate::registry::store::ModuleRegistry;
use crate::types::split_fqn;

impl ModuleRegistry {
    /// Resolve a component reference against the named-component aliases of
    /// the requesting module.
    ///
    /// An exact name match on the module's named components resolves through
    /// the alias; anything else is treated as a direct standard-library type
    /// reference, not an error. Only the requesting module's own aliases are
    /// searched, never aliases imported from other modules.
    #[instrument(skip(self))]
    pub fn resolve_component_type_info(
        &self,
        component_ref: &str,
        module_fqn: &str,
    ) -> Option<ComponentTypeInfo> {
        let inner = self.locked();
        let module = inner.modules.get(module_fqn)?;
        let definitions = module.definitions.as_ref()?;

        match definitions.component(component_ref) {
            Some(component) => Some(ComponentTypeInfo {
                base_type: component
                    .component_type
                    .clone()
                    .unwrap_or_else(|| component_ref.to_string()),
                component_definition: Some(component.clone()),
                source_module_fqn: module_fqn.to_string(),
                is_named_component: true,
            }),
            None => Some(ComponentTypeInfo {
                base_type: component_ref.to_string(),
                component_definition: None,
                source_module_fqn: module_fqn.to_string(),
                is_named_component: false,
            }),
        }
    }

    /// The typed flow definition for a flow FQN.
    pub fn get_flow_definition(&self, flow_fqn: &str) -> Option<FlowDefinition> {
        self.lookup(flow_fqn, |module, name| {
            module.definitions.as_ref()?.flow(name).cloned()
        })
    }

    /// The exact parsed source node for a flow FQN, for round-trip
    /// display and editing.
    pub fn get_flow_definition_dsl(&self, flow_fqn: &str) -> Option<Value> {
        self.lookup(flow_fqn, |module, name| {
            raw_definition_node(module, "flows", name)
        })
    }

    /// The typed named-component definition for a component FQN.
    pub fn get_named_component_definition(
        &self,
        component_fqn: &str,
    ) -> Option<NamedComponentDefinition> {
        self.lookup(component_fqn, |module, name| {
            module.definitions.as_ref()?.component(name).cloned()
        })
    }

    /// The exact parsed source node for a named-component FQN.
    pub fn get_named_component_definition_dsl(&self, component_fqn: &str) -> Option<Value> {
        self.lookup(component_fqn, |module, name| {
            raw_definition_node(module, "components", name)
        })
    }

    /// The typed context-variable definition for a context FQN.
    pub fn get_context_definition(&self, context_fqn: &str) -> Option<ContextDefinition> {
        self.lookup(context_fqn, |module, name| {
            module.definitions.as_ref()?.context_var(name).cloned()
        })
    }

    /// Split an FQN at its last dot, look up the module by prefix, then
    /// apply `select` to pull one definition out by local name.
    fn lookup<T>(
        &self,
        fqn: &str,
        select: impl FnOnce(&ModuleRepresentation, &str) -> Option<T>,
    ) -> Option<T> {
        let (module_fqn, name) = split_fqn(fqn);
        let inner = self.locked();
        let module = inner.modules.get(module_fqn)?;
        select(module, name)
    }
}

/// The raw list entry for one definition, honoring the same
/// namespaced-over-flat precedence as extraction.
fn raw_definition_node(module: &ModuleRepresentation, kind: &str, name: &str) -> Option<Value> {
    let parsed = module.parsed_content.as_ref()?;
    definition_list(parsed, kind)
        .iter()
        .find(|node| node.get("name").and_then(Value::as_str) == Some(name))
        .cloned()
}
