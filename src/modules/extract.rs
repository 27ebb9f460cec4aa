//! Definition extraction from a parsed module tree.
//!
//! Modules come in two layouts: a namespaced one where the lists live under
//! a `definitions` key (`definitions.flows`, `definitions.components`,
//! `definitions.context`) and a flat one where they sit at the root. Per
//! definition kind, the namespaced list wins when it is non-empty, then the
//! flat list, then an empty list.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::modules::definitions::{
    ContextDefinition, DefinitionSet, FlowDefinition, NamedComponentDefinition,
};

/// Derives the typed definition lists from a parsed module tree.
///
/// Extraction is lenient: a list entry that does not deserialize (most
/// commonly, one missing a `name`) is skipped with a debug trace rather
/// than failing the whole module.
pub fn extract_definitions(parsed: &Value) -> DefinitionSet {
    DefinitionSet {
        context: extract_kind::<ContextDefinition>(parsed, "context"),
        components: extract_kind::<NamedComponentDefinition>(parsed, "components"),
        flows: extract_kind::<FlowDefinition>(parsed, "flows"),
    }
}

/// Derives the import list: the root `imports` key, string entries only.
pub fn extract_imports(parsed: &Value) -> Vec<String> {
    parsed
        .get("imports")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn extract_kind<T: DeserializeOwned>(parsed: &Value, kind: &str) -> Vec<T> {
    let items = definition_list(parsed, kind);
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>((*item).clone()) {
            Ok(def) => Some(def),
            Err(err) => {
                debug!(kind, %err, "skipping malformed definition entry");
                None
            }
        })
        .collect()
}

/// The raw list for one definition kind, applying the namespaced-over-flat
/// precedence. Shared with the resolver's `*_dsl` lookups so the raw node
/// returned for round-trip display comes from the same list extraction
/// consumed.
pub(crate) fn definition_list<'a>(parsed: &'a Value, kind: &str) -> &'a [Value] {
    let namespaced = parsed
        .get("definitions")
        .and_then(|d| d.get(kind))
        .and_then(Value::as_array);
    if let Some(list) = namespaced {
        if !list.is_empty() {
            return list;
        }
    }
    parsed
        .get(kind)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
