//! Module representations and definition extraction.
//!
//! A [`ModuleRepresentation`] is the structured form of one DSL source
//! module: its raw text, parsed tree, extracted definition lists, load
//! status, and diagnostics.

pub mod definitions;
pub mod extract;
pub mod representation;

pub use definitions::{
    ComponentTypeInfo, ContextDefinition, DefinitionSet, FlowDefinition, NamedComponentDefinition,
};
pub use extract::{extract_definitions, extract_imports};
pub use representation::ModuleRepresentation;
