//! The module registry: loading, storage, and reference resolution.
//!
//! The registry is organised around a shared [`ModuleRegistry`] handle. The
//! loader ([`loader`]) is its single writer; the resolver ([`resolver`])
//! and every downstream consumer are pure readers.

pub mod loader;
pub mod resolver;
pub mod store;

pub use loader::{LoadError, ModuleSource, ModuleText, SourceError};
pub use store::ModuleRegistry;
