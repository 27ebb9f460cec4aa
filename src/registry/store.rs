//! The shared registry store and its read-only surface.
//!
//! [`ModuleRegistry`] is a cheap-to-clone handle over the session's module
//! map, in-flight set, and component-schema table. The loader
//! ([`crate::registry::loader`]) is the only writer; every other consumer
//! reads through the lookup methods here and in
//! [`crate::registry::resolver`], all of which tolerate absent or
//! still-loading modules by returning `None`.

use std::sync::{Arc, Mutex, MutexGuard};

use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::Value;

use crate::events::RegistryEvent;
use crate::modules::ModuleRepresentation;
use crate::registry::loader::ModuleSource;

/// Mutable registry state, confined behind the handle's mutex.
///
/// The lock is only ever held across synchronous sections; the loader
/// releases it before awaiting the host fetch, so per-FQN mutual exclusion
/// comes from `in_flight`, not from the mutex.
pub(crate) struct RegistryInner {
    pub(crate) modules: FxHashMap<String, ModuleRepresentation>,
    pub(crate) in_flight: FxHashSet<String>,
    pub(crate) schemas: FxHashMap<String, Value>,
}

/// Handle to one visualizer session's registry state.
///
/// Cloning the handle shares the underlying store. All state is
/// process-lifetime: nothing is persisted, and the map is rebuilt from
/// host-supplied content every session.
///
/// # Examples
///
/// ```rust
/// use flowscope::registry::{ModuleRegistry, ModuleSource, ModuleText, SourceError};
/// use async_trait::async_trait;
///
/// struct OneModule;
///
/// #[async_trait]
/// impl ModuleSource for OneModule {
///     async fn request_module(&self, fqn: &str) -> Result<Option<ModuleText>, SourceError> {
///         Ok(Some(ModuleText::new(fqn, "flows:\n  - name: Ping\n    steps: []\n")))
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let registry = ModuleRegistry::new(OneModule);
/// let module = registry.load("com.acme.ping").await.unwrap();
/// assert!(module.is_loaded());
/// assert!(registry.get_flow_definition("com.acme.ping.Ping").is_some());
/// # });
/// ```
#[derive(Clone)]
pub struct ModuleRegistry {
    pub(crate) inner: Arc<Mutex<RegistryInner>>,
    pub(crate) source: Arc<dyn ModuleSource>,
    events_tx: flume::Sender<RegistryEvent>,
    events_rx: flume::Receiver<RegistryEvent>,
}

impl ModuleRegistry {
    /// Create a registry backed by the given host module source.
    pub fn new<S>(source: S) -> Self
    where
        S: ModuleSource + 'static,
    {
        Self::with_source(Arc::new(source))
    }

    /// Create a registry from an already-shared module source.
    pub fn with_source(source: Arc<dyn ModuleSource>) -> Self {
        let (events_tx, events_rx) = flume::unbounded();
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                modules: FxHashMap::default(),
                in_flight: FxHashSet::default(),
                schemas: FxHashMap::default(),
            })),
            source,
            events_tx,
            events_rx,
        }
    }

    pub(crate) fn locked(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().expect("registry lock poisoned")
    }

    /// The registry entry for `fqn`, whatever its status. Consumers that
    /// only want fully-loaded modules should check
    /// [`ModuleRepresentation::is_loaded`].
    pub fn get_loaded_module(&self, fqn: &str) -> Option<ModuleRepresentation> {
        self.locked().modules.get(fqn).cloned()
    }

    /// All registry entries, in no particular order.
    pub fn get_all_loaded_modules(&self) -> Vec<ModuleRepresentation> {
        self.locked().modules.values().cloned().collect()
    }

    /// Merge host-supplied component schemas into the schema table.
    ///
    /// Called once at initialization in the typical session; later calls
    /// overwrite per key.
    pub fn set_component_schemas(&self, schemas: FxHashMap<String, Value>) {
        self.locked().schemas.extend(schemas);
    }

    /// The config schema registered for a component type FQN.
    pub fn get_component_schema(&self, component_type_fqn: &str) -> Option<Value> {
        self.locked().schemas.get(component_type_fqn).cloned()
    }

    /// A receiver for registry notifications.
    ///
    /// The channel is shared work-queue style: each event is delivered to
    /// one receiver. A session typically has a single subscriber (the
    /// rendering layer).
    pub fn subscribe(&self) -> flume::Receiver<RegistryEvent> {
        self.events_rx.clone()
    }

    /// Drain all currently queued events without blocking.
    pub fn drain_events(&self) -> Vec<RegistryEvent> {
        self.events_rx.try_iter().collect()
    }

    pub(crate) fn emit(&self, event: RegistryEvent) {
        // Unbounded channel with a held receiver: send cannot fail here,
        // but a disconnected subscriber must never poison a load.
        let _ = self.events_tx.send(event);
    }
}
