//! Component registry - symbolic name to factory resolution.
//!
//! Hosts populate the registry once at startup, then share it immutably
//! (`Arc<ComponentRegistry>`) with every executor. Resolution is a plain
//! map lookup; there is no dynamic class loading or scanning.

use flowlet_api::{Component, ComponentError};
use std::collections::HashMap;

/// Factory producing a fresh component instance per invocation.
///
/// Returning `Err` models a failed construction; the executor reports
/// it on the error channel as an instantiation failure.
pub type ComponentFactory =
    Box<dyn Fn() -> Result<Box<dyn Component>, ComponentError> + Send + Sync>;

/// Central registry mapping symbolic component names to factories.
///
/// # Concurrency
///
/// Registration takes `&mut self`, lookup takes `&self`. The intended
/// pattern is: populate at startup, wrap in `Arc`, hand clones to
/// executors. Nothing mutates the registry after that point.
pub struct ComponentRegistry {
    factories: HashMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory under a symbolic name.
    ///
    /// Re-registering an existing name replaces the previous factory
    /// (last wins); the replacement is logged at warn level.
    pub fn register(&mut self, name: impl Into<String>, factory: ComponentFactory) {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_some() {
            tracing::warn!(component = %name, "replacing registered component factory");
        } else {
            tracing::debug!(component = %name, "registered component factory");
        }
    }

    /// Looks up the factory registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ComponentFactory> {
        self.factories.get(name)
    }

    /// Returns `true` if a factory is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Returns the registered names, in unspecified order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Unregisters a name. Returns `true` if a factory was removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// Returns the number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` if no factories are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names = self.names();
        names.sort_unstable();
        f.debug_struct("ComponentRegistry")
            .field("components", &names)
            .finish()
    }
}
