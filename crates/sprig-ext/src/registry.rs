//! Host-owned registry of callable functions.

use crate::function::Function;
use indexmap::IndexMap;
use std::sync::Arc;

/// A named, insertion-ordered collection of [`Function`]s.
///
/// The host constructs one registry and passes it into the parser and binder
/// for each compilation; lookups are by exact name. Registering a function
/// under a name that is already taken replaces the previous entry.
#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: IndexMap<String, Arc<dyn Function>>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function, keyed by its own reported name.
    pub fn register<F: Function + 'static>(&mut self, function: F) -> &mut Self {
        self.insert(Arc::new(function))
    }

    /// Registers an already-shared function.
    pub fn insert(&mut self, function: Arc<dyn Function>) -> &mut Self {
        self.functions.insert(function.name().to_string(), function);
        self
    }

    /// Looks up a function by exact name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Function>> {
        self.functions.get(name)
    }

    /// Iterates over registered functions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Function>> {
        self.functions.values()
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
