//! Driver registry

use crate::MemoryDriver;
use dbscope_core::DatabaseDriver;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of available database drivers, keyed by driver id
pub struct DriverRegistry {
    drivers: RwLock<HashMap<&'static str, Arc<dyn DatabaseDriver>>>,
}

impl DriverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            drivers: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with the built-in drivers registered
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(MemoryDriver::new()));
        registry
    }

    /// Register a driver under its id, replacing any previous registration
    pub fn register(&self, driver: Arc<dyn DatabaseDriver>) {
        let id = driver.id();
        tracing::debug!(driver = %id, "registering driver");
        self.drivers.write().insert(id, driver);
    }

    /// Look up a driver by id
    pub fn get(&self, id: &str) -> Option<Arc<dyn DatabaseDriver>> {
        self.drivers.read().get(id).cloned()
    }

    /// Ids of all registered drivers
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.drivers.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_include_memory_driver() {
        let registry = DriverRegistry::with_defaults();
        assert!(registry.get("memory").is_some());
        assert!(registry.get("nope").is_none());
        assert_eq!(registry.ids(), vec!["memory"]);
    }

    #[test]
    fn register_replaces_existing_driver() {
        let registry = DriverRegistry::new();
        registry.register(Arc::new(MemoryDriver::new()));
        registry.register(Arc::new(MemoryDriver::new()));
        assert_eq!(registry.ids().len(), 1);
    }
}
