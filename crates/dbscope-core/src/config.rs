//! Connection configuration passed to drivers

use std::collections::HashMap;

/// Configuration handed to a driver when opening a session.
///
/// Drivers interpret the parameter map themselves (host, port, file path,
/// credentials); dbscope treats it as opaque.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Display name of the configured connection
    pub name: String,
    /// Driver id (e.g. "postgres", "mysql", "memory")
    pub driver: String,
    /// Driver-specific connection parameters
    pub params: HashMap<String, String>,
}

impl ConnectionConfig {
    /// Create a configuration with an empty parameter map
    pub fn new(driver: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            driver: driver.to_string(),
            params: HashMap::new(),
        }
    }

    /// Set a connection parameter
    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Get a parameter value
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
