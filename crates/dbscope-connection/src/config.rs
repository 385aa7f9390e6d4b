//! Saved connection configuration

use dbscope_core::ConnectionConfig;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved database connection configuration.
///
/// The `id` is the conid used throughout the metadata boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedConnection {
    /// Unique identifier (conid)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Driver id (memory, postgres, mysql, ...)
    pub driver: String,

    /// Connection parameters (host, port, etc.)
    /// Sensitive values like passwords should be stored separately
    pub params: std::collections::HashMap<String, String>,

    /// Optional folder/group for organization
    pub folder: Option<String>,

    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Last modified timestamp
    pub modified_at: chrono::DateTime<chrono::Utc>,

    /// Last opened timestamp
    pub last_opened: Option<chrono::DateTime<chrono::Utc>>,
}

impl SavedConnection {
    /// Create a new saved connection
    pub fn new(name: impl Into<String>, driver: impl Into<String>) -> Self {
        let name = name.into();
        let driver = driver.into();
        tracing::debug!(name = %name, driver = %driver, "creating new saved connection");
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            driver,
            params: std::collections::HashMap::new(),
            folder: None,
            created_at: now,
            modified_at: now,
            last_opened: None,
        }
    }

    /// Set a connection parameter
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    /// Build the driver-facing configuration
    pub fn to_config(&self) -> ConnectionConfig {
        let mut config = ConnectionConfig::new(&self.driver, &self.name);
        for (key, value) in &self.params {
            config = config.with_param(key, value.clone());
        }
        config
    }
}
