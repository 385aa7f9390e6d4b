//! Registry of saved connections with JSON persistence

use crate::SavedConnection;
use dbscope_core::{DbScopeError, Result};
use parking_lot::RwLock;
use std::path::PathBuf;
use uuid::Uuid;

/// Holds the saved connection configurations and persists them to disk
pub struct ConnectionRegistry {
    /// Saved connection configurations
    saved: RwLock<Vec<SavedConnection>>,

    /// Path to save connections
    storage_path: Option<PathBuf>,
}

impl ConnectionRegistry {
    /// Create an in-memory registry without persistence
    pub fn new() -> Self {
        Self {
            saved: RwLock::new(Vec::new()),
            storage_path: None,
        }
    }

    /// Create a registry persisting to the given path
    pub fn with_storage_path(path: PathBuf) -> Self {
        Self {
            saved: RwLock::new(Vec::new()),
            storage_path: Some(path),
        }
    }

    /// Get all saved connections
    pub fn all(&self) -> Vec<SavedConnection> {
        self.saved.read().clone()
    }

    /// Get a saved connection by conid
    pub fn get(&self, id: Uuid) -> Option<SavedConnection> {
        self.saved.read().iter().find(|c| c.id == id).cloned()
    }

    /// Add a saved connection
    pub fn add(&self, connection: SavedConnection) {
        self.saved.write().push(connection);
    }

    /// Remove a saved connection
    pub fn remove(&self, id: Uuid) {
        self.saved.write().retain(|c| c.id != id);
    }

    /// Update a saved connection in place
    pub fn update(&self, connection: SavedConnection) {
        let mut saved = self.saved.write();
        if let Some(pos) = saved.iter().position(|c| c.id == connection.id) {
            saved[pos] = connection;
        }
    }

    /// Record that a connection was opened now
    pub fn touch_opened(&self, id: Uuid) {
        let mut saved = self.saved.write();
        if let Some(conn) = saved.iter_mut().find(|c| c.id == id) {
            conn.last_opened = Some(chrono::Utc::now());
        }
    }

    /// Load connections from persistent storage
    #[tracing::instrument(skip(self))]
    pub async fn load_from_storage(&self) -> Result<()> {
        tracing::debug!("loading connections from storage");
        if let Some(ref path) = self.storage_path {
            if path.exists() {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .map_err(DbScopeError::Io)?;

                let connections: Vec<SavedConnection> =
                    serde_json::from_str(&content).map_err(DbScopeError::Serialization)?;

                tracing::info!(count = connections.len(), "connections loaded from storage");
                *self.saved.write() = connections;
                return Ok(());
            }
        }
        tracing::debug!("no storage path configured or file doesn't exist");
        Ok(())
    }

    /// Save connections to persistent storage
    #[tracing::instrument(skip(self))]
    pub async fn save_to_storage(&self) -> Result<()> {
        tracing::debug!("saving connections to storage");
        if let Some(ref path) = self.storage_path {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(DbScopeError::Io)?;
            }

            let connections = self.saved.read().clone();
            let content =
                serde_json::to_string_pretty(&connections).map_err(DbScopeError::Serialization)?;

            tokio::fs::write(path, content)
                .await
                .map_err(DbScopeError::Io)?;

            tracing::info!(count = connections.len(), path = ?path, "connections saved to storage");
        } else {
            tracing::debug!("no storage path configured");
        }
        Ok(())
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_get_remove_update() {
        let registry = ConnectionRegistry::new();
        let conn = SavedConnection::new("local", "memory");
        let id = conn.id;
        registry.add(conn);

        assert!(registry.get(id).is_some());
        assert_eq!(registry.all().len(), 1);

        let mut updated = registry.get(id).unwrap();
        updated.name = "renamed".into();
        registry.update(updated);
        assert_eq!(registry.get(id).unwrap().name, "renamed");

        registry.remove(id);
        assert!(registry.get(id).is_none());
    }

    #[tokio::test]
    async fn storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("connections.json");

        let registry = ConnectionRegistry::with_storage_path(path.clone());
        let conn = SavedConnection::new("local", "memory").with_param("host", "localhost");
        let id = conn.id;
        registry.add(conn);
        registry.save_to_storage().await.unwrap();

        let reloaded = ConnectionRegistry::with_storage_path(path);
        reloaded.load_from_storage().await.unwrap();
        let loaded = reloaded.get(id).unwrap();
        assert_eq!(loaded.name, "local");
        assert_eq!(loaded.params.get("host").map(String::as_str), Some("localhost"));
    }

    #[tokio::test]
    async fn load_from_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ConnectionRegistry::with_storage_path(dir.path().join("absent.json"));
        registry.load_from_storage().await.unwrap();
        assert!(registry.all().is_empty());
    }
}
