//! In-memory driver
//!
//! Serves structure snapshots registered up front. Used by tests as the
//! stand-in for a real engine; `open_count` exposes how many sessions were
//! opened so callers can assert open-coalescing behavior.

use async_trait::async_trait;
use dbscope_core::{
    ConnectionConfig, DatabaseDriver, DatabaseSession, DatabaseStructure, DbScopeError, Result,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Driver serving pre-registered `DatabaseStructure` snapshots
pub struct MemoryDriver {
    databases: RwLock<HashMap<String, DatabaseStructure>>,
    open_count: AtomicUsize,
}

impl MemoryDriver {
    /// Create a driver with no databases
    pub fn new() -> Self {
        Self {
            databases: RwLock::new(HashMap::new()),
            open_count: AtomicUsize::new(0),
        }
    }

    /// Register a database snapshot under a name.
    ///
    /// Rejects snapshots that violate the per-kind uniqueness of
    /// `(schema_name, pure_name)` pairs.
    pub fn add_database(&self, name: impl Into<String>, structure: DatabaseStructure) -> Result<()> {
        if let Some((kind, qualified)) = structure.first_duplicate() {
            return Err(DbScopeError::Structure(format!(
                "duplicate {kind} {qualified} in snapshot"
            )));
        }
        let name = name.into();
        tracing::debug!(database = %name, objects = structure.object_count(), "registering memory database");
        self.databases.write().insert(name, structure);
        Ok(())
    }

    /// Remove a registered database
    pub fn remove_database(&self, name: &str) {
        self.databases.write().remove(name);
    }

    /// Number of sessions opened by this driver
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseDriver for MemoryDriver {
    fn id(&self) -> &'static str {
        "memory"
    }

    fn display_name(&self) -> &'static str {
        "In-Memory"
    }

    async fn connect(
        &self,
        _config: &ConnectionConfig,
        database: &str,
    ) -> Result<Arc<dyn DatabaseSession>> {
        let structure = self
            .databases
            .read()
            .get(database)
            .cloned()
            .ok_or_else(|| {
                DbScopeError::Connection(format!("unknown database: {database}"))
            })?;

        self.open_count.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(database = %database, "opened memory session");

        Ok(Arc::new(MemorySession {
            database: database.to_string(),
            structure,
            closed: AtomicBool::new(false),
        }))
    }

    async fn test_connection(&self, _config: &ConnectionConfig) -> Result<()> {
        Ok(())
    }
}

/// Session bound to one registered in-memory database
pub struct MemorySession {
    database: String,
    structure: DatabaseStructure,
    closed: AtomicBool,
}

#[async_trait]
impl DatabaseSession for MemorySession {
    fn driver_name(&self) -> &str {
        "memory"
    }

    fn database(&self) -> &str {
        &self.database
    }

    async fn load_structure(&self) -> Result<DatabaseStructure> {
        if self.is_closed() {
            return Err(DbScopeError::Connection("session is closed".into()));
        }
        Ok(self.structure.clone())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
