//! Opened-connection cache
//!
//! Maps `(conid, database)` keys to opened handles. `ensure_opened` is
//! idempotent and coalesces concurrent opens of the same key: every caller
//! awaits the same cell, exactly one of them runs the underlying open, and a
//! failed open leaves the cell empty so the next call retries.

use crate::{ConnectionRegistry, OpenedConnection, StructureKey};
use dbscope_core::{DbScopeError, Result};
use dbscope_drivers::DriverRegistry;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use uuid::Uuid;

type OpenCell = Arc<OnceCell<Arc<OpenedConnection>>>;

/// Cache behavior knobs
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheConfig {
    /// Maximum age of a structure snapshot before a lookup reloads it.
    /// `None` keeps snapshots for the connection's lifetime.
    pub structure_ttl: Option<Duration>,
}

/// Counts of cache entries, for monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Keys with an opened handle
    pub opened: usize,
    /// Keys with an open currently in flight
    pub in_flight: usize,
}

/// The opened-connection cache
pub struct DatabaseConnections {
    drivers: Arc<DriverRegistry>,
    registry: Arc<ConnectionRegistry>,
    config: CacheConfig,
    opened: Mutex<HashMap<StructureKey, OpenCell>>,
}

impl DatabaseConnections {
    /// Create a cache resolving conids through `registry` and drivers through
    /// `drivers`, with snapshots kept for the connection's lifetime
    pub fn new(drivers: Arc<DriverRegistry>, registry: Arc<ConnectionRegistry>) -> Self {
        Self::with_config(drivers, registry, CacheConfig::default())
    }

    /// Create a cache with explicit behavior knobs
    pub fn with_config(
        drivers: Arc<DriverRegistry>,
        registry: Arc<ConnectionRegistry>,
        config: CacheConfig,
    ) -> Self {
        Self {
            drivers,
            registry,
            config,
            opened: Mutex::new(HashMap::new()),
        }
    }

    /// The saved-connection registry this cache resolves conids through
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Return the opened handle for `(conid, database)`, establishing it on
    /// first use.
    ///
    /// Idempotent: later calls with the same key share the handle and its
    /// snapshot. Fails with `DbScopeError::Connection` when the conid is
    /// unknown or the database cannot be opened; failures are not cached.
    #[tracing::instrument(skip_all, fields(conid = %conid, database = %database))]
    pub async fn ensure_opened(
        &self,
        conid: Uuid,
        database: &str,
    ) -> Result<Arc<OpenedConnection>> {
        let key = StructureKey::new(conid, database);
        let cell = {
            let mut opened = self.opened.lock();
            opened.entry(key).or_default().clone()
        };

        if let Some(conn) = cell.get() {
            if !self.is_stale(conn) {
                tracing::debug!("cache hit for opened connection");
                return Ok(conn.clone());
            }
            tracing::debug!("snapshot past ttl, reloading");
            return self.refresh(conid, database).await;
        }

        let conn = cell
            .get_or_try_init(|| self.open(conid, database))
            .await?;
        Ok(conn.clone())
    }

    fn is_stale(&self, conn: &OpenedConnection) -> bool {
        match self.config.structure_ttl {
            Some(ttl) => {
                let age = chrono::Utc::now().signed_duration_since(conn.opened_at());
                age.to_std().map_or(false, |age| age > ttl)
            }
            None => false,
        }
    }

    /// Peek at an opened handle without opening
    pub fn get(&self, conid: Uuid, database: &str) -> Option<Arc<OpenedConnection>> {
        let key = StructureKey::new(conid, database);
        self.opened
            .lock()
            .get(&key)
            .and_then(|cell| cell.get().cloned())
    }

    /// Check whether a key has an opened handle
    pub fn is_opened(&self, conid: Uuid, database: &str) -> bool {
        self.get(conid, database).is_some()
    }

    async fn open(&self, conid: Uuid, database: &str) -> Result<Arc<OpenedConnection>> {
        tracing::info!("opening connection");
        let saved = self.registry.get(conid).ok_or_else(|| {
            DbScopeError::Connection(format!("unknown connection: {conid}"))
        })?;

        let driver = self
            .drivers
            .get(&saved.driver)
            .ok_or_else(|| DbScopeError::Driver(format!("unknown driver: {}", saved.driver)))?;

        let config = saved.to_config();
        let session = driver.connect(&config, database).await.map_err(|e| {
            tracing::error!(error = %e, "failed to open connection");
            e
        })?;

        let structure = session.load_structure().await?;
        self.registry.touch_opened(conid);

        tracing::info!(
            objects = structure.object_count(),
            "connection opened, structure loaded"
        );
        Ok(Arc::new(OpenedConnection::new(
            conid,
            database.to_string(),
            session,
            structure,
        )))
    }

    /// Close the handle for one `(conid, database)` key.
    ///
    /// An open racing a close keeps its handle; its session simply stops being
    /// tracked here.
    #[tracing::instrument(skip_all, fields(conid = %conid, database = %database))]
    pub async fn close(&self, conid: Uuid, database: &str) -> Result<()> {
        let key = StructureKey::new(conid, database);
        let removed = self.opened.lock().remove(&key);
        if let Some(cell) = removed {
            if let Some(conn) = cell.get() {
                tracing::info!("closing connection");
                conn.close().await?;
            }
        }
        Ok(())
    }

    /// Close every opened database of one conid
    #[tracing::instrument(skip_all, fields(conid = %conid))]
    pub async fn close_all(&self, conid: Uuid) -> Result<()> {
        let removed: Vec<OpenCell> = {
            let mut opened = self.opened.lock();
            let keys: Vec<StructureKey> = opened
                .keys()
                .filter(|k| k.conid == conid)
                .cloned()
                .collect();
            keys.iter().filter_map(|k| opened.remove(k)).collect()
        };
        for cell in removed {
            if let Some(conn) = cell.get() {
                conn.close().await?;
            }
        }
        Ok(())
    }

    /// Close everything
    pub async fn close_everything(&self) -> Result<()> {
        let removed: Vec<OpenCell> = {
            let mut opened = self.opened.lock();
            opened.drain().map(|(_, cell)| cell).collect()
        };
        let count = removed.len();
        for cell in removed {
            if let Some(conn) = cell.get() {
                conn.close().await?;
            }
        }
        tracing::info!(closed = count, "closed all connections");
        Ok(())
    }

    /// Reload the structure snapshot of an already-open key, replacing the
    /// cached handle. No-op returning the fresh handle; errors if the key is
    /// not open or the reload fails.
    #[tracing::instrument(skip_all, fields(conid = %conid, database = %database))]
    pub async fn refresh(&self, conid: Uuid, database: &str) -> Result<Arc<OpenedConnection>> {
        let current = self.get(conid, database).ok_or_else(|| {
            DbScopeError::NotFound(format!("connection not opened: {conid}/{database}"))
        })?;

        let session = current.session().clone();
        let structure = session.load_structure().await?;
        tracing::info!(
            objects = structure.object_count(),
            "structure snapshot refreshed"
        );

        let refreshed = Arc::new(OpenedConnection::new(
            conid,
            database.to_string(),
            session,
            structure,
        ));

        let key = StructureKey::new(conid, database);
        self.opened.lock().insert(
            key,
            Arc::new(OnceCell::new_with(Some(refreshed.clone()))),
        );
        Ok(refreshed)
    }

    /// Cache statistics
    pub fn stats(&self) -> ConnectionStats {
        let opened = self.opened.lock();
        let done = opened.values().filter(|c| c.get().is_some()).count();
        ConnectionStats {
            opened: done,
            in_flight: opened.len() - done,
        }
    }
}
