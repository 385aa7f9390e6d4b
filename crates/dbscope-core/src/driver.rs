//! Database driver and session traits
//!
//! Database engines are consumed as black boxes: a `DatabaseDriver` knows how
//! to open a `DatabaseSession` bound to one database, and a session knows how
//! to load that database's structure snapshot.

use crate::{ConnectionConfig, DatabaseStructure, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// A database driver. One instance per supported engine, registered in the
/// driver registry under its `id`.
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Unique identifier (e.g. "postgres", "mysql", "memory")
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn display_name(&self) -> &'static str {
        self.id()
    }

    /// Open a session bound to one database.
    ///
    /// Fails with `DbScopeError::Connection` when the engine is unreachable or
    /// the database name is invalid.
    async fn connect(
        &self,
        config: &ConnectionConfig,
        database: &str,
    ) -> Result<Arc<dyn DatabaseSession>>;

    /// Verify the configuration can reach the engine, without keeping a
    /// session open.
    async fn test_connection(&self, config: &ConnectionConfig) -> Result<()>;
}

/// A live session bound to one `(connection, database)` pair
#[async_trait]
pub trait DatabaseSession: Send + Sync {
    /// Driver id this session belongs to
    fn driver_name(&self) -> &str;

    /// Database this session is bound to
    fn database(&self) -> &str;

    /// Load the structure snapshot of the bound database
    async fn load_structure(&self) -> Result<DatabaseStructure>;

    /// Cheap liveness check
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Close the session
    async fn close(&self) -> Result<()>;

    /// Check if the session is closed
    fn is_closed(&self) -> bool;
}

impl std::fmt::Debug for dyn DatabaseSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSession")
            .field("driver", &self.driver_name())
            .field("database", &self.database())
            .finish_non_exhaustive()
    }
}
