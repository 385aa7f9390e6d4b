//! Opened connection handle

use dbscope_core::{DatabaseSession, DatabaseStructure, Result};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Key of the opened-connection cache: one `(conid, database)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructureKey {
    pub conid: Uuid,
    pub database: String,
}

impl StructureKey {
    pub fn new(conid: Uuid, database: impl Into<String>) -> Self {
        Self {
            conid,
            database: database.into(),
        }
    }
}

impl fmt::Display for StructureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.conid, self.database)
    }
}

/// A live handle bound to one `(conid, database)` pair, holding the session
/// and the structure snapshot loaded when it was opened.
///
/// The snapshot is immutable; refreshing produces a new `OpenedConnection`.
pub struct OpenedConnection {
    conid: Uuid,
    database: String,
    session: Arc<dyn DatabaseSession>,
    structure: DatabaseStructure,
    opened_at: chrono::DateTime<chrono::Utc>,
}

impl fmt::Debug for OpenedConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenedConnection")
            .field("conid", &self.conid)
            .field("database", &self.database)
            .field("opened_at", &self.opened_at)
            .finish_non_exhaustive()
    }
}

impl OpenedConnection {
    pub(crate) fn new(
        conid: Uuid,
        database: String,
        session: Arc<dyn DatabaseSession>,
        structure: DatabaseStructure,
    ) -> Self {
        Self {
            conid,
            database,
            session,
            structure,
            opened_at: chrono::Utc::now(),
        }
    }

    pub fn conid(&self) -> Uuid {
        self.conid
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn key(&self) -> StructureKey {
        StructureKey::new(self.conid, self.database.clone())
    }

    /// The structure snapshot loaded when this handle was opened
    pub fn structure(&self) -> &DatabaseStructure {
        &self.structure
    }

    pub fn session(&self) -> &Arc<dyn DatabaseSession> {
        &self.session
    }

    pub fn opened_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.opened_at
    }

    /// Close the underlying session
    pub async fn close(&self) -> Result<()> {
        self.session.close().await
    }
}
