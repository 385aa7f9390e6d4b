//! dbscope Connection - saved connections and the opened-connection cache
//!
//! A `SavedConnection` is one configured connection (the conid). The
//! `ConnectionRegistry` persists them as JSON. `DatabaseConnections` maps a
//! `(conid, database)` key to an `OpenedConnection` holding that database's
//! structure snapshot; concurrent opens of the same key coalesce into one
//! underlying open.

mod cache;
mod config;
mod opened;
mod registry;

pub use cache::{CacheConfig, ConnectionStats, DatabaseConnections};
pub use config::SavedConnection;
pub use opened::{OpenedConnection, StructureKey};
pub use registry::ConnectionRegistry;
