//! dbscope Metadata - metadata operations over opened connections
//!
//! The `MetadataService` serves the GET-style metadata operations
//! (`list_objects`, `table_info`, `view_info`) on top of the
//! opened-connection cache. Parameter and response types are plain serde
//! shapes, wire-compatible with the tool's clients.

mod error;
mod requests;
mod service;

pub use error::{MetadataError, MetadataResult};
pub use requests::{DatabaseParams, NamedObjectParams, ObjectList, TableMetadata};
pub use service::MetadataService;
