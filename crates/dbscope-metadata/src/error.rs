//! Metadata service errors

use dbscope_core::DbScopeError;
use thiserror::Error;

pub type MetadataResult<T> = Result<T, MetadataError>;

/// Service-level errors with user-facing messages.
///
/// A missing object is a distinct error, never a partial response object.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("View not found: {0}")]
    ViewNotFound(String),

    #[error("Metadata operation failed: {0}")]
    OperationFailed(String),
}

impl From<DbScopeError> for MetadataError {
    fn from(err: DbScopeError) -> Self {
        match err {
            DbScopeError::Connection(msg) => MetadataError::ConnectionFailed(msg),
            DbScopeError::Driver(msg) => MetadataError::ConnectionFailed(msg),
            other => MetadataError::OperationFailed(other.to_string()),
        }
    }
}
