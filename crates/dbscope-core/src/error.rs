//! Error types for dbscope

use thiserror::Error;

/// Core error type for dbscope operations
#[derive(Error, Debug)]
pub enum DbScopeError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Structure error: {0}")]
    Structure(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for dbscope operations
pub type Result<T> = std::result::Result<T, DbScopeError>;
