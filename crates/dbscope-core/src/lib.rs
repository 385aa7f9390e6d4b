//! dbscope Core - Core abstractions for the metadata boundary
//!
//! This crate provides the fundamental traits and types that all other
//! dbscope crates depend on. It defines:
//!
//! - `DatabaseDriver` - Trait for database driver implementations
//! - `DatabaseSession` - Trait for live, database-bound sessions
//! - `DatabaseStructure` - The structure snapshot model (tables, views,
//!   procedures, functions, triggers, foreign keys)
//! - `DbScopeError` / `Result` - Common error handling

mod config;
mod driver;
mod error;
mod structure;

pub use config::*;
pub use driver::*;
pub use error::*;
pub use structure::*;
