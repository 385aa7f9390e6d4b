//! dbscope Drivers - driver registry and the in-memory driver
//!
//! Engine-specific drivers implement `dbscope_core::DatabaseDriver` and are
//! looked up by id through the `DriverRegistry`. The crate ships the `memory`
//! driver, which serves pre-registered structure snapshots; it backs tests and
//! embedding applications that already hold a snapshot.

mod memory;
mod registry;

pub use memory::{MemoryDriver, MemorySession};
pub use registry::DriverRegistry;
