//! Public types for the tracedb API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Identifiers and time
pub use tracedb_core::{DeviceId, EventId, FunctionId, StringId, Timestamp, TraceId};

// Events
pub use tracedb_core::{Event, EventKind, EventRef, Origin};

// Store configuration and statistics
pub use tracedb_storage::{StoreConfig, StoreStats, StringTableFormat};

// String-table export helpers
pub use tracedb_storage::{read_string_table, write_string_table};
