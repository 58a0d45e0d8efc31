//! Convenient imports for tracedb.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use tracedb::prelude::*;
//!
//! let db = TraceDb::open();
//! db.add_event(Event::host(EventKind::UserMarker, Timestamp::ZERO));
//! ```

// Main entry point
pub use crate::database::{TraceDb, TraceDbBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::types::{
    DeviceId, Event, EventId, EventKind, EventRef, FunctionId, Origin, StringId, Timestamp,
    TraceId,
};

// Configuration
pub use crate::types::{StoreConfig, StringTableFormat};

// Re-export serde_json for payload construction
pub use serde_json::json;
