//! # tracedb
//!
//! In-memory, thread-safe event database for trace and profiling events.
//!
//! tracedb collects timestamped events from many concurrent producers,
//! partitions them by origin (host or device), correlates start/end pairs,
//! interns repeated string labels and answers ad-hoc filter queries.
//!
//! ## Quick Start
//!
//! ```
//! use tracedb::prelude::*;
//!
//! let db = TraceDb::open();
//!
//! // Device events are indexed per device, in timestamp order
//! let device = DeviceId::new(0);
//! let start = db.add_event(Event::device(device, EventKind::KernelExecution, Timestamp::from_nanos(50)));
//! db.mark_device_event_start(TraceId::new(1), start);
//!
//! // Close the oldest pending start of the trace
//! let start = db.matching_device_event_start(TraceId::new(1)).unwrap();
//! db.add_event(
//!     Event::device(device, EventKind::KernelExecution, Timestamp::from_nanos(90))
//!         .with_start(start.id().unwrap()),
//! );
//!
//! let kernels = db.filter_events(|e| e.kind() == &EventKind::KernelExecution);
//! assert_eq!(kernels.len(), 2);
//! ```
//!
//! ## Layers
//!
//! - `tracedb-core`: identifiers, [`Event`], [`Error`]
//! - `tracedb-storage`: the locked event store and the string table
//! - this crate: the shared [`TraceDb`] handle and its builder
//!
//! ## Concurrency
//!
//! One lock serializes every event-side operation; the string table has its
//! own. Queries return snapshots of `Arc` handles that stay valid after the
//! database is dropped.

#![warn(missing_docs)]

mod database;
mod error;

pub mod prelude;
pub mod types;

// Re-export main entry points
pub use database::{TraceDb, TraceDbBuilder, MAX_HOST_EVENT_CAPACITY};
pub use error::{Error, Result};

// Re-export the store for callers that manage their own sharing
pub use tracedb_storage::EventStore;

// Re-export types
pub use types::*;
