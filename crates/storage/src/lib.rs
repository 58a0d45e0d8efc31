//! Storage layer for tracedb
//!
//! This crate implements the in-memory event database:
//! - EventStore: host sequence + per-device index behind one lock
//! - DeviceIndex: timestamp-ordered device partitions
//! - StartQueues / StartMarkers: start/end correlation tables
//! - StringTable: concurrent string interning and flat export

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod correlation;
pub mod device_index;
pub mod store;
pub mod string_table;

pub use correlation::{StartMarkers, StartQueues};
pub use device_index::{DeviceEvents, DeviceIndex};
pub use store::{EventStore, StoreConfig, StoreStats, DEFAULT_HOST_EVENT_CAPACITY};
pub use string_table::{read_string_table, write_string_table, StringTable, StringTableFormat};
