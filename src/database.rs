//! Main database entry point for tracedb.
//!
//! This module provides [`TraceDb`], a cheaply clonable handle to one shared
//! [`EventStore`], and [`TraceDbBuilder`] for configuring it.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use tracedb_core::StringId;
use tracedb_storage::{
    read_string_table, EventStore, StoreConfig, StringTableFormat, DEFAULT_HOST_EVENT_CAPACITY,
};
use tracing::{debug, warn};

/// Largest accepted host-event pre-allocation.
///
/// The capacity is only a hint; this bound stops a typo from reserving
/// gigabytes up front.
pub const MAX_HOST_EVENT_CAPACITY: usize = 1 << 24;

/// The tracedb event database.
///
/// Clone the handle to share one store between producer and consumer
/// threads. All [`EventStore`] operations are available through `Deref`.
///
/// # Example
///
/// ```
/// use tracedb::prelude::*;
///
/// let db = TraceDb::builder().host_event_capacity(1024).open()?;
///
/// let name = db.add_string("clEnqueueNDRangeKernel");
/// let call = db.add_event(
///     Event::host(EventKind::ApiCall, Timestamp::from_nanos(10)).with_label(name),
/// );
/// db.mark_start(FunctionId::new(7), call.id().unwrap());
///
/// assert_eq!(db.matching_start(FunctionId::new(7)), call.id());
/// assert_eq!(db.host_events().len(), 1);
/// # Ok::<(), tracedb::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TraceDb {
    inner: Arc<EventStore>,
}

impl TraceDb {
    /// Open a database with default settings.
    pub fn open() -> Self {
        Self::from_store(EventStore::new())
    }

    /// Create a builder for database configuration.
    pub fn builder() -> TraceDbBuilder {
        TraceDbBuilder::new()
    }

    /// The shared store.
    pub fn store(&self) -> &Arc<EventStore> {
        &self.inner
    }

    /// Write the string table to `sink` in the configured format.
    ///
    /// Returns the number of lines written.
    pub fn export_string_table_to<W: Write>(&self, sink: &mut W) -> Result<usize> {
        self.inner.dump_configured_string_table(sink)
    }

    /// Write the string table to a file, replacing any existing content.
    pub fn export_string_table(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        let written = self.export_string_table_to(&mut writer)?;
        debug!(path = %path.display(), entries = written, "string table written");
        Ok(written)
    }

    /// Parse a string-table file written in the configured format.
    ///
    /// The entries are returned, not interned: ids in the file need not match
    /// the ids this database would assign.
    pub fn read_string_table(&self, path: impl AsRef<Path>) -> Result<Vec<(StringId, String)>> {
        let reader = BufReader::new(File::open(path)?);
        read_string_table(reader, self.inner.config().string_table_format)
    }

    fn from_store(store: EventStore) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }
}

impl Default for TraceDb {
    fn default() -> Self {
        Self::open()
    }
}

impl Deref for TraceDb {
    type Target = EventStore;

    fn deref(&self) -> &EventStore {
        &self.inner
    }
}

/// Builder for database configuration.
///
/// # Example
///
/// ```
/// use tracedb::TraceDb;
///
/// let db = TraceDb::builder()
///     .host_event_capacity(4096)
///     .escape_string_table()
///     .open()?;
/// # Ok::<(), tracedb::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TraceDbBuilder {
    config: StoreConfig,
}

impl TraceDbBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Expected burst of host events (default: 100).
    pub fn host_event_capacity(mut self, capacity: usize) -> Self {
        self.config.host_event_capacity = capacity;
        self
    }

    /// Export the string table with backslash escapes.
    pub fn escape_string_table(mut self) -> Self {
        self.config.string_table_format = StringTableFormat::Escaped;
        self
    }

    /// Export the string table verbatim (default).
    pub fn raw_string_table(mut self) -> Self {
        self.config.string_table_format = StringTableFormat::Raw;
        self
    }

    /// Open the database.
    pub fn open(self) -> Result<TraceDb> {
        if self.config.host_event_capacity > MAX_HOST_EVENT_CAPACITY {
            warn!(
                requested = self.config.host_event_capacity,
                max = MAX_HOST_EVENT_CAPACITY,
                default = DEFAULT_HOST_EVENT_CAPACITY,
                "rejecting host event capacity"
            );
            return Err(Error::InvalidConfig(format!(
                "host_event_capacity {} exceeds {}",
                self.config.host_event_capacity, MAX_HOST_EVENT_CAPACITY
            )));
        }
        Ok(TraceDb::from_store(EventStore::with_config(self.config)))
    }
}
