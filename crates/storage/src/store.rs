//! Event store - the locked, in-memory event database
//!
//! # Design
//!
//! - One `parking_lot::Mutex` guards the host sequence, the device index,
//!   both correlation tables and the event-id counter
//! - Id assignment and placement happen in the same critical section: no two
//!   events share an id and no reader sees a stored event without one
//! - The string table lives outside that lock (see [`StringTable`])
//! - Queries return snapshot vectors of [`EventRef`] handles, never live views
//!
//! # Thread Safety
//!
//! Every operation is synchronous and linearizable. The relative order of
//! two operations from different threads is the order in which they acquired
//! the lock. Guards are released on every exit path, including a panicking
//! filter predicate.
//!
//! # Scaling
//!
//! [`EventStore::filter_events`] is a linear scan over every stored event
//! with the lock held. It suits occasional queries, not repeated large-scale
//! querying.

use crate::correlation::{StartMarkers, StartQueues};
use crate::device_index::DeviceIndex;
use crate::string_table::{StringTable, StringTableFormat};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tracedb_core::{
    DeviceId, Event, EventId, EventRef, FunctionId, Origin, Result, StringId, Timestamp, TraceId,
};
use tracing::{debug, trace};

/// Default host-sequence pre-allocation
pub const DEFAULT_HOST_EVENT_CAPACITY: usize = 100;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Expected burst of host events; pre-sizes the host sequence.
    /// A hint only, never a limit.
    pub host_event_capacity: usize,
    /// Format used by [`EventStore::dump_configured_string_table`]
    pub string_table_format: StringTableFormat,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host_event_capacity: DEFAULT_HOST_EVENT_CAPACITY,
            string_table_format: StringTableFormat::Raw,
        }
    }
}

/// Point-in-time counts of store contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Events accepted so far (host + device)
    pub events_accepted: u64,
    /// Events in the host sequence
    pub host_events: usize,
    /// Events across all device partitions
    pub device_events: usize,
    /// Devices with at least one event
    pub devices: usize,
    /// Unmatched device start events across all traces
    pub pending_device_starts: usize,
    /// Functions with an unmatched start marker
    pub pending_function_starts: usize,
    /// Distinct interned strings
    pub interned_strings: usize,
}

/// State guarded by the store lock
#[derive(Debug)]
struct Inner {
    next_event_id: u64,
    host: Vec<EventRef>,
    devices: DeviceIndex,
    device_starts: StartQueues,
    function_starts: StartMarkers,
}

impl Inner {
    fn place(&mut self, event: Event) -> EventRef {
        let id = EventId::new(self.next_event_id);
        self.next_event_id += 1;

        let event: EventRef = Arc::new(event.into_assigned(id));
        match event.origin() {
            Origin::Host => self.host.push(Arc::clone(&event)),
            Origin::Device(device) => self.devices.insert(device, id, Arc::clone(&event)),
        }
        event
    }

    fn accepted(&self) -> u64 {
        self.next_event_id - 1
    }
}

/// Thread-safe in-memory event database
///
/// # Example
///
/// ```
/// use tracedb_core::{DeviceId, Event, EventKind, Timestamp, TraceId};
/// use tracedb_storage::EventStore;
///
/// let store = EventStore::new();
///
/// let start = store.add_event(Event::device(
///     DeviceId::new(0),
///     EventKind::KernelExecution,
///     Timestamp::from_nanos(100),
/// ));
/// store.mark_device_event_start(TraceId::new(1), start.clone());
///
/// let matched = store.matching_device_event_start(TraceId::new(1)).unwrap();
/// assert_eq!(matched.id(), start.id());
/// assert!(store.matching_device_event_start(TraceId::new(1)).is_none());
/// ```
#[derive(Debug)]
pub struct EventStore {
    inner: Mutex<Inner>,
    strings: StringTable,
    config: StoreConfig,
}

impl EventStore {
    /// Create a store with default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store with custom configuration
    pub fn with_config(config: StoreConfig) -> Self {
        debug!(
            host_event_capacity = config.host_event_capacity,
            format = ?config.string_table_format,
            "creating event store"
        );
        Self {
            inner: Mutex::new(Inner {
                next_event_id: 1,
                host: Vec::with_capacity(config.host_event_capacity),
                devices: DeviceIndex::new(),
                device_starts: StartQueues::new(),
                function_starts: StartMarkers::new(),
            }),
            strings: StringTable::new(),
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ========================================================================
    // Ingestion
    // ========================================================================

    /// Accept an event, assign its id and place it by origin
    ///
    /// Device-origin events go to that device's timestamp-ordered index,
    /// host-origin events to the end of the host sequence. Any id the
    /// producer set is replaced.
    pub fn add_event(&self, event: Event) -> EventRef {
        let event = self.inner.lock().place(event);
        trace!(id = ?event.id(), origin = %event.origin(), "event accepted");
        event
    }

    /// Accept an event if one is given
    ///
    /// `None` is a silent no-op: no id is consumed and nothing is stored.
    pub fn offer_event(&self, event: Option<Event>) -> Option<EventRef> {
        event.map(|event| self.add_event(event))
    }

    /// Queue a device start event for later matching
    ///
    /// Starts of one trace are matched oldest first. There is no cap on the
    /// queue depth.
    pub fn mark_device_event_start(&self, trace: TraceId, event: EventRef) {
        self.inner.lock().device_starts.push(trace, event);
    }

    /// Remove and return the oldest unmatched start of `trace`
    ///
    /// Returns `None` if the trace is unknown or has no pending starts.
    pub fn matching_device_event_start(&self, trace: TraceId) -> Option<EventRef> {
        let matched = self.inner.lock().device_starts.pop(&trace);
        if matched.is_none() {
            debug!(%trace, "no pending device start");
        }
        matched
    }

    /// Record the pending start of a function call
    ///
    /// Overwrites any earlier pending start for the same function.
    pub fn mark_start(&self, function: FunctionId, event: EventId) {
        let replaced = self.inner.lock().function_starts.mark(function, event);
        if let Some(previous) = replaced {
            trace!(%function, %previous, %event, "pending start overwritten");
        }
    }

    /// Remove and return the pending start of a function call
    pub fn matching_start(&self, function: FunctionId) -> Option<EventId> {
        let matched = self.inner.lock().function_starts.take(&function);
        if matched.is_none() {
            debug!(%function, "no pending function start");
        }
        matched
    }

    /// Intern a string label
    pub fn add_string(&self, value: &str) -> StringId {
        self.strings.intern(value)
    }

    /// Resolve an interned id back to its value
    pub fn lookup_string(&self, id: StringId) -> Option<Arc<str>> {
        self.strings.lookup(id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every stored event matching `predicate`
    ///
    /// Visits the host sequence first, then devices in ascending id order,
    /// each in timestamp order. The predicate runs with the store lock held
    /// and must not call back into the store.
    pub fn filter_events<F>(&self, mut predicate: F) -> Vec<EventRef>
    where
        F: FnMut(&Event) -> bool,
    {
        let inner = self.inner.lock();
        inner
            .host
            .iter()
            .chain(inner.devices.iter())
            .filter(|event| predicate(event))
            .cloned()
            .collect()
    }

    /// Snapshot of the host sequence in arrival order
    pub fn host_events(&self) -> Vec<EventRef> {
        self.inner.lock().host.clone()
    }

    /// Snapshot of one device's events in timestamp order
    ///
    /// Unknown devices yield an empty vector.
    pub fn device_events(&self, device: DeviceId) -> Vec<EventRef> {
        let inner = self.inner.lock();
        inner
            .devices
            .get(&device)
            .map(|events| events.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Snapshot of one device's events with `from <= timestamp < to`
    ///
    /// Unknown devices and empty or inverted windows yield an empty vector.
    pub fn device_events_between(
        &self,
        device: DeviceId,
        from: Timestamp,
        to: Timestamp,
    ) -> Vec<EventRef> {
        let inner = self.inner.lock();
        inner
            .devices
            .get(&device)
            .map(|events| events.range(from, to).cloned().collect())
            .unwrap_or_default()
    }

    /// Devices with at least one event, ascending
    pub fn device_ids(&self) -> Vec<DeviceId> {
        self.inner.lock().devices.device_ids()
    }

    /// Number of stored events (host + device)
    pub fn event_count(&self) -> usize {
        let inner = self.inner.lock();
        inner.host.len() + inner.devices.total_events()
    }

    /// Point-in-time counts
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        StoreStats {
            events_accepted: inner.accepted(),
            host_events: inner.host.len(),
            device_events: inner.devices.total_events(),
            devices: inner.devices.device_count(),
            pending_device_starts: inner.device_starts.pending(),
            pending_function_starts: inner.function_starts.pending(),
            interned_strings: self.strings.len(),
        }
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Write the string table as `<id>,<value>` lines
    ///
    /// The table is snapshotted first; `sink` is written without any store
    /// lock held. Returns the number of lines written.
    pub fn dump_string_table<W: Write>(
        &self,
        sink: &mut W,
        format: StringTableFormat,
    ) -> Result<usize> {
        let written = self.strings.dump(sink, format)?;
        debug!(entries = written, ?format, "string table exported");
        Ok(written)
    }

    /// Write the string table in the configured format
    pub fn dump_configured_string_table<W: Write>(&self, sink: &mut W) -> Result<usize> {
        self.dump_string_table(sink, self.config.string_table_format)
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventStore {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        debug!(
            host_events = inner.host.len(),
            device_events = inner.devices.total_events(),
            "releasing event store"
        );
    }
}
