//! Per-device, timestamp-ordered event index
//!
//! Each device gets its own [`DeviceEvents`] keyed by `(timestamp, id)`.
//! Event ids strictly increase in acceptance order, so the id component
//! breaks timestamp ties by insertion order and duplicate timestamps never
//! overwrite each other.
//!
//! Devices are kept in a `BTreeMap`, giving a deterministic ascending
//! device-id iteration order for scans.

use std::collections::BTreeMap;
use tracedb_core::{DeviceId, EventId, EventRef, Timestamp};

/// Events of a single device, ordered by `(timestamp, id)`
#[derive(Debug, Default)]
pub struct DeviceEvents {
    events: BTreeMap<(Timestamp, EventId), EventRef>,
}

impl DeviceEvents {
    /// Create an empty device partition
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an accepted event under its assigned id
    pub(crate) fn insert(&mut self, id: EventId, event: EventRef) {
        self.events.insert((event.timestamp(), id), event);
    }

    /// Number of events on this device
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the device has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate in timestamp order
    pub fn iter(&self) -> impl Iterator<Item = &EventRef> {
        self.events.values()
    }

    /// Events with `from <= timestamp < to`, in timestamp order
    pub fn range(&self, from: Timestamp, to: Timestamp) -> impl Iterator<Item = &EventRef> {
        let lower = (from, EventId::new(0));
        let upper = (to, EventId::new(0));
        self.events.range(lower..upper.max(lower)).map(|(_, e)| e)
    }
}

/// All device partitions
#[derive(Debug, Default)]
pub struct DeviceIndex {
    devices: BTreeMap<DeviceId, DeviceEvents>,
}

impl DeviceIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an accepted event into its device's partition
    pub(crate) fn insert(&mut self, device: DeviceId, id: EventId, event: EventRef) {
        self.devices.entry(device).or_default().insert(id, event);
    }

    /// Partition for one device
    pub fn get(&self, device: &DeviceId) -> Option<&DeviceEvents> {
        self.devices.get(device)
    }

    /// Known device ids in ascending order
    pub fn device_ids(&self) -> Vec<DeviceId> {
        self.devices.keys().copied().collect()
    }

    /// Number of devices with at least one event
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Total events across all devices
    pub fn total_events(&self) -> usize {
        self.devices.values().map(DeviceEvents::len).sum()
    }

    /// Iterate devices in ascending id order, events in timestamp order
    pub fn iter(&self) -> impl Iterator<Item = &EventRef> {
        self.devices.values().flat_map(DeviceEvents::iter)
    }
}
