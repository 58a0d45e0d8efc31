//! Event types for the event database
//!
//! An [`Event`] is an immutable record of something that happened at a point
//! in time. Producers build events with the constructors below and hand them
//! to the store, which assigns the [`EventId`]. Accepted events are shared as
//! [`EventRef`] handles.

use crate::types::{DeviceId, EventId, Origin, StringId, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared handle to an accepted event
///
/// The store keeps one handle per accepted event; queries hand out clones.
pub type EventRef = Arc<Event>;

/// Producer category of an event
///
/// The store does not interpret the kind; it exists so producers and
/// filter predicates can tell events apart without decoding payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Host API call (OpenCL, HAL, native)
    ApiCall,
    /// Kernel execution on a device compute unit
    KernelExecution,
    /// Device-to-host transfer
    BufferRead,
    /// Host-to-device transfer
    BufferWrite,
    /// Device-to-device copy
    BufferCopy,
    /// User-inserted marker or range
    UserMarker,
    /// Producer-defined kind, named by an interned string
    Custom(StringId),
}

impl EventKind {
    /// Stable name for logging and display
    ///
    /// Custom kinds report `"Custom"`; resolve the name through the string
    /// table when needed.
    pub fn type_name(&self) -> &'static str {
        match self {
            EventKind::ApiCall => "ApiCall",
            EventKind::KernelExecution => "KernelExecution",
            EventKind::BufferRead => "BufferRead",
            EventKind::BufferWrite => "BufferWrite",
            EventKind::BufferCopy => "BufferCopy",
            EventKind::UserMarker => "UserMarker",
            EventKind::Custom(_) => "Custom",
        }
    }

    /// Check if this kind moves data between memories
    pub fn is_transfer(&self) -> bool {
        matches!(
            self,
            EventKind::BufferRead | EventKind::BufferWrite | EventKind::BufferCopy
        )
    }
}

/// A timestamped occurrence
///
/// Each event includes:
/// - An id, assigned by the store on ingestion (`None` before that)
/// - A timestamp used for device-index ordering
/// - An origin that decides its storage partition
/// - Optional correlation to a start event, an interned label and a payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: Option<EventId>,
    timestamp: Timestamp,
    origin: Origin,
    kind: EventKind,
    start: Option<EventId>,
    label: Option<StringId>,
    #[serde(default)]
    payload: serde_json::Value,
}

impl Event {
    /// Create an event with the given origin
    pub fn new(origin: Origin, kind: EventKind, timestamp: Timestamp) -> Self {
        Self {
            id: None,
            timestamp,
            origin,
            kind,
            start: None,
            label: None,
            payload: serde_json::Value::Null,
        }
    }

    /// Create a host-origin event
    pub fn host(kind: EventKind, timestamp: Timestamp) -> Self {
        Self::new(Origin::Host, kind, timestamp)
    }

    /// Create a device-origin event
    pub fn device(device: DeviceId, kind: EventKind, timestamp: Timestamp) -> Self {
        Self::new(Origin::Device(device), kind, timestamp)
    }

    /// Correlate this (end) event with its start event
    pub fn with_start(mut self, start: EventId) -> Self {
        self.start = Some(start);
        self
    }

    /// Attach an interned label
    pub fn with_label(mut self, label: StringId) -> Self {
        self.label = Some(label);
        self
    }

    /// Attach an opaque producer payload
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    /// Stamp the store-assigned id
    ///
    /// Called by the store on ingestion. Any id set earlier is overwritten,
    /// so producers cannot choose their own ids.
    pub fn into_assigned(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    /// Store-assigned id, `None` until the event is accepted
    pub fn id(&self) -> Option<EventId> {
        self.id
    }

    /// Event time
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Event origin
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Check if the event is a device-origin event
    pub fn is_device_event(&self) -> bool {
        self.origin.is_device()
    }

    /// Device id for device-origin events
    pub fn device_id(&self) -> Option<DeviceId> {
        self.origin.device()
    }

    /// Producer category
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Id of the correlated start event, if this is an end event
    pub fn start(&self) -> Option<EventId> {
        self.start
    }

    /// Interned label
    pub fn label(&self) -> Option<StringId> {
        self.label
    }

    /// Opaque producer payload
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }
}
