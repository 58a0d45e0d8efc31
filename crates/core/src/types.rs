//! Core identifier types for the event database
//!
//! This module defines the fundamental types used throughout the system:
//! - [`EventId`]: Store-assigned identifier of an ingested event
//! - [`DeviceId`], [`TraceId`], [`FunctionId`]: Producer-side correlation keys
//! - [`StringId`]: Interned string identifier
//! - [`Timestamp`]: Totally ordered event time
//! - [`Origin`]: Host or device partition of an event

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wrap a raw value
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Get the raw value
            pub const fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, ":{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifier assigned to an event when the store accepts it
    ///
    /// Event ids start at 1 and strictly increase in acceptance order.
    /// They are never reused for the lifetime of a store.
    EventId,
    "event"
);

id_type!(
    /// Identifier of the device that produced a device-origin event
    DeviceId,
    "device"
);

id_type!(
    /// Groups device-side start events awaiting their completions
    TraceId,
    "trace"
);

id_type!(
    /// Identifies a single in-flight call whose start is tracked
    FunctionId,
    "function"
);

id_type!(
    /// Interned string identifier, assigned from 1 on first occurrence
    StringId,
    "string"
);

/// Event time in nanoseconds
///
/// Totally ordered; the device index sorts by it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The earliest representable time
    pub const ZERO: Timestamp = Timestamp(0);

    /// Create a timestamp from nanoseconds
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Create a timestamp from microseconds, saturating on overflow
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros.saturating_mul(1_000))
    }

    /// Nanoseconds since the producer's epoch
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Elapsed nanoseconds since `earlier`, zero if `earlier` is later
    pub fn saturating_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ns", self.0)
    }
}

/// Where an event happened
///
/// The store partitions events by origin: host events go to the host
/// sequence, device events to the per-device index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Host-side occurrence (API calls, user markers)
    Host,
    /// Device-side hardware occurrence
    Device(DeviceId),
}

impl Origin {
    /// Check if this is a device origin
    pub fn is_device(&self) -> bool {
        matches!(self, Origin::Device(_))
    }

    /// Device id for device origins
    pub fn device(&self) -> Option<DeviceId> {
        match self {
            Origin::Host => None,
            Origin::Device(id) => Some(*id),
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Host => write!(f, "host"),
            Origin::Device(id) => write!(f, "{}", id),
        }
    }
}
