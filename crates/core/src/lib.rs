//! Core types for tracedb
//!
//! This crate defines the types shared by the storage layer and the public
//! facade:
//! - Identifier newtypes ([`EventId`], [`DeviceId`], [`TraceId`],
//!   [`FunctionId`], [`StringId`]) and [`Timestamp`]
//! - [`Origin`], [`Event`], [`EventKind`] and the [`EventRef`] handle
//! - The [`Error`] and [`Result`] types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod types;

pub use error::{Error, Result};
pub use event::{Event, EventKind, EventRef};
pub use types::{DeviceId, EventId, FunctionId, Origin, StringId, Timestamp, TraceId};
