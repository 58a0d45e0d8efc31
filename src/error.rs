//! Error types for tracedb.
//!
//! The facade shares one error type with the internal crates; see
//! [`tracedb_core::Error`] for the variants.

pub use tracedb_core::error::{Error, Result};
