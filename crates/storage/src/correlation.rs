//! Start/end correlation tables
//!
//! Two deliberately different models:
//!
//! - [`StartQueues`]: per-trace FIFO of pending device start events. Nested or
//!   pipelined starts of the same trace close in the order they were opened.
//! - [`StartMarkers`]: per-function single pending start id. A later mark for
//!   the same function overwrites the earlier one (last write wins).
//!
//! Neither table caps its size; balancing starts with matches is the
//! producer's job.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracedb_core::{EventId, EventRef, FunctionId, TraceId};

/// Pending device start events, FIFO per trace
#[derive(Debug, Default)]
pub struct StartQueues {
    queues: FxHashMap<TraceId, VecDeque<EventRef>>,
}

impl StartQueues {
    /// Create empty queues
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a start event to the back of the trace's queue
    pub fn push(&mut self, trace: TraceId, event: EventRef) {
        self.queues.entry(trace).or_default().push_back(event);
    }

    /// Remove and return the oldest pending start of the trace
    ///
    /// Drained queues are dropped so matched traces do not linger.
    pub fn pop(&mut self, trace: &TraceId) -> Option<EventRef> {
        let queue = self.queues.get_mut(trace)?;
        let event = queue.pop_front();
        if queue.is_empty() {
            self.queues.remove(trace);
        }
        event
    }

    /// Number of unmatched starts for one trace
    pub fn pending_for(&self, trace: &TraceId) -> usize {
        self.queues.get(trace).map_or(0, VecDeque::len)
    }

    /// Number of unmatched starts across all traces
    pub fn pending(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}

/// Pending function start ids, one per function
#[derive(Debug, Default)]
pub struct StartMarkers {
    markers: FxHashMap<FunctionId, EventId>,
}

impl StartMarkers {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pending start, returning the value it replaced
    pub fn mark(&mut self, function: FunctionId, event: EventId) -> Option<EventId> {
        self.markers.insert(function, event)
    }

    /// Remove and return the pending start of the function
    pub fn take(&mut self, function: &FunctionId) -> Option<EventId> {
        self.markers.remove(function)
    }

    /// Number of functions with a pending start
    pub fn pending(&self) -> usize {
        self.markers.len()
    }
}
