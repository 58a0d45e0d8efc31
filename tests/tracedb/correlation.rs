//! Correlation Tests
//!
//! Tests for per-trace FIFO start queues and per-function start markers.

use crate::common::*;

#[test]
fn trace_starts_match_oldest_first() {
    let db = create_db();
    let trace = TraceId::new(17);
    let starts: Vec<_> = (0..3).map(|ts| db.add_event(device_event(0, ts))).collect();
    for start in &starts {
        db.mark_device_event_start(trace, Arc::clone(start));
    }

    let matched: Vec<_> = (0..3)
        .map(|_| db.matching_device_event_start(trace).unwrap())
        .collect();
    assert_eq!(ids(&matched), ids(&starts));
    assert!(db.matching_device_event_start(trace).is_none());
}

#[test]
fn unknown_trace_has_no_match() {
    let db = create_db();
    assert!(db.matching_device_event_start(TraceId::new(1)).is_none());
}

#[test]
fn traces_do_not_share_queues() {
    let db = create_db();
    let a = db.add_event(device_event(0, 1));
    let b = db.add_event(device_event(1, 1));
    db.mark_device_event_start(TraceId::new(1), Arc::clone(&a));
    db.mark_device_event_start(TraceId::new(2), Arc::clone(&b));

    assert!(Arc::ptr_eq(&db.matching_device_event_start(TraceId::new(2)).unwrap(), &b));
    assert!(Arc::ptr_eq(&db.matching_device_event_start(TraceId::new(1)).unwrap(), &a));
}

#[test]
fn matched_start_feeds_end_event() {
    let db = create_db();
    let trace = TraceId::new(5);
    let start = db.add_event(device_event(2, 100));
    db.mark_device_event_start(trace, start);

    let start = db.matching_device_event_start(trace).unwrap();
    let end = db.add_event(device_event(2, 180).with_start(start.id().unwrap()));

    assert_eq!(end.start(), start.id());
    let duration = end.timestamp().saturating_since(start.timestamp());
    assert_eq!(duration, 80);
}

#[test]
fn queue_can_hold_unstored_events() {
    let db = create_db();
    let pending = Arc::new(device_event(0, 1));
    db.mark_device_event_start(TraceId::new(1), pending);

    let matched = db.matching_device_event_start(TraceId::new(1)).unwrap();
    assert_eq!(matched.id(), None);
    assert_eq!(db.event_count(), 0);
}

#[test]
fn function_start_last_write_wins() {
    let db = create_db();
    let f = FunctionId::new(3);
    let e1 = db.add_event(host_event(1)).id().unwrap();
    let e2 = db.add_event(host_event(2)).id().unwrap();

    db.mark_start(f, e1);
    db.mark_start(f, e2);
    assert_eq!(db.matching_start(f), Some(e2));
    assert_eq!(db.matching_start(f), None);
}

#[test]
fn function_start_miss_is_none_not_zero() {
    let db = create_db();
    assert_eq!(db.matching_start(FunctionId::new(0)), None);
}

#[test]
fn pending_counts_follow_matches() {
    let db = create_db();
    let start = db.add_event(device_event(0, 0));
    db.mark_device_event_start(TraceId::new(1), Arc::clone(&start));
    db.mark_device_event_start(TraceId::new(1), start);
    db.mark_start(FunctionId::new(1), EventId::new(1));
    assert_eq!(db.stats().pending_device_starts, 2);
    assert_eq!(db.stats().pending_function_starts, 1);

    db.matching_device_event_start(TraceId::new(1));
    db.matching_start(FunctionId::new(1));
    assert_eq!(db.stats().pending_device_starts, 1);
    assert_eq!(db.stats().pending_function_starts, 0);
}
