//! Ingestion Tests
//!
//! Tests for id assignment and origin partitioning.

use crate::common::*;

// ============================================================================
// Id Assignment
// ============================================================================

#[test]
fn first_event_gets_id_one() {
    let db = create_db();
    let event = db.add_event(host_event(0));
    assert_eq!(event.id(), Some(EventId::new(1)));
}

#[test]
fn ids_are_contiguous_across_partitions() {
    let db = create_db();
    for i in 0..10 {
        if i % 3 == 0 {
            db.add_event(device_event(i % 2, i));
        } else {
            db.add_event(host_event(i));
        }
    }

    let mut all = ids(&all_events(&db));
    all.sort_unstable();
    assert_eq!(all, (1..=10).collect::<Vec<_>>());
}

#[test]
fn absent_event_is_ignored() {
    let db = create_db();
    assert!(db.offer_event(None).is_none());
    assert_eq!(db.event_count(), 0);
    assert_eq!(db.stats().events_accepted, 0);
}

#[test]
fn handle_matches_stored_event() {
    let db = create_db();
    let handle = db.add_event(host_event(3));
    let stored = db.host_events();
    assert!(Arc::ptr_eq(&handle, &stored[0]));
}

#[test]
fn payload_and_label_survive_ingestion() {
    let db = create_db();
    let label = db.add_string("xclSyncBO");
    let event = db.add_event(
        host_event(1)
            .with_label(label)
            .with_payload(json!({"size": 4096, "direction": "h2d"})),
    );

    assert_eq!(event.label(), Some(label));
    assert_eq!(event.payload()["size"], 4096);
    assert_eq!(db.lookup_string(label).as_deref(), Some("xclSyncBO"));
}

// ============================================================================
// Partitioning
// ============================================================================

#[test]
fn host_events_never_appear_on_devices() {
    let db = create_db();
    db.add_event(host_event(1));
    db.add_event(device_event(0, 1));

    for device in db.device_ids() {
        assert!(db
            .device_events(device)
            .iter()
            .all(|e| e.is_device_event()));
    }
    assert!(db.host_events().iter().all(|e| !e.is_device_event()));
}

#[test]
fn device_events_land_on_their_device() {
    let db = create_db();
    for device in [3, 1, 3, 2] {
        db.add_event(device_event(device, 0));
    }

    assert_eq!(
        db.device_ids(),
        vec![DeviceId::new(1), DeviceId::new(2), DeviceId::new(3)]
    );
    for device in db.device_ids() {
        assert!(db
            .device_events(device)
            .iter()
            .all(|e| e.device_id() == Some(device)));
    }
    assert_eq!(db.device_events(DeviceId::new(3)).len(), 2);
}

#[test]
fn unknown_device_is_empty() {
    let db = create_db();
    db.add_event(device_event(0, 0));
    assert!(db.device_events(DeviceId::new(99)).is_empty());
}

#[test]
fn device_events_sorted_with_duplicates() {
    let db = create_db();
    for ts in [50, 20, 50, 10, 20] {
        db.add_event(device_event(0, ts));
    }

    let events = db.device_events(DeviceId::new(0));
    let stamps: Vec<u64> = events.iter().map(|e| e.timestamp().as_nanos()).collect();
    assert_eq!(stamps, vec![10, 20, 20, 50, 50]);
    // Ties keep insertion order
    assert_eq!(ids(&events), vec![4, 2, 5, 1, 3]);
}

#[test]
fn snapshots_outlive_database() {
    let db = create_db();
    db.add_event(host_event(1));
    let snapshot = db.host_events();
    drop(db);
    assert_eq!(ids(&snapshot), vec![1]);
}
