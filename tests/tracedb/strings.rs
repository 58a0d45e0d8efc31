//! String Table Tests
//!
//! Tests for interning and the flat `<id>,<value>` export.

use crate::common::*;
use std::collections::HashSet;

fn export(db: &TraceDb) -> String {
    let mut out = Vec::new();
    db.export_string_table_to(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn interning_is_idempotent() {
    let db = create_db();
    let x1 = db.add_string("x");
    let x2 = db.add_string("x");
    let y = db.add_string("y");
    assert_eq!(x1, x2);
    assert_ne!(x1, y);
}

#[test]
fn export_has_one_line_per_distinct_string() {
    let db = create_db();
    for name in ["read", "write", "read", "kernel", "write"] {
        db.add_string(name);
    }

    let text = export(&db);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);

    let values: HashSet<&str> = lines
        .iter()
        .map(|line| line.split_once(',').unwrap().1)
        .collect();
    assert_eq!(values, HashSet::from(["read", "write", "kernel"]));
}

#[test]
fn empty_table_exports_nothing() {
    let db = create_db();
    assert_eq!(export(&db), "");
}

#[test]
fn raw_export_is_unescaped() {
    let db = create_db();
    db.add_string("a,b");
    db.add_string("c\\d");
    assert_eq!(export(&db), "1,a,b\n2,c\\d\n");
}

#[test]
fn escaped_export_round_trips_through_file() {
    init_tracing();
    let db = TraceDb::builder().escape_string_table().open().unwrap();
    let values = ["plain", "with,comma", "multi\nline", "back\\slash", "cr\rlf", ""];
    for value in values {
        db.add_string(value);
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strings.csv");
    assert_eq!(db.export_string_table(&path).unwrap(), values.len());

    let entries = db.read_string_table(&path).unwrap();
    assert_eq!(entries.len(), values.len());
    for (id, value) in entries {
        assert_eq!(db.add_string(&value), id);
        assert_eq!(db.lookup_string(id).as_deref(), Some(value.as_str()));
    }
}

#[test]
fn raw_export_with_newline_does_not_round_trip() {
    let db = create_db();
    db.add_string("two\nlines");

    let text = export(&db);
    let err = read_string_table(text.as_bytes(), StringTableFormat::Raw).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn export_to_missing_directory_is_io_error() {
    let db = create_db();
    db.add_string("x");
    let dir = tempfile::tempdir().unwrap();
    let err = db
        .export_string_table(dir.path().join("missing").join("strings.csv"))
        .unwrap_err();
    assert!(err.is_io());
}

#[test]
fn interning_does_not_consume_event_ids() {
    let db = create_db();
    db.add_string("label");
    let event = db.add_event(host_event(0));
    assert_eq!(event.id(), Some(EventId::new(1)));
}
