//! Insert/read round-trips, with and without spilling.

mod common;

use common::{eval_frame, eval_schema, ROWS};
use rocpr_frame::{DataFrame, FrameConfig, Value};
use tempfile::TempDir;

#[test]
fn unsorted_reads_match_inserts() {
    let dir = TempDir::new().unwrap();
    let mut frame = eval_frame(dir.path(), 10 * 1024 * 1024);

    assert_eq!(frame.num_rows(), 12);
    assert_eq!(frame.num_columns(), 6);
    assert_eq!(frame.get_i32(0, 0).unwrap(), 0);
    assert_eq!(frame.get_i32(5, 0).unwrap(), 1);
    assert_eq!(frame.get_f64(0, 1).unwrap(), 0.11);
    assert_eq!(frame.get_f64(11, 1).unwrap(), 0.01);
}

#[test]
fn reads_cross_spill_boundaries_two_rows_per_block() {
    let dir = TempDir::new().unwrap();
    let mut frame = eval_frame(dir.path(), 64);

    for (row, (label, p1, p2, o1, o2)) in ROWS.iter().enumerate() {
        let row = row as u64;
        assert_eq!(frame.get_i32(row, 0).unwrap(), *label);
        assert_eq!(frame.get_f64(row, 1).unwrap(), *p1);
        assert_eq!(frame.get_f64(row, 2).unwrap(), *p2);
        assert_eq!(frame.get_i32(row, 3).unwrap(), *o1);
        assert_eq!(frame.get_i32(row, 4).unwrap(), *o2);
        assert_eq!(frame.get_i32(row, 5).unwrap(), 0);
    }
}

#[test]
fn one_row_block_spills_every_insert() {
    let dir = TempDir::new().unwrap();
    // Exactly one 32-byte row per window.
    let mut frame = eval_frame(dir.path(), 32);

    // Backwards first, so every access pages a different window in.
    for (row, (_, p1, ..)) in ROWS.iter().enumerate().rev() {
        assert_eq!(frame.get_f64(row as u64, 1).unwrap(), *p1);
    }
    for (row, (label, ..)) in ROWS.iter().enumerate() {
        assert_eq!(frame.get_i32(row as u64, 0).unwrap(), *label);
    }
}

#[test]
fn interleaved_reads_and_inserts() {
    let dir = TempDir::new().unwrap();
    let mut frame = DataFrame::with_config(
        eval_schema(),
        FrameConfig {
            block_bytes: 64,
            backing_path: dir.path().join("scratch"),
        },
    )
    .unwrap();

    for (i, (label, p1, p2, o1, o2)) in ROWS.iter().enumerate() {
        frame
            .insert_row(&[
                Value::Int32(*label),
                Value::Double(*p1),
                Value::Double(*p2),
                Value::Int32(*o1),
                Value::Int32(*o2),
                Value::Int32(0),
            ])
            .unwrap();
        // Reading row 0 drags the window away from the tail every time.
        assert_eq!(frame.get_f64(0, 1).unwrap(), 0.11);
        assert_eq!(frame.num_rows(), i as u64 + 1);
    }
    for (row, (_, p1, ..)) in ROWS.iter().enumerate() {
        assert_eq!(frame.get_f64(row as u64, 1).unwrap(), *p1);
    }
}

#[test]
fn block_smaller_than_a_row_is_rejected() {
    let dir = TempDir::new().unwrap();
    let result = DataFrame::with_config(
        eval_schema(),
        FrameConfig {
            block_bytes: 31,
            backing_path: dir.path().join("scratch"),
        },
    );
    assert!(result.is_err());
}

#[test]
fn typed_access_is_checked() {
    let dir = TempDir::new().unwrap();
    let mut frame = eval_frame(dir.path(), 10 * 1024 * 1024);

    assert!(frame.get_i32(0, 1).is_err(), "column 1 is Double");
    assert!(frame.get_f64(0, 0).is_err(), "column 0 is Int32");
    assert!(frame.get_i32(12, 0).is_err(), "row out of range");
    assert!(frame.get_i32(0, 6).is_err(), "column out of range");
    // cell_as_f64 widens Int32 but still bounds-checks.
    assert_eq!(frame.cell_as_f64(5, 0).unwrap(), 1.0);
    assert!(frame.cell_as_f64(0, 6).is_err());
}

#[test]
fn insert_type_and_arity_are_checked() {
    let dir = TempDir::new().unwrap();
    let mut frame = DataFrame::with_config(
        eval_schema(),
        FrameConfig {
            block_bytes: 1024,
            backing_path: dir.path().join("scratch"),
        },
    )
    .unwrap();

    assert!(frame.insert_row(&[Value::Int32(0)]).is_err(), "arity");
    assert!(
        frame
            .insert_row(&[
                Value::Double(0.0),
                Value::Double(0.1),
                Value::Double(0.2),
                Value::Int32(0),
                Value::Int32(0),
                Value::Int32(0),
            ])
            .is_err(),
        "column 0 is Int32"
    );
    assert_eq!(frame.num_rows(), 0, "failed inserts commit nothing");
}
