#![allow(dead_code)]

//! Shared fixture: the 12-row classifier table used across the frame tests.

use std::path::Path;

use rocpr_frame::{ColumnType, DataFrame, FrameConfig, Schema, Value};

/// `label, p1, p2, o1, o2, o3` — packed row width 32 bytes.
pub fn eval_schema() -> Schema {
    Schema::new(vec![
        ColumnType::Int32,
        ColumnType::Double,
        ColumnType::Double,
        ColumnType::Int32,
        ColumnType::Int32,
        ColumnType::Int32,
    ])
    .unwrap()
}

/// `(label, p1, p2, o1, o2)`; `o3` is always 0. `o1` is the rank of `p1`,
/// `o2` the rank of `p2`, so either sort should leave them at 0..=11.
pub const ROWS: [(i32, f64, f64, i32, i32); 12] = [
    (0, 0.11, 0.12, 3, 3),
    (0, 0.24, 0.11, 5, 2),
    (0, 0.14, 0.43, 4, 6),
    (0, 0.33, 0.56, 6, 9),
    (0, 0.45, 0.44, 7, 7),
    (1, 0.68, 0.49, 11, 8),
    (1, 0.58, 0.59, 9, 10),
    (0, 0.59, 0.68, 10, 11),
    (0, 0.51, 0.42, 8, 5),
    (0, 0.09, 0.09, 2, 1),
    (0, 0.08, 0.08, 1, 0),
    (0, 0.01, 0.13, 0, 4),
];

pub fn insert_eval_rows(frame: &mut DataFrame) {
    for (label, p1, p2, o1, o2) in ROWS {
        frame
            .insert_row(&[
                Value::Int32(label),
                Value::Double(p1),
                Value::Double(p2),
                Value::Int32(o1),
                Value::Int32(o2),
                Value::Int32(0),
            ])
            .unwrap();
    }
}

pub fn eval_frame(dir: &Path, block_bytes: usize) -> DataFrame {
    let mut frame = DataFrame::with_config(
        eval_schema(),
        FrameConfig {
            block_bytes,
            backing_path: dir.join("scratch"),
        },
    )
    .unwrap();
    insert_eval_rows(&mut frame);
    frame
}
