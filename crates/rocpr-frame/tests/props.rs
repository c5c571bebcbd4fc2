//! Property tests: paging must be transparent and sorting must be a
//! permutation that orders the key column.

use proptest::prelude::*;
use rocpr_frame::{ColumnType, DataFrame, FrameConfig, Schema, Value};
use tempfile::TempDir;

/// Int32 id + Double score.
const ROW_WIDTH: usize = 12;

fn id_score_frame(block_bytes: usize, dir: &TempDir) -> DataFrame {
    let schema = Schema::new(vec![ColumnType::Int32, ColumnType::Double]).unwrap();
    DataFrame::with_config(
        schema,
        FrameConfig {
            block_bytes,
            backing_path: dir.path().join("scratch"),
        },
    )
    .unwrap()
}

fn insert_scores(frame: &mut DataFrame, scores: &[f64]) {
    for (i, &score) in scores.iter().enumerate() {
        frame
            .insert_row(&[Value::Int32(i as i32), Value::Double(score)])
            .unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48, // file-backed cases are not free
        .. ProptestConfig::default()
    })]

    #[test]
    fn paging_is_transparent(
        scores in prop::collection::vec(-1.0e6f64..1.0e6, 1..200),
        block_rows in 1usize..8,
    ) {
        let dir = TempDir::new().unwrap();
        let mut frame = id_score_frame(block_rows * ROW_WIDTH, &dir);
        insert_scores(&mut frame, &scores);

        prop_assert_eq!(frame.num_rows(), scores.len() as u64);
        // Backwards, so nearly every read crosses a window boundary.
        for (i, &score) in scores.iter().enumerate().rev() {
            prop_assert_eq!(frame.get_i32(i as u64, 0).unwrap(), i as i32);
            prop_assert_eq!(frame.get_f64(i as u64, 1).unwrap(), score);
        }
    }

    #[test]
    fn sort_orders_and_preserves_rows(
        scores in prop::collection::vec(-1.0e6f64..1.0e6, 1..200),
        block_rows in 1usize..8,
    ) {
        let dir = TempDir::new().unwrap();
        let mut frame = id_score_frame(block_rows * ROW_WIDTH, &dir);
        insert_scores(&mut frame, &scores);

        frame.sort_by(&[1]).unwrap();

        let mut seen_ids = Vec::with_capacity(scores.len());
        let mut previous = f64::NEG_INFINITY;
        for row in 0..scores.len() as u64 {
            let id = frame.get_i32(row, 0).unwrap();
            let score = frame.get_f64(row, 1).unwrap();
            prop_assert!(score >= previous, "descending pair at row {}", row);
            // Each surviving row still carries its original score bits.
            prop_assert_eq!(score, scores[id as usize]);
            previous = score;
            seen_ids.push(id);
        }
        seen_ids.sort_unstable();
        let expected: Vec<i32> = (0..scores.len() as i32).collect();
        prop_assert_eq!(seen_ids, expected);
    }
}
