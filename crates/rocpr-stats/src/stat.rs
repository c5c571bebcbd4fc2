// crates/rocpr-stats/src/stat.rs

//! Ranked cumulative TP/FP statistics over a score-sorted table.

use anyhow::{ensure, Context, Result};
use rocpr_frame::DataFrame;
use tracing::debug;

/// Cumulative counts at one rank of the score-sorted order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatTuple {
    /// Total rows with a positive label.
    pub positives: u32,
    /// Total rows with a non-positive label.
    pub negatives: u32,
    /// True positives among ranks `0..=rank`.
    pub tp: u32,
    /// False positives among ranks `0..=rank`.
    pub fp: u32,
}

/// Totals of a completed stat pass.
#[derive(Clone, Copy, Debug)]
pub struct StatSummary {
    pub rows: u64,
    pub positives: u32,
    pub negatives: u32,
}

/// Sort `frame` ascending by `score_col`, then walk the ranks emitting one
/// [`StatTuple`] per row, in ascending rank order.
///
/// Rank `r` reads the classifier as predicting positive for every row whose
/// score lies above the current threshold, so `tp + fp == r + 1` holds at
/// every call. `P` comes from the sorter's run-generation pass, so the walk
/// itself is a single sequential scan. A callback error aborts the walk
/// immediately.
pub fn stat_scan<F>(
    frame: &mut DataFrame,
    label_col: usize,
    score_col: usize,
    mut callback: F,
) -> Result<StatSummary>
where
    F: FnMut(StatTuple) -> Result<()>,
{
    let columns = frame.num_columns();
    ensure!(
        label_col < columns,
        "label column {label_col} out of range ({columns} columns)"
    );
    ensure!(
        score_col < columns,
        "score column {score_col} out of range ({columns} columns)"
    );
    let rows = frame.num_rows();
    let ranks = u32::try_from(rows).context("stat pass supports at most u32::MAX rows")?;

    let positives = frame.sort_counting_positives(&[score_col], label_col)?;
    let positives = u32::try_from(positives).context("positive count exceeds u32 range")?;
    let negatives = ranks - positives;
    debug!(rows, positives, negatives, "walking sorted ranks");

    let mut tp = 0u32;
    for rank in 0..ranks {
        if frame.cell_as_f64(u64::from(rank), label_col)? > 0.0 {
            tp += 1;
        }
        let fp = (rank + 1) - tp;
        callback(StatTuple {
            positives,
            negatives,
            tp,
            fp,
        })?;
    }

    Ok(StatSummary {
        rows,
        positives,
        negatives,
    })
}
