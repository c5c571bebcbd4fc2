// crates/rocpr-stats/src/curves.rs

//! ROC and precision/recall curve accumulation and lookup.

use anyhow::{ensure, Result};
use rocpr_frame::DataFrame;
use tracing::info;

use crate::histogram::Histogram;
use crate::stat::{stat_scan, StatSummary};

/// Default bucket count for curve histograms.
pub const DEFAULT_BUCKETS: usize = 1001;

/// Histogram-compressed ROC and precision/recall curves of one stat pass.
///
/// Only a completed [`stat_hist`] pass constructs this, so curve queries are
/// always backed by an accumulated stream.
#[derive(Clone, Debug)]
pub struct CurveSet {
    roc: Histogram,
    precall: Histogram,
    summary: StatSummary,
}

/// Run the full statistics pass: sort by `score_col`, walk the ranks, and
/// bucket the derived measures — `(fpr, tpr)` into the ROC histogram and
/// `(recall, precision)` into the precision/recall histogram.
///
/// Samples whose denominator vanishes (`P == 0` or `N == 0`) are skipped, so
/// a degenerate table yields empty histograms rather than poisoned buckets.
pub fn stat_hist(
    frame: &mut DataFrame,
    label_col: usize,
    score_col: usize,
    buckets: usize,
) -> Result<CurveSet> {
    ensure!(buckets >= 2, "curve histograms need at least two buckets");
    let mut roc = Histogram::new(buckets);
    let mut precall = Histogram::new(buckets);

    let summary = stat_scan(frame, label_col, score_col, |t| {
        let p = f64::from(t.positives);
        let n = f64::from(t.negatives);
        let tp = f64::from(t.tp);
        let fp = f64::from(t.fp);

        let tpr = tp / p;
        let fpr = fp / n;
        let precision = tp / (tp + fp);
        let recall = tp / p;

        if fpr.is_finite() && tpr.is_finite() {
            roc.put(fpr, tpr);
        }
        if recall.is_finite() && precision.is_finite() {
            precall.put(recall, precision);
        }
        Ok(())
    })?;

    info!(
        rows = summary.rows,
        positives = summary.positives,
        negatives = summary.negatives,
        "curves accumulated"
    );
    Ok(CurveSet {
        roc,
        precall,
        summary,
    })
}

impl CurveSet {
    /// Mean precision observed at `recall` (nearest-bucket interpolation).
    #[must_use]
    pub fn precision_at(&self, recall: f64) -> f64 {
        self.precall.get_y(recall)
    }

    /// Mean true-positive rate observed at `fpr`.
    #[must_use]
    pub fn tpr_at(&self, fpr: f64) -> f64 {
        self.roc.get_y(fpr)
    }

    #[must_use]
    pub fn roc(&self) -> &Histogram {
        &self.roc
    }

    #[must_use]
    pub fn precision_recall(&self) -> &Histogram {
        &self.precall
    }

    #[must_use]
    pub fn summary(&self) -> StatSummary {
        self.summary
    }
}
