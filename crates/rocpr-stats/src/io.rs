// crates/rocpr-stats/src/io.rs

//! Curve-report serialization: JSON / CBOR with extension auto-detection.
//!
//! Unknown or missing extensions are rejected for reads and default to JSON
//! for writes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::curves::CurveSet;
use crate::histogram::Histogram;

/// One sampled curve coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Serializable sampling of a completed stat pass: every histogram bucket
/// of both curves plus the class totals.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurveReport {
    pub rows: u64,
    pub positives: u32,
    pub negatives: u32,
    pub roc: Vec<CurvePoint>,
    pub precision_recall: Vec<CurvePoint>,
}

impl CurveReport {
    /// Sample every bucket of both curves.
    #[must_use]
    pub fn from_curves(curves: &CurveSet) -> Self {
        let summary = curves.summary();
        Self {
            rows: summary.rows,
            positives: summary.positives,
            negatives: summary.negatives,
            roc: sample(curves.roc()),
            precision_recall: sample(curves.precision_recall()),
        }
    }
}

fn sample(hist: &Histogram) -> Vec<CurvePoint> {
    (0..hist.buckets())
        .map(|b| CurvePoint {
            x: hist.bucket_x(b),
            y: hist.sample(b),
        })
        .collect()
}

/// Write a report as pretty JSON.
pub fn write_report_json<P: AsRef<Path>>(path: P, report: &CurveReport) -> Result<()> {
    let path_ref = path.as_ref();
    let f = File::create(path_ref).with_context(|| format!("create {}", path_ref.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, report).with_context(|| "serialize JSON curve report")?;
    w.flush().with_context(|| "flush JSON writer")?;
    Ok(())
}

/// Read a report from JSON.
pub fn read_report_json<P: AsRef<Path>>(path: P) -> Result<CurveReport> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", path_ref.display()))?;
    let rdr = BufReader::new(f);
    let v: CurveReport =
        serde_json::from_reader(rdr).with_context(|| "deserialize JSON curve report")?;
    Ok(v)
}

/// Write a report as CBOR.
pub fn write_report_cbor<P: AsRef<Path>>(path: P, report: &CurveReport) -> Result<()> {
    let path_ref = path.as_ref();
    let f = File::create(path_ref).with_context(|| format!("create {}", path_ref.display()))?;
    let mut w = BufWriter::new(f);
    ciborium::ser::into_writer(report, &mut w).with_context(|| "serialize CBOR curve report")?;
    w.flush().with_context(|| "flush CBOR writer")?;
    Ok(())
}

/// Read a report from CBOR.
pub fn read_report_cbor<P: AsRef<Path>>(path: P) -> Result<CurveReport> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", path_ref.display()))?;
    let mut rdr = BufReader::new(f);
    let v: CurveReport =
        ciborium::de::from_reader(&mut rdr).with_context(|| "deserialize CBOR curve report")?;
    Ok(v)
}

/// Auto-detect **read** by extension (`.json` / `.cbor`, case-insensitive).
pub fn read_report_auto<P: AsRef<Path>>(path: P) -> Result<CurveReport> {
    match lowercase_ext(path.as_ref()).as_deref() {
        Some("json") => read_report_json(path),
        Some("cbor") => read_report_cbor(path),
        Some(other) => Err(anyhow!(
            "cannot read a {other:?} report; use .json or .cbor"
        )),
        None => Err(anyhow!("report path needs a .json or .cbor extension")),
    }
}

/// Auto-detect **write** (defaults to JSON if unknown or missing).
pub fn write_report_auto<P: AsRef<Path>>(path: P, report: &CurveReport) -> Result<()> {
    match lowercase_ext(path.as_ref()).as_deref() {
        Some("cbor") => write_report_cbor(path, report),
        _ => write_report_json(path, report),
    }
}

fn lowercase_ext(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    Some(ext.to_ascii_lowercase())
}
