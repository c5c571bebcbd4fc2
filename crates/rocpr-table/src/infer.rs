// crates/rocpr-table/src/infer.rs

//! Schema sniffing over an eight-line lookahead.
//!
//! Both decisions are deliberately character-level heuristics: digits and
//! `- e E .` read as data, anything else as header prose, and a token
//! containing any of `- e E .` votes `Double` for its column. Purely numeric
//! headers or symbolic data can fool the header tally, so an explicit
//! override is available.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{ensure, Context, Result};
use rocpr_frame::ColumnType;

/// Lines inspected before committing to a schema.
pub const LOOKAHEAD_LINES: usize = 8;

/// Header handling for files the heuristic would misread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderMode {
    /// Decide by the first-line character tally.
    #[default]
    Auto,
    Present,
    Absent,
}

/// Result of sniffing: column layout and whether line one is a header.
#[derive(Clone, Debug)]
pub struct TableShape {
    pub has_header: bool,
    pub column_types: Vec<ColumnType>,
}

/// True when the character tally of `line` reads more like column names
/// than like a data row. Tabs count for neither side; ties mean data.
#[must_use]
pub fn looks_like_header(line: &str) -> bool {
    let mut data = 0usize;
    let mut header = 0usize;
    for c in line.chars() {
        if c == '\t' {
            continue;
        }
        if c.is_ascii_digit() || matches!(c, '-' | 'e' | 'E' | '.') {
            data += 1;
        } else {
            header += 1;
        }
    }
    header > data
}

/// One token's vote: anything a plain integer literal cannot contain
/// promotes the column to `Double`.
fn votes_double(token: &str) -> bool {
    token.chars().any(|c| matches!(c, '-' | 'e' | 'E' | '.'))
}

/// Infer the table shape from up to [`LOOKAHEAD_LINES`] raw lines.
///
/// The column count comes from the first line's tab count; a `Double` vote
/// by any lookahead row is sticky for its column, all remaining columns are
/// `Int32`.
pub fn sniff_lines(lines: &[String], header: HeaderMode) -> Result<TableShape> {
    ensure!(!lines.is_empty(), "cannot infer a schema from an empty file");

    let has_header = match header {
        HeaderMode::Auto => looks_like_header(&lines[0]),
        HeaderMode::Present => true,
        HeaderMode::Absent => false,
    };
    let columns = 1 + lines[0].matches('\t').count();

    let data_lines = &lines[usize::from(has_header)..];
    ensure!(
        !data_lines.is_empty(),
        "no data lines to infer column types from"
    );

    let mut double_vote = vec![false; columns];
    for line in data_lines {
        for (col, token) in line.split('\t').take(columns).enumerate() {
            if votes_double(token) {
                double_vote[col] = true;
            }
        }
    }

    let column_types = double_vote
        .into_iter()
        .map(|double| {
            if double {
                ColumnType::Double
            } else {
                ColumnType::Int32
            }
        })
        .collect();

    Ok(TableShape {
        has_header,
        column_types,
    })
}

/// Sniff a file by reading its first [`LOOKAHEAD_LINES`] lines.
pub fn sniff_file<P: AsRef<Path>>(path: P, header: HeaderMode) -> Result<TableShape> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut lines = Vec::with_capacity(LOOKAHEAD_LINES);
    for line in BufReader::new(file).lines().take(LOOKAHEAD_LINES) {
        lines.push(line.with_context(|| format!("read {}", path.display()))?);
    }
    sniff_lines(&lines, header)
}
