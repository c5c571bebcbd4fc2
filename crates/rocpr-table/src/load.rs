// crates/rocpr-table/src/load.rs

//! Parse-and-insert driver: sniff the shape, then re-stream the whole file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use rocpr_frame::{ColumnType, DataFrame, FrameConfig, Schema, Value};
use tracing::info;

use crate::infer::{sniff_file, HeaderMode};

/// Options for [`load_ascii`].
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub frame: FrameConfig,
    pub header: HeaderMode,
}

/// Load a tab-separated ASCII table into a fresh [`DataFrame`].
///
/// The file is read twice: once for the eight-line lookahead that fixes the
/// schema, then in full for parsing. Every data line must carry exactly the
/// inferred column count; parse failures cite line and column (1-based) and
/// abort the load.
pub fn load_ascii<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<DataFrame> {
    let path = path.as_ref();
    let shape = sniff_file(path, options.header)?;
    let schema = Schema::new(shape.column_types.clone())?;
    let columns = schema.num_columns();
    let mut frame = DataFrame::with_config(schema, options.frame)?;

    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut values = Vec::with_capacity(columns);
    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read {}", path.display()))?;
        if index == 0 && shape.has_header {
            continue;
        }
        let line_no = index + 1;

        values.clear();
        let mut tokens = 0usize;
        for (col, token) in line.split('\t').enumerate() {
            tokens += 1;
            ensure!(
                col < columns,
                "line {line_no}: more than {columns} columns"
            );
            values.push(
                parse_token(token, shape.column_types[col])
                    .with_context(|| format!("line {line_no}, column {}", col + 1))?,
            );
        }
        ensure!(
            tokens == columns,
            "line {line_no}: expected {columns} columns, found {tokens}"
        );

        frame
            .insert_row(&values)
            .with_context(|| format!("line {line_no}"))?;
    }

    info!(
        rows = frame.num_rows(),
        columns,
        header = shape.has_header,
        "loaded table"
    );
    Ok(frame)
}

fn parse_token(token: &str, ty: ColumnType) -> Result<Value> {
    match ty {
        ColumnType::Int32 => Ok(Value::Int32(
            token
                .parse()
                .with_context(|| format!("bad integer {token:?}"))?,
        )),
        ColumnType::Double => Ok(Value::Double(
            token
                .parse()
                .with_context(|| format!("bad float {token:?}"))?,
        )),
        ColumnType::Unknown => bail!("column type was never inferred"),
    }
}
