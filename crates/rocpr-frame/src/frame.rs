// crates/rocpr-frame/src/frame.rs

//! The data frame: schema plus paged row storage plus sort entry points.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

use crate::schema::{self, ColumnType, Schema, Value};
use crate::sort;
use crate::store::PagedStore;

/// Tunables for a [`DataFrame`].
#[derive(Clone, Debug)]
pub struct FrameConfig {
    /// Input block size in bytes; the resident window holds
    /// `block_bytes / row_width` rows and must fit at least one.
    pub block_bytes: usize,
    /// Path of the scratch backing file.
    pub backing_path: PathBuf,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            block_bytes: 10 * 1024 * 1024,
            backing_path: PathBuf::from("out"),
        }
    }
}

/// Out-of-core columnar table of packed fixed-width rows.
///
/// Inserts preserve their order until a sort is performed; afterwards cell
/// access observes the sorted order. Not thread-safe; one owner mutates.
#[derive(Debug)]
pub struct DataFrame {
    schema: Schema,
    store: PagedStore,
}

impl DataFrame {
    /// Frame with the default configuration (10 MiB window, `out` scratch
    /// file in the working directory).
    pub fn new(schema: Schema) -> Result<Self> {
        Self::with_config(schema, FrameConfig::default())
    }

    pub fn with_config(schema: Schema, config: FrameConfig) -> Result<Self> {
        let store = PagedStore::new(config.backing_path, schema.row_width(), config.block_bytes)?;
        Ok(Self { schema, store })
    }

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[must_use]
    pub fn num_rows(&self) -> u64 {
        self.store.num_rows()
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.schema.num_columns()
    }

    /// Append one row, one value per column in declared order.
    ///
    /// Values are type-checked against the schema before any byte moves, so
    /// a failed insert commits nothing.
    pub fn insert_row(&mut self, values: &[Value]) -> Result<()> {
        ensure!(
            values.len() == self.schema.num_columns(),
            "row has {} values, schema has {} columns",
            values.len(),
            self.schema.num_columns()
        );
        for (col, value) in values.iter().enumerate() {
            let declared = self
                .schema
                .column_type(col)
                .with_context(|| format!("column {col} out of range"))?;
            ensure!(
                value.column_type() == declared,
                "column {col} expects {declared:?}, got {:?}",
                value.column_type()
            );
        }

        let slot = self.store.append_slot()?;
        let mut off = 0usize;
        for value in values {
            match *value {
                Value::Int32(v) => {
                    schema::write_i32(slot, off, v);
                    off += 4;
                }
                Value::Double(v) => {
                    schema::write_f64(slot, off, v);
                    off += 8;
                }
            }
        }
        self.store.commit_append();
        Ok(())
    }

    /// Read an `Int32` cell; the column must be declared `Int32`.
    pub fn get_i32(&mut self, row: u64, col: usize) -> Result<i32> {
        let off = self.cell_offset(col, ColumnType::Int32)?;
        let bytes = self.store.row_bytes(row)?;
        Ok(schema::read_i32(bytes, off))
    }

    /// Read a `Double` cell; the column must be declared `Double`.
    pub fn get_f64(&mut self, row: u64, col: usize) -> Result<f64> {
        let off = self.cell_offset(col, ColumnType::Double)?;
        let bytes = self.store.row_bytes(row)?;
        Ok(schema::read_f64(bytes, off))
    }

    /// Read any numeric cell as `f64` (`Int32` widens losslessly).
    pub fn cell_as_f64(&mut self, row: u64, col: usize) -> Result<f64> {
        ensure!(
            col < self.schema.num_columns(),
            "column {col} out of range"
        );
        let bytes = self.store.row_bytes(row)?;
        Ok(self.schema.cell_f64(bytes, col))
    }

    /// Reorder all rows ascending by the given key columns (lexicographic,
    /// values compared as `f64`; ties fall in no particular order).
    pub fn sort_by(&mut self, keys: &[usize]) -> Result<()> {
        sort::sort_frame(&mut self.store, &self.schema, keys, None).map(|_| ())
    }

    /// Sort ascending by `keys` while counting rows whose `label_col` value
    /// is positive — the run-generation pass sees every row anyway.
    pub fn sort_counting_positives(&mut self, keys: &[usize], label_col: usize) -> Result<u64> {
        sort::sort_frame(&mut self.store, &self.schema, keys, Some(label_col))
    }

    fn cell_offset(&self, col: usize, want: ColumnType) -> Result<usize> {
        let ty = self
            .schema
            .column_type(col)
            .with_context(|| format!("column {col} out of range"))?;
        ensure!(ty == want, "column {col} is {ty:?}, requested {want:?}");
        self.schema
            .column_offset(col)
            .with_context(|| format!("column {col} out of range"))
    }
}
