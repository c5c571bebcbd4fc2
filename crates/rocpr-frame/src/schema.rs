// crates/rocpr-frame/src/schema.rs

//! Column types, packed row layout, and typed cell values.
//!
//! A schema is an ordered list of column types plus the derived byte offset
//! of each column within the packed row image. Rows carry no header and no
//! inter-row padding; cells are stored in host byte order.

use anyhow::{ensure, Result};

/// Datatype of a single column.
///
/// `Unknown` is only legal while a schema is being inferred; building a
/// [`Schema`] from it fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Unknown,
    Int32,
    Double,
}

impl ColumnType {
    /// Byte width of a cell of this type within the row image.
    #[inline]
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::Int32 => 4,
            Self::Double => 8,
        }
    }
}

/// A typed cell value, one per column on insert.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Int32(i32),
    Double(f64),
}

impl Value {
    /// The column type this value satisfies.
    #[inline]
    #[must_use]
    pub const fn column_type(self) -> ColumnType {
        match self {
            Self::Int32(_) => ColumnType::Int32,
            Self::Double(_) => ColumnType::Double,
        }
    }
}

/// Immutable column layout: types, byte offsets, and total row width.
#[derive(Clone, Debug)]
pub struct Schema {
    types: Vec<ColumnType>,
    offsets: Vec<usize>,
    row_width: usize,
}

impl Schema {
    /// Build a schema from column types, computing packed offsets.
    ///
    /// Fails on an empty column list or any `Unknown` column.
    pub fn new(types: Vec<ColumnType>) -> Result<Self> {
        ensure!(!types.is_empty(), "schema needs at least one column");
        let mut offsets = Vec::with_capacity(types.len());
        let mut width = 0usize;
        for (col, ty) in types.iter().enumerate() {
            ensure!(
                *ty != ColumnType::Unknown,
                "column {col} has no inferred type"
            );
            offsets.push(width);
            width += ty.width();
        }
        Ok(Self {
            types,
            offsets,
            row_width: width,
        })
    }

    #[inline]
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.types.len()
    }

    /// Total packed row width in bytes.
    #[inline]
    #[must_use]
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Type of column `col`; `None` when out of range.
    #[inline]
    #[must_use]
    pub fn column_type(&self, col: usize) -> Option<ColumnType> {
        self.types.get(col).copied()
    }

    /// Byte offset of column `col` within the row; `None` when out of range.
    #[inline]
    #[must_use]
    pub fn column_offset(&self, col: usize) -> Option<usize> {
        self.offsets.get(col).copied()
    }

    /// Read column `col` of a packed row image, widening `Int32` to `f64`.
    ///
    /// Sort keys and labels compare by value, not by representation.
    #[inline]
    pub(crate) fn cell_f64(&self, row: &[u8], col: usize) -> f64 {
        let off = self.offsets[col];
        match self.types[col] {
            ColumnType::Int32 => f64::from(read_i32(row, off)),
            ColumnType::Double => read_f64(row, off),
            ColumnType::Unknown => unreachable!("unknown column survived schema construction"),
        }
    }
}

#[inline]
pub(crate) fn read_i32(row: &[u8], off: usize) -> i32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&row[off..off + 4]);
    i32::from_ne_bytes(bytes)
}

#[inline]
pub(crate) fn read_f64(row: &[u8], off: usize) -> f64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&row[off..off + 8]);
    f64::from_ne_bytes(bytes)
}

#[inline]
pub(crate) fn write_i32(row: &mut [u8], off: usize, v: i32) {
    row[off..off + 4].copy_from_slice(&v.to_ne_bytes());
}

#[inline]
pub(crate) fn write_f64(row: &mut [u8], off: usize, v: f64) {
    row[off..off + 8].copy_from_slice(&v.to_ne_bytes());
}
