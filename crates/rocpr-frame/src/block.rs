// crates/rocpr-frame/src/block.rs

//! Fixed-byte window over a contiguous range of packed rows.

use std::cmp::Ordering;

use anyhow::{ensure, Result};
use tracing::debug;

/// A mutable window of up to `capacity` packed rows.
///
/// The same structure backs the single input window of the paged store and
/// the per-run read buffers of the merge phase. `cursor` and `consumed` are
/// merge state: the relative read head within the buffer and the monotone
/// count of rows taken from the owning run.
#[derive(Debug)]
pub(crate) struct Block {
    buf: Vec<u8>,
    row_width: usize,
    capacity: usize,
    /// Absolute row index of the first row in the window.
    pub(crate) row_offset: u64,
    /// Number of valid rows currently in the buffer.
    pub(crate) len: usize,
    /// Relative consumption cursor (merge head).
    pub(crate) cursor: usize,
    /// Rows of the owning run consumed so far (merge exhaustion counter).
    pub(crate) consumed: u64,
}

impl Block {
    /// Allocate a window of `block_bytes`, holding `block_bytes / row_width`
    /// rows. Fails when `block_bytes` cannot fit a single row.
    pub(crate) fn new(block_bytes: usize, row_width: usize) -> Result<Self> {
        ensure!(row_width > 0, "row width must be non-zero");
        let capacity = block_bytes / row_width;
        ensure!(
            capacity >= 1,
            "block size of {block_bytes} bytes cannot hold a {row_width}-byte row"
        );
        debug!(capacity, row_width, "allocated block");
        Ok(Self {
            buf: vec![0u8; capacity * row_width],
            row_width,
            capacity,
            row_offset: 0,
            len: 0,
            cursor: 0,
            consumed: 0,
        })
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Packed image of relative row `rel`.
    #[inline]
    pub(crate) fn row(&self, rel: usize) -> &[u8] {
        &self.buf[rel * self.row_width..(rel + 1) * self.row_width]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, rel: usize) -> &mut [u8] {
        &mut self.buf[rel * self.row_width..(rel + 1) * self.row_width]
    }

    /// Raw bytes of the first `rows` rows.
    #[inline]
    pub(crate) fn rows_bytes(&self, rows: usize) -> &[u8] {
        &self.buf[..rows * self.row_width]
    }

    #[inline]
    pub(crate) fn rows_bytes_mut(&mut self, rows: usize) -> &mut [u8] {
        &mut self.buf[..rows * self.row_width]
    }

    /// Sort the first `rows` rows in place by `cmp`.
    ///
    /// Index sort followed by a cycle permutation, so the extra memory is
    /// one index per row plus a single spare row image.
    pub(crate) fn sort_rows_by<F>(&mut self, rows: usize, mut cmp: F)
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        let w = self.row_width;
        let buf = &mut self.buf;

        let mut order: Vec<usize> = (0..rows).collect();
        order.sort_unstable_by(|&a, &b| cmp(&buf[a * w..(a + 1) * w], &buf[b * w..(b + 1) * w]));

        let mut spare = vec![0u8; w];
        let mut placed = vec![false; rows];
        for start in 0..rows {
            if placed[start] || order[start] == start {
                placed[start] = true;
                continue;
            }
            spare.copy_from_slice(&buf[start * w..(start + 1) * w]);
            let mut dst = start;
            loop {
                let src = order[dst];
                placed[dst] = true;
                if src == start {
                    buf[dst * w..(dst + 1) * w].copy_from_slice(&spare);
                    break;
                }
                buf.copy_within(src * w..(src + 1) * w, dst * w);
                dst = src;
            }
        }
    }
}
