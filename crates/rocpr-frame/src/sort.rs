// crates/rocpr-frame/src/sort.rs

//! Two-pass external sort: in-place run generation in the input window,
//! then a single k-way merge over the on-disk runs.
//!
//! Run length equals the window capacity, so run boundaries are exactly the
//! windows phase 1 sorted; the final run may be shorter and every merge read
//! clamps at both its run end and the table end.

use std::cmp::Ordering;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use tracing::{debug, info};

use crate::block::Block;
use crate::schema::Schema;
use crate::store::PagedStore;

/// Upper bound on each merge-input buffer.
const MERGE_BLOCK_BYTES: usize = 64 * 1024;

/// Lexicographic `f64` comparison over the key columns of packed rows.
struct RowComparator<'a> {
    schema: &'a Schema,
    keys: &'a [usize],
}

impl RowComparator<'_> {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        for &key in self.keys {
            let av = self.schema.cell_f64(a, key);
            let bv = self.schema.cell_f64(b, key);
            match av.total_cmp(&bv) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

/// One run's read state during the merge.
struct MergeInput {
    block: Block,
    /// Absolute row index of the run's first row.
    start: u64,
    /// Rows in this run (the final run may be shorter than the rest).
    run_len: u64,
}

impl MergeInput {
    #[inline]
    fn exhausted(&self) -> bool {
        self.block.consumed >= self.run_len
    }

    #[inline]
    fn head(&self) -> &[u8] {
        self.block.row(self.block.cursor)
    }

    #[inline]
    fn advance(&mut self) {
        self.block.cursor += 1;
        self.block.consumed += 1;
    }
}

/// Sort every row of `store` ascending by `keys`, leaving the new order
/// visible through normal cell access. When `label_col` is given, returns
/// the number of rows whose label value is positive (counted during run
/// generation); otherwise returns 0.
pub(crate) fn sort_frame(
    store: &mut PagedStore,
    schema: &Schema,
    keys: &[usize],
    label_col: Option<usize>,
) -> Result<u64> {
    ensure!(!keys.is_empty(), "sort needs at least one key column");
    for &key in keys {
        ensure!(
            key < schema.num_columns(),
            "key column {key} out of range ({} columns)",
            schema.num_columns()
        );
    }
    if let Some(label) = label_col {
        ensure!(
            label < schema.num_columns(),
            "label column {label} out of range ({} columns)",
            schema.num_columns()
        );
    }

    let n = store.num_rows();
    if n == 0 {
        return Ok(0);
    }

    let cmp = RowComparator { schema, keys };
    let rows_per_block = store.rows_per_block();
    let rpb = rows_per_block as u64;

    // Phase 1: sort each window in place, producing k sorted runs on disk
    // (or a single run still in memory).
    let mut positives = 0u64;
    let mut w = 0u64;
    while w < n {
        store.load_window(w)?;
        let rows = store.block().len;
        store.block_mut().sort_rows_by(rows, |a, b| cmp.compare(a, b));
        if let Some(label) = label_col {
            for rel in 0..rows {
                if schema.cell_f64(store.block().row(rel), label) > 0.0 {
                    positives += 1;
                }
            }
        }
        store.mark_dirty();
        w += rpb;
    }

    let k = n.div_ceil(rpb);
    if k <= 1 {
        debug!(rows = n, "single run, sorted within the window");
        return Ok(positives);
    }

    // Phase 2: flush the final run, merge the k on-disk runs into the
    // sorted scratch file, and swap it in as the new backing file.
    store.flush()?;

    let row_width = schema.row_width();
    let merge_rows = (MERGE_BLOCK_BYTES / row_width).clamp(1, rows_per_block);
    info!(runs = k, rows_per_run = rpb, merge_rows, "merging sorted runs");

    let mut inputs = Vec::with_capacity(k as usize);
    for i in 0..k {
        let start = i * rpb;
        let mut block = Block::new(merge_rows * row_width, row_width)?;
        block.row_offset = start;
        inputs.push(MergeInput {
            block,
            start,
            run_len: rpb.min(n - start),
        });
    }

    let sorted_path = sorted_path_for(store.path());
    let file = File::create(&sorted_path)
        .with_context(|| format!("create sorted output {}", sorted_path.display()))?;
    let mut out = BufWriter::new(file);

    for _ in 0..n {
        // Refill any live run whose buffer is drained.
        for input in inputs.iter_mut() {
            if input.exhausted() || input.block.cursor < input.block.len {
                continue;
            }
            let next = input.block.row_offset + input.block.len as u64;
            let run_end = input.start + input.run_len;
            let rows = (run_end - next).min(input.block.capacity() as u64) as usize;
            store.read_rows(next, input.block.rows_bytes_mut(rows))?;
            input.block.row_offset = next;
            input.block.len = rows;
            input.block.cursor = 0;
        }

        // Pick the smallest head among the live runs.
        let mut best: Option<usize> = None;
        for (idx, input) in inputs.iter().enumerate() {
            if input.exhausted() {
                continue;
            }
            best = match best {
                Some(cur) if cmp.compare(input.head(), inputs[cur].head()) == Ordering::Less => {
                    Some(idx)
                }
                Some(cur) => Some(cur),
                None => Some(idx),
            };
        }
        let best = best.context("merge ran out of rows early")?;
        out.write_all(inputs[best].head())
            .with_context(|| format!("append row to {}", sorted_path.display()))?;
        inputs[best].advance();
    }

    out.flush()
        .with_context(|| format!("flush {}", sorted_path.display()))?;
    drop(out);

    store.replace_with_sorted(&sorted_path)?;
    Ok(positives)
}

fn sorted_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push("-sorted");
    PathBuf::from(name)
}
