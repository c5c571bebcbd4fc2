// crates/rocpr-frame/src/store.rs

//! Single-window paging of the logical row table against a scratch file.
//!
//! At most one input block is resident; rows outside the current window live
//! in the backing file, which is created lazily on the first spill and
//! removed when the store is dropped. Rows inside the window are
//! authoritative in memory only — the file holds the complement.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use tracing::debug;

use crate::block::Block;

#[derive(Debug)]
pub(crate) struct PagedStore {
    path: PathBuf,
    file: Option<File>,
    row_width: usize,
    block: Block,
    num_rows: u64,
    dirty: bool,
}

impl PagedStore {
    pub(crate) fn new(path: PathBuf, row_width: usize, block_bytes: usize) -> Result<Self> {
        let block = Block::new(block_bytes, row_width)?;
        Ok(Self {
            path,
            file: None,
            row_width,
            block,
            num_rows: 0,
            dirty: false,
        })
    }

    #[inline]
    pub(crate) fn num_rows(&self) -> u64 {
        self.num_rows
    }

    #[inline]
    pub(crate) fn rows_per_block(&self) -> usize {
        self.block.capacity()
    }

    #[inline]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    fn window_start(&self, row: u64) -> u64 {
        let rpb = self.block.capacity() as u64;
        row / rpb * rpb
    }

    /// Writable slot for the next row.
    ///
    /// Positions the window over the table tail, spilling the current window
    /// if it is elsewhere (or full), but does not yet extend the table; pair
    /// with [`Self::commit_append`] once the row image is written.
    pub(crate) fn append_slot(&mut self) -> Result<&mut [u8]> {
        let w = self.window_start(self.num_rows);
        if w != self.block.row_offset {
            self.seek_window(w)?;
        }
        let rel = (self.num_rows - self.block.row_offset) as usize;
        Ok(self.block.row_mut(rel))
    }

    /// Commit the row written into the slot from [`Self::append_slot`].
    pub(crate) fn commit_append(&mut self) {
        let rel = (self.num_rows - self.block.row_offset) as usize;
        self.block.len = self.block.len.max(rel + 1);
        self.dirty = true;
        self.num_rows += 1;
    }

    /// Packed image of absolute row `row`, paging its window in if needed.
    pub(crate) fn row_bytes(&mut self, row: u64) -> Result<&[u8]> {
        ensure!(
            row < self.num_rows,
            "row {row} out of range ({} rows)",
            self.num_rows
        );
        let w = self.window_start(row);
        if w != self.block.row_offset {
            self.seek_window(w)?;
        }
        let rel = (row - self.block.row_offset) as usize;
        Ok(self.block.row(rel))
    }

    /// Ensure the window starting at absolute row `w` is resident.
    pub(crate) fn load_window(&mut self, w: u64) -> Result<()> {
        if w != self.block.row_offset {
            self.seek_window(w)?;
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn block(&self) -> &Block {
        &self.block
    }

    #[inline]
    pub(crate) fn block_mut(&mut self) -> &mut Block {
        &mut self.block
    }

    #[inline]
    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Write the dirty window back, creating the backing file on first spill.
    pub(crate) fn flush(&mut self) -> Result<()> {
        if !self.dirty || self.block.len == 0 {
            self.dirty = false;
            return Ok(());
        }
        if self.file.is_none() {
            debug!(path = %self.path.display(), "creating backing file");
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(&self.path)
                .with_context(|| format!("create backing file {}", self.path.display()))?;
            self.file = Some(file);
        }
        let off = self.block.row_offset * self.row_width as u64;
        let bytes = self.block.rows_bytes(self.block.len);
        let file = self.file.as_mut().context("backing file unavailable")?;
        file.seek(SeekFrom::Start(off))
            .with_context(|| format!("seek {} to row {}", self.path.display(), self.block.row_offset))?;
        debug!(row = self.block.row_offset, rows = self.block.len, "writing window");
        file.write_all(bytes)
            .with_context(|| format!("write window at row {} to {}", self.block.row_offset, self.path.display()))?;
        self.dirty = false;
        Ok(())
    }

    /// Write back the current window if dirty, then load the window at `w`.
    fn seek_window(&mut self, w: u64) -> Result<()> {
        self.flush()?;
        self.load_window_at(w)
    }

    fn load_window_at(&mut self, w: u64) -> Result<()> {
        let remaining = self.num_rows.saturating_sub(w);
        let avail = remaining.min(self.block.capacity() as u64) as usize;
        if avail > 0 {
            let off = w * self.row_width as u64;
            let path = &self.path;
            let file = self
                .file
                .as_mut()
                .context("no backing file for resident rows")?;
            file.seek(SeekFrom::Start(off))
                .with_context(|| format!("seek {} to row {w}", path.display()))?;
            debug!(row = w, rows = avail, "reading window");
            file.read_exact(self.block.rows_bytes_mut(avail))
                .with_context(|| format!("read window at row {w} from {}", path.display()))?;
        }
        self.block.row_offset = w;
        self.block.len = avail;
        self.dirty = false;
        Ok(())
    }

    /// Read `out.len()` bytes of packed rows starting at absolute
    /// `start_row`. Used by the merge phase to refill run buffers.
    pub(crate) fn read_rows(&mut self, start_row: u64, out: &mut [u8]) -> Result<()> {
        let off = start_row * self.row_width as u64;
        let path = &self.path;
        let file = self.file.as_mut().context("no backing file to merge from")?;
        file.seek(SeekFrom::Start(off))
            .with_context(|| format!("seek {} to row {start_row}", path.display()))?;
        file.read_exact(out)
            .with_context(|| format!("read run rows at {start_row} from {}", path.display()))?;
        Ok(())
    }

    /// Swap `sorted` in as the new backing file (delete-then-rename), reopen
    /// it, and reload the window over row 0.
    pub(crate) fn replace_with_sorted(&mut self, sorted: &Path) -> Result<()> {
        self.file = None;
        fs::remove_file(&self.path)
            .with_context(|| format!("remove old backing file {}", self.path.display()))?;
        fs::rename(sorted, &self.path).with_context(|| {
            format!("rename {} into {}", sorted.display(), self.path.display())
        })?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .with_context(|| format!("reopen backing file {}", self.path.display()))?;
        self.file = Some(file);
        self.dirty = false;
        self.load_window_at(0)
    }
}

impl Drop for PagedStore {
    fn drop(&mut self) {
        // The backing file is a scratch region whose lifetime equals ours.
        if self.file.take().is_some() {
            let _ = fs::remove_file(&self.path);
        }
    }
}
