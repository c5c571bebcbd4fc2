// crates/rocpr-frame/src/lib.rs

//! Out-of-core columnar data frame with external merge-sort.
//!
//! A fixed-size in-memory window is paged against a scratch file so tables
//! larger than memory stay addressable by (row, column). Sorting is the
//! classic two-pass scheme: in-place sorted runs the size of the window,
//! then a single k-way merge streamed back to disk.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod block;
mod sort;
mod store;

pub mod frame;
pub mod schema;

pub use frame::{DataFrame, FrameConfig};
pub use schema::{ColumnType, Schema, Value};
