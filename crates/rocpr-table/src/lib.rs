// crates/rocpr-table/src/lib.rs

//! Tab-separated ASCII table loading.
//!
//! A short lookahead fixes the schema (header detection plus per-column type
//! inference), then the file is re-streamed and parsed into a
//! [`rocpr_frame::DataFrame`].

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod infer;
pub mod load;

pub use infer::{sniff_file, sniff_lines, HeaderMode, TableShape, LOOKAHEAD_LINES};
pub use load::{load_ascii, LoadOptions};
