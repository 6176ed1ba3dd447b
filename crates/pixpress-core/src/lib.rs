//! pixpress Core - image size reduction and Sketch preview extraction
//!
//! This crate provides the two file utilities behind the `pixpress` binary:
//!
//! - [`reduce`] / [`batch`]: re-encode images as JPEG at decreasing quality
//!   until each file fits a byte budget
//! - [`sketch`]: unpack a `.sketch` archive and copy out its rendered previews
//!
//! The library never prints. Every operation returns a typed outcome and
//! emits `tracing` events; presentation is left to the caller.

pub mod batch;
pub mod decode;
pub mod encode;
pub mod reduce;
pub mod sketch;

pub use batch::{find_images, optimize_directory, optimize_images, BatchError, BatchReport};
pub use reduce::{reduce_file, ReduceError, ReduceOptions, ReduceOutcome};
pub use sketch::{export_previews, extract_previews, SketchError};
