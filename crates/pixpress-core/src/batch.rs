//! Running the reducer over every image in a directory.
//!
//! Only the directory's immediate entries are considered. A file that fails
//! is recorded in the report and the batch moves on to the next one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::reduce::{reduce_file, ReduceError, ReduceOptions, ReduceOutcome};

/// File extensions picked up by the batch, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "gif", "webp"];

/// Errors that prevent a batch from starting.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The target directory does not exist.
    #[error("Directory '{}' does not exist", .0.display())]
    MissingDirectory(PathBuf),

    /// The directory exists but could not be listed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The outcome for one file of a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub result: Result<ReduceOutcome, ReduceError>,
}

/// Per-file results of a batch, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Number of files processed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the directory contained no matching images.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files that were rewritten under budget.
    pub fn optimized(&self) -> usize {
        self.count(|r| matches!(r, Ok(ReduceOutcome::Optimized { .. })))
    }

    /// Files that were already within budget.
    pub fn already_optimized(&self) -> usize {
        self.count(|r| matches!(r, Ok(ReduceOutcome::AlreadyOptimized { .. })))
    }

    /// Files that could not be brought under budget.
    pub fn unreachable(&self) -> usize {
        self.count(|r| matches!(r, Ok(ReduceOutcome::ThresholdUnreachable { .. })))
    }

    /// Files that failed with an error.
    pub fn failed(&self) -> usize {
        self.count(|r| r.is_err())
    }

    fn count(&self, pred: impl Fn(&Result<ReduceOutcome, ReduceError>) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.result)).count()
    }
}

/// Whether `path`'s file name ends in one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_image(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| {
        name.strip_suffix(ext)
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

/// List the supported image files directly inside `dir`, sorted by name.
///
/// # Errors
///
/// Returns `BatchError::MissingDirectory` if `dir` does not exist or is not a
/// directory.
pub fn find_images(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::MissingDirectory(dir.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }
    images.sort();

    debug!(dir = %dir.display(), count = images.len(), "found images");
    Ok(images)
}

/// Reduce each of `paths` in order, calling `on_result` after every file.
pub fn optimize_images<F>(paths: &[PathBuf], options: &ReduceOptions, mut on_result: F) -> BatchReport
where
    F: FnMut(&Path, &Result<ReduceOutcome, ReduceError>),
{
    let mut report = BatchReport::default();
    for path in paths {
        let result = reduce_file(path, options);
        on_result(path, &result);
        report.entries.push(BatchEntry {
            path: path.clone(),
            result,
        });
    }
    report
}

/// Reduce every supported image directly inside `dir`.
pub fn optimize_directory(dir: &Path, options: &ReduceOptions) -> Result<BatchReport, BatchError> {
    let images = find_images(dir)?;
    Ok(optimize_images(&images, options, |_, _| {}))
}
