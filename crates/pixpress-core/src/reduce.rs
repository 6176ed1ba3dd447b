//! Shrinking a single image file under a byte budget.
//!
//! The reducer decodes the file, normalizes it for JPEG, and if the file on
//! disk is over budget re-encodes it at quality 85, 80, ... down to 15. The
//! first encoding that fits is written over the original file. If none fits,
//! the file is left untouched.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode_raster, EncodeError};

/// Default budget in kilobytes.
pub const DEFAULT_MAX_SIZE_KB: u64 = 500;

/// First quality level tried.
pub const MAX_QUALITY: u8 = 85;

/// Exclusive lower bound; the search stops once quality reaches it.
pub const QUALITY_FLOOR: u8 = 10;

/// Quality decrement between attempts.
pub const QUALITY_STEP: u8 = 5;

/// Errors that abort processing of a single file.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// Reading or writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file could not be decoded as an image.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Re-encoding the normalized image failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Options for the size reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceOptions {
    /// Maximum acceptable file size in kilobytes (x1024 bytes).
    pub max_size_kb: u64,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            max_size_kb: DEFAULT_MAX_SIZE_KB,
        }
    }
}

impl ReduceOptions {
    /// Create options with the given budget in kilobytes.
    pub fn new(max_size_kb: u64) -> Self {
        Self { max_size_kb }
    }

    /// The budget in bytes.
    pub fn budget_bytes(&self) -> u64 {
        self.max_size_kb.saturating_mul(1024)
    }
}

/// Result of a reducer run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReduceOutcome {
    /// The file was already within budget and was not touched.
    AlreadyOptimized { size: u64 },
    /// The file was overwritten with a JPEG encoding that fits the budget.
    Optimized {
        original_size: u64,
        size: u64,
        quality: u8,
    },
    /// No quality level produced a small enough encoding; file untouched.
    ThresholdUnreachable { size: u64, max_size_kb: u64 },
}

impl ReduceOutcome {
    /// Whether the file on disk was rewritten.
    pub fn is_written(&self) -> bool {
        matches!(self, ReduceOutcome::Optimized { .. })
    }
}

/// An encoding produced during the quality search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Quality level the bytes were encoded at.
    pub quality: u8,
    /// Encoded JPEG bytes.
    pub bytes: Vec<u8>,
}

impl Candidate {
    /// Encoded size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Quality levels tried by the reducer, highest first: 85, 80, ..., 15.
pub fn quality_levels() -> impl Iterator<Item = u8> {
    (QUALITY_FLOOR + QUALITY_STEP..=MAX_QUALITY)
        .rev()
        .step_by(QUALITY_STEP as usize)
}

/// Find the first quality level, scanning from high to low, whose encoding
/// is at most `budget` bytes.
///
/// `encode` is called once per level until one fits. Returns `Ok(None)` when
/// every level is over budget.
pub fn search_quality<F>(budget: u64, mut encode: F) -> Result<Option<Candidate>, EncodeError>
where
    F: FnMut(u8) -> Result<Vec<u8>, EncodeError>,
{
    for quality in quality_levels() {
        let bytes = encode(quality)?;
        debug!(quality, size = bytes.len(), budget, "encoded candidate");
        if bytes.len() as u64 <= budget {
            return Ok(Some(Candidate { quality, bytes }));
        }
    }
    Ok(None)
}

/// Shrink the image at `path` in place so it fits `options`' budget.
///
/// The overwrite is a plain truncating write; no backup is kept.
///
/// # Errors
///
/// Returns `ReduceError` if the file cannot be read, decoded, encoded or
/// written. A budget that cannot be met is not an error; it is reported as
/// [`ReduceOutcome::ThresholdUnreachable`].
pub fn reduce_file(path: &Path, options: &ReduceOptions) -> Result<ReduceOutcome, ReduceError> {
    let bytes = fs::read(path)?;
    let original_size = bytes.len() as u64;
    let image = decode_image(&bytes)?;
    drop(bytes);

    let budget = options.budget_bytes();
    if original_size <= budget {
        debug!(path = %path.display(), size = original_size, "already within budget");
        return Ok(ReduceOutcome::AlreadyOptimized {
            size: original_size,
        });
    }

    match search_quality(budget, |quality| encode_raster(&image, quality))? {
        Some(candidate) => {
            fs::write(path, &candidate.bytes)?;
            info!(
                path = %path.display(),
                original_size,
                size = candidate.size(),
                quality = candidate.quality,
                "optimized"
            );
            Ok(ReduceOutcome::Optimized {
                original_size,
                size: candidate.size(),
                quality: candidate.quality,
            })
        }
        None => {
            warn!(
                path = %path.display(),
                size = original_size,
                max_size_kb = options.max_size_kb,
                "budget unreachable at lowest quality"
            );
            Ok(ReduceOutcome::ThresholdUnreachable {
                size: original_size,
                max_size_kb: options.max_size_kb,
            })
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
    use std::path::Path;

    /// Deterministic pseudo-random bytes; noise defeats PNG and JPEG compression.
    pub fn noise(len: usize, seed: u32) -> Vec<u8> {
        let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 16) as u8
            })
            .collect()
    }

    pub fn write_noise_png(path: &Path, width: u32, height: u32) {
        let pixels = noise((width * height * 3) as usize, width ^ height);
        let img = RgbImage::from_raw(width, height, pixels).unwrap();
        DynamicImage::ImageRgb8(img)
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    pub fn write_transparent_noise_png(path: &Path, width: u32, height: u32) {
        let mut pixels = noise((width * height * 4) as usize, width);
        for alpha in pixels.iter_mut().skip(3).step_by(4) {
            *alpha = 0;
        }
        let img = RgbaImage::from_raw(width, height, pixels).unwrap();
        DynamicImage::ImageRgba8(img)
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }
}
