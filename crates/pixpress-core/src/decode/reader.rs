//! Format-agnostic decoding into a normalized raster.

use std::io::Cursor;

use image::{ImageError, ImageReader};

use super::{normalize, DecodeError, RasterImage};

/// Decode image bytes and normalize the result for JPEG encoding.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes in any supported format
///
/// # Returns
///
/// A `RasterImage` in RGB or grayscale with any alpha composited over white.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized.
/// Returns `DecodeError::CorruptedFile` if the data cannot be decoded.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    Ok(normalize(img))
}
