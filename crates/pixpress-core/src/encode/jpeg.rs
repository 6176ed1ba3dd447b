//! JPEG encoding for size reduction.
//!
//! Encoding goes through `jpeg-encoder` with image-optimized Huffman tables,
//! which never loses quality and shaves bytes off every quality level the
//! reducer tries. Callers pick the quality; the reducer walks it downward
//! until the output fits its budget.

use jpeg_encoder::Encoder;
use thiserror::Error;

use crate::decode::{PixelMode, RasterImage};

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Width or height exceeds the 65535 pixel JPEG limit
    #[error("Image too large for JPEG: {width}x{height} (max 65535 per side)")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode packed pixel data to JPEG bytes with optimized Huffman tables.
///
/// # Arguments
///
/// * `pixels` - Pixel data in `mode` layout, row-major order
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `mode` - RGB (3 bytes per pixel) or grayscale (1 byte per pixel)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    mode: PixelMode,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    encode_with_tables(pixels, width, height, mode, quality, true)
}

/// Encode a normalized raster to JPEG bytes.
pub fn encode_raster(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&image.pixels, image.width, image.height, image.mode, quality)
}

fn encode_with_tables(
    pixels: &[u8],
    width: u32,
    height: u32,
    mode: PixelMode,
    quality: u8,
    optimize_huffman: bool,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(EncodeError::DimensionsTooLarge { width, height });
    };

    let expected_len = (width as usize) * (height as usize) * mode.channels();
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, quality);
    encoder.set_optimized_huffman_tables(optimize_huffman);

    encoder
        .encode(pixels, w, h, mode.to_color_type())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}
