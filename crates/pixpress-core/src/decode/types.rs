//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Pixel layout of a [`RasterImage`].
///
/// Only the two layouts a baseline JPEG can carry are represented; anything
/// else is normalized into one of them at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelMode {
    /// 8-bit RGB, 3 bytes per pixel.
    #[default]
    Rgb,
    /// 8-bit single-channel grayscale, 1 byte per pixel.
    Gray,
}

impl PixelMode {
    /// Number of bytes per pixel for this mode.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelMode::Rgb => 3,
            PixelMode::Gray => 1,
        }
    }

    /// Convert to the JPEG encoder's color type.
    pub fn to_color_type(self) -> jpeg_encoder::ColorType {
        match self {
            PixelMode::Rgb => jpeg_encoder::ColorType::Rgb,
            PixelMode::Gray => jpeg_encoder::ColorType::Luma,
        }
    }
}

/// A decoded, alpha-free raster ready for JPEG encoding.
#[derive(Debug, Clone)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel layout of `pixels`.
    pub mode: PixelMode,
    /// Pixel data in row-major order.
    /// Length should be width * height * mode.channels().
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: PixelMode::Rgb,
            pixels: img.into_raw(),
        }
    }

    /// Create a RasterImage from an image::GrayImage.
    pub fn from_gray_image(img: image::GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: PixelMode::Gray,
            pixels: img.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_mode_channels() {
        assert_eq!(PixelMode::Rgb.channels(), 3);
        assert_eq!(PixelMode::Gray.channels(), 1);
    }

    #[test]
    fn test_pixel_mode_color_type() {
        assert!(matches!(
            PixelMode::Rgb.to_color_type(),
            jpeg_encoder::ColorType::Rgb
        ));
        assert!(matches!(
            PixelMode::Gray.to_color_type(),
            jpeg_encoder::ColorType::Luma
        ));
    }

    #[test]
    fn test_raster_image_from_rgb() {
        let rgb = image::RgbImage::from_pixel(100, 50, image::Rgb([1, 2, 3]));
        let img = RasterImage::from_rgb_image(rgb);

        assert_eq!((img.width, img.height), (100, 50));
        assert_eq!(img.mode, PixelMode::Rgb);
        assert_eq!(img.pixels.len(), 100 * 50 * 3);
    }

    #[test]
    fn test_raster_image_from_gray() {
        let gray = image::GrayImage::from_pixel(4, 3, image::Luma([7]));
        let img = RasterImage::from_gray_image(gray);

        assert_eq!(img.mode, PixelMode::Gray);
        assert_eq!(img.pixels.len(), 12);
    }

    #[test]
    fn test_pixel_mode_serde_round_trip() {
        let json = serde_json::to_string(&PixelMode::Gray).unwrap();
        assert_eq!(json, "\"Gray\"");
        assert_eq!(serde_json::from_str::<PixelMode>(&json).unwrap(), PixelMode::Gray);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("unexpected EOF".to_string());
        assert_eq!(
            err.to_string(),
            "Corrupted or incomplete image file: unexpected EOF"
        );

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
