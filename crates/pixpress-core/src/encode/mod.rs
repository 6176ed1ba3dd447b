//! Image encoding for pixpress.
//!
//! This module provides functionality for:
//! - Encoding RGB or grayscale rasters to JPEG format at a given quality
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::PixelMode;
//! use pixpress_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, PixelMode::Rgb, 85).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, encode_raster, EncodeError};
