//! Image decoding pipeline for pixpress.
//!
//! This module provides functionality for:
//! - Decoding any supported input format (JPEG, PNG, BMP, GIF, WebP)
//! - Normalizing the decoded raster so it can be re-encoded as JPEG
//!
//! The format is detected from the file content, not its extension.
//!
//! # Examples
//!
//! ```ignore
//! use pixpress_core::decode::decode_image;
//!
//! let bytes = std::fs::read("banner.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod flatten;
mod reader;
mod types;

pub use flatten::{blend_over_white, flatten_over_white, normalize};
pub use reader::decode_image;
pub use types::{DecodeError, PixelMode, RasterImage};
