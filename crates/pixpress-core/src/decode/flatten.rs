//! Color normalization ahead of JPEG encoding.
//!
//! JPEG has no alpha channel, so transparent pixels are composited over an
//! opaque white background. Modes other than 8-bit RGB and 8-bit grayscale
//! are converted to 8-bit RGB.

use image::{DynamicImage, Rgb, RgbImage, RgbaImage};

use super::RasterImage;

/// Background value that transparent pixels are blended towards.
const BACKGROUND: u32 = 255;

/// Blend one channel value over white using its alpha.
///
/// `alpha == 0` yields white, `alpha == 255` yields `value` unchanged, and the
/// range in between is a linear mix rounded to the nearest integer.
#[inline]
pub fn blend_over_white(value: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((value as u32 * a + BACKGROUND * (255 - a) + 127) / 255) as u8
}

/// Composite an RGBA image over white, dropping the alpha channel.
pub fn flatten_over_white(rgba: &RgbaImage) -> RgbImage {
    let (width, height) = rgba.dimensions();
    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([
            blend_over_white(r, a),
            blend_over_white(g, a),
            blend_over_white(b, a),
        ])
    })
}

/// Normalize a decoded image into an alpha-free RGB or grayscale raster.
pub fn normalize(img: DynamicImage) -> RasterImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => RasterImage::from_rgb_image(rgb),
        DynamicImage::ImageLuma8(gray) => RasterImage::from_gray_image(gray),
        other if other.color().has_alpha() => {
            RasterImage::from_rgb_image(flatten_over_white(&other.to_rgba8()))
        }
        other => RasterImage::from_rgb_image(other.into_rgb8()),
    }
}
