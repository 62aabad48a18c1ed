//! Grayscale reduction.
//!
//! Uses ITU-R BT.601 integer weights, `Y = (299 R + 587 G + 114 B + 500) / 1000`.
//! Translucent pixels are composited over white first, so a fully transparent
//! pixel is light. The formula is fixed; every conversion uses it.

use image::{GenericImageView, GrayImage, Luma, Pixel, Rgba};
use tracing::debug;

/// BT.601 weights for R, G and B, scaled by 1000.
pub const LUMA_WEIGHTS: [u32; 3] = [299, 587, 114];

const WEIGHT_SUM: u32 = 1000;

/// Luma of a single RGBA pixel.
pub fn luma_of(px: Rgba<u8>) -> u8 {
    let [r, g, b, a] = px.0;
    let weighted = LUMA_WEIGHTS[0] * over_white(r, a)
        + LUMA_WEIGHTS[1] * over_white(g, a)
        + LUMA_WEIGHTS[2] * over_white(b, a);
    // Max is (255 * 1000 + 500) / 1000 = 255, so the cast cannot truncate.
    ((weighted + WEIGHT_SUM / 2) / WEIGHT_SUM) as u8
}

/// Composite one channel over a white background.
fn over_white(channel: u8, alpha: u8) -> u32 {
    let (c, a) = (u32::from(channel), u32::from(alpha));
    (c * a + 255 * (255 - a) + 127) / 255
}

/// Reduce any 8-bit image to a grayscale buffer of the same size.
pub fn to_luma_image<I>(img: &I) -> GrayImage
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = img.dimensions();
    debug!(width, height, "Converting image to luma");
    GrayImage::from_fn(width, height, |x, y| {
        Luma([luma_of(img.get_pixel(x, y).to_rgba())])
    })
}
