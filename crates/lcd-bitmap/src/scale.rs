//! Preview scaling.
//!
//! Fits an image into a bounding box without magnifying past a maximum
//! factor, using nearest-neighbour sampling so hard pixel edges survive.

use image::{GenericImageView, ImageBuffer, Pixel};
use tracing::debug;

use crate::{
    DEFAULT_MAX_PREVIEW_HEIGHT, DEFAULT_MAX_PREVIEW_WIDTH, DEFAULT_MAX_SCALE_FACTOR,
    LcdBitmapError, Result,
};

/// A freshly allocated buffer holding a scaled copy of its source.
pub type ScaledBuffer<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Envelope a preview must fit into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewBounds {
    pub max_width: u32,
    pub max_height: u32,
    /// Upper clamp on magnification.
    pub max_factor: f32,
}

impl Default for PreviewBounds {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_PREVIEW_WIDTH,
            max_height: DEFAULT_MAX_PREVIEW_HEIGHT,
            max_factor: DEFAULT_MAX_SCALE_FACTOR,
        }
    }
}

impl PreviewBounds {
    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(LcdBitmapError::InvalidDimension {
                width: self.max_width,
                height: self.max_height,
            });
        }
        if !self.max_factor.is_finite() || self.max_factor <= 0.0 {
            return Err(LcdBitmapError::InvalidScaleFactor(self.max_factor));
        }
        Ok(())
    }
}

/// Scale factor for a `width` x `height` source: the tightest of the
/// magnification cap and the two bounding-box ratios.
pub fn fit_factor(width: u32, height: u32, bounds: &PreviewBounds) -> Result<f32> {
    if width == 0 || height == 0 {
        return Err(LcdBitmapError::InvalidDimension { width, height });
    }
    bounds.validate()?;

    let fit_w = bounds.max_width as f32 / width as f32;
    let fit_h = bounds.max_height as f32 / height as f32;
    Ok(bounds.max_factor.min(fit_w).min(fit_h))
}

/// Output size for a source dimension, never below one pixel.
fn scaled_len(len: u32, factor: f32) -> u32 {
    ((len as f32 * factor).round() as u32).max(1)
}

/// Source coordinate sampled for output coordinate `out`.
fn source_coord(out: u32, factor: f32, len: u32) -> u32 {
    ((out as f32 / factor).floor() as u32).min(len - 1)
}

/// Scale `img` to fit `bounds` with nearest-neighbour sampling.
///
/// The result has the source's pixel type and is `round(W*f)` x `round(H*f)`,
/// each at least 1, where `f` is [`fit_factor`].
pub fn scale<I>(img: &I, bounds: &PreviewBounds) -> Result<ScaledBuffer<I::Pixel>>
where
    I: GenericImageView,
{
    let (orig_w, orig_h) = img.dimensions();
    let factor = fit_factor(orig_w, orig_h, bounds)?;
    let new_width = scaled_len(orig_w, factor);
    let new_height = scaled_len(orig_h, factor);

    debug!(
        orig_w,
        orig_h,
        factor,
        new_width,
        new_height,
        "Scaling image with nearest-neighbour sampling"
    );

    Ok(ImageBuffer::from_fn(new_width, new_height, |x, y| {
        img.get_pixel(
            source_coord(x, factor, orig_w),
            source_coord(y, factor, orig_h),
        )
    }))
}
