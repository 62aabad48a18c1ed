//! Binarization of grayscale images into 1-bit rasters.
//!
//! Provides plain threshold conversion and Floyd-Steinberg error-diffusion
//! dithering. Both classify a pixel as light when its luma is at or above the
//! threshold, then map dark/light to a bit through [`BitPolarity`].

use image::{GenericImageView, GrayImage, Luma, Pixel};
use tracing::debug;

use crate::luma::to_luma_image;
use crate::options::{BitPolarity, ConvertOptions};
use crate::{LcdBitmapError, Result};

/// One bit per pixel, row-major, stored as 0/1 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryRaster {
    width: u32,
    height: u32,
    polarity: BitPolarity,
    bits: Vec<u8>,
}

impl BinaryRaster {
    /// Build a raster from explicit bits.
    ///
    /// `bits` must hold exactly `width * height` values, each 0 or 1.
    pub fn from_bits(
        width: u32,
        height: u32,
        polarity: BitPolarity,
        bits: Vec<u8>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if bits.len() != expected {
            return Err(LcdBitmapError::RasterSize {
                expected,
                actual: bits.len(),
            });
        }
        if let Some((index, &value)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
            return Err(LcdBitmapError::InvalidBit { index, value });
        }
        Ok(Self {
            width,
            height,
            polarity,
            bits,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Polarity the bits were produced with.
    pub fn polarity(&self) -> BitPolarity {
        self.polarity
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// All bits, row-major.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Bit at (x, y).
    ///
    /// # Panics
    /// Panics if the coordinates are outside the raster.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) out of bounds for {}x{} raster",
            self.width,
            self.height
        );
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Iterate over the rows of the raster. Yields nothing for a zero-width raster.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // An empty `bits` yields no chunks, so the `max(1)` only guards `chunks(0)`.
        self.bits.chunks(self.width.max(1) as usize)
    }

    /// Render the raster as a black (dark) and white (light) grayscale image.
    pub fn to_preview_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.polarity.is_dark(self.get(x, y)) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }
}

/// Convert an image to a [`BinaryRaster`] according to `opts`.
///
/// The raster has exactly the source dimensions.
pub fn to_binary<I>(img: &I, opts: &ConvertOptions) -> BinaryRaster
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let gray = to_luma_image(img);
    if opts.dither {
        floyd_steinberg_binary(&gray, opts.threshold, opts.polarity)
    } else {
        threshold_binary(&gray, opts.threshold, opts.polarity)
    }
}

/// Simple threshold conversion without dithering.
///
/// Pixels with luma >= `threshold` are light, others are dark.
pub fn threshold_binary(img: &GrayImage, threshold: u8, polarity: BitPolarity) -> BinaryRaster {
    let (width, height) = img.dimensions();
    debug!(width, height, threshold, "Applying threshold conversion");

    let bits = img
        .pixels()
        .map(|p| polarity.bit_for(p.0[0] < threshold))
        .collect();

    BinaryRaster {
        width,
        height,
        polarity,
        bits,
    }
}

/// Apply Floyd-Steinberg dithering to a grayscale image.
///
/// Error distribution pattern:
/// - Right:        7/16
/// - Bottom-left:  3/16
/// - Bottom:       5/16
/// - Bottom-right: 1/16
pub fn floyd_steinberg_binary(
    img: &GrayImage,
    threshold: u8,
    polarity: BitPolarity,
) -> BinaryRaster {
    let (width, height) = img.dimensions();
    debug!(width, height, threshold, "Applying Floyd-Steinberg dithering");

    // Work with i16 buffer to handle error diffusion overflow
    let mut buffer: Vec<i16> = img.pixels().map(|p| i16::from(p.0[0])).collect();
    let mut bits = Vec::with_capacity(buffer.len());

    for y in 0..height {
        for x in 0..width {
            let idx = y as usize * width as usize + x as usize;
            let old_pixel = buffer[idx];
            let dark = old_pixel < i16::from(threshold);
            let new_pixel: i16 = if dark { 0 } else { 255 };
            bits.push(polarity.bit_for(dark));

            distribute_error(&mut buffer, x, y, width, height, old_pixel - new_pixel);
        }
    }

    debug!("Floyd-Steinberg dithering complete");
    BinaryRaster {
        width,
        height,
        polarity,
        bits,
    }
}

/// Distribute quantization error to neighboring pixels.
fn distribute_error(buffer: &mut [i16], x: u32, y: u32, width: u32, height: u32, error: i16) {
    let w = width as usize;
    let idx = y as usize * w + x as usize;

    // Right: 7/16
    if x + 1 < width {
        buffer[idx + 1] += error * 7 / 16;
    }
    // Bottom-left: 3/16
    if x > 0 && y + 1 < height {
        buffer[idx + w - 1] += error * 3 / 16;
    }
    // Bottom: 5/16
    if y + 1 < height {
        buffer[idx + w] += error * 5 / 16;
    }
    // Bottom-right: 1/16
    if x + 1 < width && y + 1 < height {
        buffer[idx + w + 1] += error / 16;
    }
}
