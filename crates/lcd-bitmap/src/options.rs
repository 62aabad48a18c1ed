//! Conversion options.
//!
//! These options control thresholding, bit polarity, dithering and the
//! preview envelope. The luma formula and the MSB-first bit order are fixed
//! and are not part of this struct.

use serde::{Deserialize, Serialize};

use crate::scale::PreviewBounds;
use crate::{
    DEFAULT_MAX_PREVIEW_HEIGHT, DEFAULT_MAX_PREVIEW_WIDTH, DEFAULT_MAX_SCALE_FACTOR,
    DEFAULT_THRESHOLD, Result,
};

/// Which source pixels become a 1 bit in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitPolarity {
    /// Dark pixels (luma below the threshold) are 1. Matches controllers
    /// where a set bit lights the pixel on a light background.
    #[default]
    DarkIsOne,
    /// Light pixels are 1, dark pixels are 0.
    LightIsOne,
}

impl BitPolarity {
    /// Bit value for a pixel classified as dark or light.
    pub fn bit_for(self, dark: bool) -> u8 {
        match (self, dark) {
            (BitPolarity::DarkIsOne, true) | (BitPolarity::LightIsOne, false) => 1,
            _ => 0,
        }
    }

    /// Whether the given bit value denotes a dark pixel.
    pub fn is_dark(self, bit: u8) -> bool {
        match self {
            BitPolarity::DarkIsOne => bit != 0,
            BitPolarity::LightIsOne => bit == 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BitPolarity::DarkIsOne => "dark_is_one",
            BitPolarity::LightIsOne => "light_is_one",
        }
    }
}

impl std::str::FromStr for BitPolarity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dark_is_one" => Ok(BitPolarity::DarkIsOne),
            "light_is_one" => Ok(BitPolarity::LightIsOne),
            other => Err(format!(
                "unknown polarity '{other}' (expected 'dark_is_one' or 'light_is_one')"
            )),
        }
    }
}

/// Configuration for one conversion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Upper bound on preview magnification.
    pub max_scale_factor: f32,

    /// Preview bounding box width in pixels.
    pub max_preview_width: u32,

    /// Preview bounding box height in pixels.
    pub max_preview_height: u32,

    /// Luma at or above this value is light, below it is dark.
    pub threshold: u8,

    /// Mapping from dark/light pixels to bit values.
    pub polarity: BitPolarity,

    /// Use Floyd-Steinberg error diffusion instead of a plain threshold.
    pub dither: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_scale_factor: DEFAULT_MAX_SCALE_FACTOR,
            max_preview_width: DEFAULT_MAX_PREVIEW_WIDTH,
            max_preview_height: DEFAULT_MAX_PREVIEW_HEIGHT,
            threshold: DEFAULT_THRESHOLD,
            polarity: BitPolarity::default(),
            dither: false,
        }
    }
}

impl ConvertOptions {
    /// Create options with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the binarization threshold.
    pub fn with_threshold(mut self, val: u8) -> Self {
        self.threshold = val;
        self
    }

    /// Builder: set the bit polarity.
    pub fn with_polarity(mut self, val: BitPolarity) -> Self {
        self.polarity = val;
        self
    }

    /// Builder: set the dither flag.
    pub fn with_dither(mut self, val: bool) -> Self {
        self.dither = val;
        self
    }

    /// Builder: set the preview bounding box.
    pub fn with_preview_size(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_preview_width = max_width;
        self.max_preview_height = max_height;
        self
    }

    /// Builder: set the maximum preview magnification.
    pub fn with_max_scale_factor(mut self, val: f32) -> Self {
        self.max_scale_factor = val;
        self
    }

    /// Preview envelope derived from these options.
    pub fn preview_bounds(&self) -> PreviewBounds {
        PreviewBounds {
            max_width: self.max_preview_width,
            max_height: self.max_preview_height,
            max_factor: self.max_scale_factor,
        }
    }

    /// Reject option sets the scaler could not honour.
    pub fn validate(&self) -> Result<()> {
        self.preview_bounds().validate()
    }
}
