//! All environment setting definitions with their default values.

use lcd_bitmap::{
    DEFAULT_MAX_PREVIEW_HEIGHT, DEFAULT_MAX_PREVIEW_WIDTH, DEFAULT_MAX_SCALE_FACTOR,
    DEFAULT_THRESHOLD,
};

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: String,
    pub description: &'static str,
}

pub const MAX_SCALE_FACTOR: &str = "IMG2CODE_MAX_SCALE_FACTOR";
pub const MAX_PREVIEW_WIDTH: &str = "IMG2CODE_MAX_PREVIEW_WIDTH";
pub const MAX_PREVIEW_HEIGHT: &str = "IMG2CODE_MAX_PREVIEW_HEIGHT";
pub const THRESHOLD: &str = "IMG2CODE_THRESHOLD";
pub const POLARITY: &str = "IMG2CODE_POLARITY";
pub const DITHER: &str = "IMG2CODE_DITHER";
pub const PREVIEW_DIR: &str = "IMG2CODE_PREVIEW_DIR";

/// Setting definitions in the order they are applied.
pub static DEFAULT_SETTINGS: std::sync::LazyLock<Vec<SettingDef>> =
    std::sync::LazyLock::new(|| {
        let defs: [(&'static str, String, &'static str); 7] = [
            (
                MAX_SCALE_FACTOR,
                DEFAULT_MAX_SCALE_FACTOR.to_string(),
                "Upper bound on preview magnification",
            ),
            (
                MAX_PREVIEW_WIDTH,
                DEFAULT_MAX_PREVIEW_WIDTH.to_string(),
                "Preview bounding box width in pixels",
            ),
            (
                MAX_PREVIEW_HEIGHT,
                DEFAULT_MAX_PREVIEW_HEIGHT.to_string(),
                "Preview bounding box height in pixels",
            ),
            (
                THRESHOLD,
                DEFAULT_THRESHOLD.to_string(),
                "Luma at or above this value is light (0-255)",
            ),
            (
                POLARITY,
                "dark_is_one".to_string(),
                "Bit mapping: 'dark_is_one' or 'light_is_one'",
            ),
            (DITHER, "false".to_string(), "Use Floyd-Steinberg dithering"),
            (
                PREVIEW_DIR,
                String::new(),
                "Directory for preview PNGs (empty disables previews)",
            ),
        ];
        defs.into_iter()
            .map(|(key, default, description)| SettingDef {
                key,
                default,
                description,
            })
            .collect()
    });

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS
        .iter()
        .find(|d| d.key == key)
        .map(|d| d.default.as_str())
}
