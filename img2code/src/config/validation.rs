//! Setting value validation.

use lcd_bitmap::BitPolarity;

use super::defaults::{
    DITHER, MAX_PREVIEW_HEIGHT, MAX_PREVIEW_WIDTH, MAX_SCALE_FACTOR, POLARITY, PREVIEW_DIR,
    THRESHOLD,
};

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        MAX_SCALE_FACTOR => {
            let v: f32 = value.parse().map_err(|_| "must be a float")?;
            if !v.is_finite() || v <= 0.0 {
                return Err("must be a finite number greater than 0".into());
            }
        }
        MAX_PREVIEW_WIDTH | MAX_PREVIEW_HEIGHT => {
            let v: u32 = value.parse().map_err(|_| "must be a non-negative integer")?;
            if v == 0 {
                return Err("must be at least 1".into());
            }
        }
        THRESHOLD => validate_int_range(value, 0, 255)?,
        POLARITY => {
            value.parse::<BitPolarity>()?;
        }
        DITHER => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        PREVIEW_DIR => {}
        _ => return Err(format!("unknown setting key: {key}")),
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i32, max: i32) -> Result<(), String> {
    let v: i32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
