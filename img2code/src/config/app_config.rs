//! Runtime configuration loaded from an optional JSON file + environment overrides.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lcd_bitmap::{BitPolarity, ConvertOptions};

use super::defaults::{
    DEFAULT_SETTINGS, DITHER, MAX_PREVIEW_HEIGHT, MAX_PREVIEW_WIDTH, MAX_SCALE_FACTOR, POLARITY,
    PREVIEW_DIR, THRESHOLD,
};
use super::validation::validate_setting;

/// Runtime configuration for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub options: ConvertOptions,
    pub preview_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults, then `config_file`, then the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, anyhow::Error> {
        Self::load_with(config_file, |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with an explicit variable lookup.
    ///
    /// Each override is checked on its own. The combined options are not
    /// validated here, since command-line flags may still replace them.
    pub fn load_with<F>(config_file: Option<&Path>, lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let options = match config_file {
            Some(path) => read_options_file(path)?,
            None => ConvertOptions::default(),
        };
        let mut config = Self {
            options,
            preview_dir: None,
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Apply every defined setting present in `lookup`, validating each value first.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        for def in DEFAULT_SETTINGS.iter() {
            let Some(value) = lookup(def.key) else {
                continue;
            };
            validate_setting(def.key, &value)
                .map_err(|e| anyhow::anyhow!("validation error for {}: {e}", def.key))?;
            self.apply_setting(def.key, &value)?;
            tracing::debug!(key = def.key, value = %value, "Applied setting override");
        }
        Ok(())
    }

    fn apply_setting(&mut self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        let opts = &mut self.options;
        match key {
            MAX_SCALE_FACTOR => opts.max_scale_factor = value.parse()?,
            MAX_PREVIEW_WIDTH => opts.max_preview_width = value.parse()?,
            MAX_PREVIEW_HEIGHT => opts.max_preview_height = value.parse()?,
            THRESHOLD => opts.threshold = value.parse()?,
            POLARITY => {
                opts.polarity = value.parse::<BitPolarity>().map_err(anyhow::Error::msg)?
            }
            DITHER => opts.dither = value == "true",
            PREVIEW_DIR => {
                self.preview_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            _ => anyhow::bail!("unknown setting key: {key}"),
        }
        Ok(())
    }
}

fn read_options_file(path: &Path) -> Result<ConvertOptions, anyhow::Error> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let options = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    tracing::info!("Loaded configuration from {}", path.display());
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = AppConfig::load_with(None, |_| None).unwrap();
        assert_eq!(config.options, ConvertOptions::default());
        assert_eq!(config.preview_dir, None);
    }

    #[test]
    fn test_env_overrides_apply() {
        let lookup = lookup_from(&[
            (THRESHOLD, "100"),
            (POLARITY, "light_is_one"),
            (DITHER, "true"),
            (MAX_PREVIEW_WIDTH, "128"),
            (MAX_PREVIEW_HEIGHT, "64"),
            (MAX_SCALE_FACTOR, "2.5"),
            (PREVIEW_DIR, "out/previews"),
        ]);
        let config = AppConfig::load_with(None, lookup).unwrap();
        assert_eq!(config.options.threshold, 100);
        assert_eq!(config.options.polarity, BitPolarity::LightIsOne);
        assert!(config.options.dither);
        assert_eq!(config.options.max_preview_width, 128);
        assert_eq!(config.options.max_preview_height, 64);
        assert!((config.options.max_scale_factor - 2.5).abs() < f32::EPSILON);
        assert_eq!(config.preview_dir, Some(PathBuf::from("out/previews")));
    }

    #[test]
    fn test_invalid_env_value_fails() {
        let err = AppConfig::load_with(None, lookup_from(&[(THRESHOLD, "300")])).unwrap_err();
        assert!(err.to_string().contains(THRESHOLD), "{err}");
    }

    #[test]
    fn test_empty_preview_dir_disables_previews() {
        let config = AppConfig::load_with(None, lookup_from(&[(PREVIEW_DIR, "")])).unwrap();
        assert_eq!(config.preview_dir, None);
    }

    #[test]
    fn test_config_file_then_env() {
        let path = std::env::temp_dir().join(format!(
            "img2code-config-test-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "threshold": 90, "polarity": "light_is_one" }"#).unwrap();

        let config =
            AppConfig::load_with(Some(path.as_path()), lookup_from(&[(THRESHOLD, "200")])).unwrap();
        std::fs::remove_file(&path).ok();

        // Env wins over the file; unspecified fields keep their defaults.
        assert_eq!(config.options.threshold, 200);
        assert_eq!(config.options.polarity, BitPolarity::LightIsOne);
        assert_eq!(config.options.max_preview_width, 500);
    }

    #[test]
    fn test_file_envelope_is_checked_after_all_layers() {
        let path = std::env::temp_dir().join(format!(
            "img2code-config-zero-width-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "max_preview_width": 0 }"#).unwrap();

        let config = AppConfig::load_with(Some(path.as_path()), |_| None);
        std::fs::remove_file(&path).ok();

        let config = config.unwrap();
        assert_eq!(config.options.max_preview_width, 0);
        assert!(config.options.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_fails() {
        let path = Path::new("/nonexistent/img2code.json");
        assert!(AppConfig::load_with(Some(path), |_| None).is_err());
    }
}
