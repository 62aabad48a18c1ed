//! Command-line front end.
//!
//! Converts an image into a packed 1bpp array literal for LCD/OLED firmware.
//! The literal goes to stdout (or `--output`); log lines go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lcd_bitmap::BitPolarity;

use img2code::config::DEFAULT_SETTINGS;
use img2code::{AppConfig, load_and_convert, write_previews};

/// Convert an image into a monochrome bitmap array for small displays.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The image file to convert
    #[arg(required_unless_present_any = ["print_config", "list_settings"])]
    input: Option<PathBuf>,

    /// Write the code text to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the packed bytes unformatted to this file
    #[arg(long)]
    raw: Option<PathBuf>,

    /// Directory for the original and binarized preview PNGs
    #[arg(short, long)]
    preview_dir: Option<PathBuf>,

    /// JSON file with conversion options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Luma at or above this value is light (0-255)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Bit mapping: dark_is_one or light_is_one
    #[arg(long)]
    polarity: Option<BitPolarity>,

    /// Use Floyd-Steinberg dithering (`--dither false` turns it off)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    dither: Option<bool>,

    /// Preview bounding box width
    #[arg(long)]
    max_width: Option<u32>,

    /// Preview bounding box height
    #[arg(long)]
    max_height: Option<u32>,

    /// Upper bound on preview magnification
    #[arg(long)]
    max_scale: Option<f32>,

    /// Print the effective options as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// List the recognised environment settings and exit
    #[arg(long)]
    list_settings: bool,
}

impl Args {
    /// Command-line flags take precedence over file and environment settings.
    fn apply(&self, config: &mut AppConfig) {
        let opts = &mut config.options;
        if let Some(v) = self.threshold {
            opts.threshold = v;
        }
        if let Some(v) = self.polarity {
            opts.polarity = v;
        }
        if let Some(v) = self.dither {
            opts.dither = v;
        }
        if let Some(v) = self.max_width {
            opts.max_preview_width = v;
        }
        if let Some(v) = self.max_height {
            opts.max_preview_height = v;
        }
        if let Some(v) = self.max_scale {
            opts.max_scale_factor = v;
        }
        if let Some(dir) = &self.preview_dir {
            config.preview_dir = Some(dir.clone());
        }
    }
}

fn main() -> anyhow::Result<()> {
    img2code::init_tracing();
    img2code::load_dotenv();

    let args = Args::parse();

    if args.list_settings {
        for def in DEFAULT_SETTINGS.iter() {
            println!("{:<30} {:<14} {}", def.key, def.default, def.description);
        }
        return Ok(());
    }

    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.options.validate()?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config.options)?);
        return Ok(());
    }

    let input = args
        .input
        .as_deref()
        .context("an input image is required")?;
    let conversion = load_and_convert(input, &config.options)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, conversion.code.as_str())
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote code text to {}", path.display());
        }
        None => print!("{}", conversion.code),
    }

    if let Some(path) = &args.raw {
        std::fs::write(path, conversion.packed.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(
            bytes = conversion.packed.as_bytes().len(),
            "Wrote raw bitmap to {}",
            path.display()
        );
    }

    if let Some(dir) = &config.preview_dir {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let written = write_previews(&conversion, dir, stem)?;
        if written.is_empty() {
            tracing::warn!("No previews written for an empty image");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use img2code::config::defaults::{MAX_PREVIEW_WIDTH, POLARITY, THRESHOLD};

    fn write_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("img2code-{name}-{}.json", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn flags_override_file_and_env() {
        let path = write_config("cli-precedence", r#"{ "threshold": 90, "dither": false }"#);
        let env = |key: &str| match key {
            THRESHOLD => Some("200".to_string()),
            POLARITY => Some("dark_is_one".to_string()),
            MAX_PREVIEW_WIDTH => Some("64".to_string()),
            _ => None,
        };
        let config = AppConfig::load_with(Some(path.as_path()), env);
        std::fs::remove_file(&path).ok();
        let mut config = config.unwrap();
        assert_eq!(config.options.threshold, 200);

        let args = Args::try_parse_from([
            "img2code",
            "in.png",
            "--threshold",
            "42",
            "--polarity",
            "light_is_one",
            "--max-width",
            "100",
            "--preview-dir",
            "out",
            "--dither",
        ])
        .unwrap();
        args.apply(&mut config);

        assert_eq!(config.options.threshold, 42);
        assert_eq!(config.options.polarity, BitPolarity::LightIsOne);
        assert_eq!(config.options.max_preview_width, 100);
        assert!(config.options.dither);
        assert_eq!(config.preview_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn flag_replaces_invalid_file_envelope() {
        let path = write_config("cli-zero-width", r#"{ "max_preview_width": 0 }"#);
        let config = AppConfig::load_with(Some(path.as_path()), |_| None);
        std::fs::remove_file(&path).ok();
        let mut config = config.unwrap();
        assert!(config.options.validate().is_err());

        let args = Args::try_parse_from(["img2code", "in.png", "--max-width", "100"]).unwrap();
        args.apply(&mut config);
        assert_eq!(config.options.max_preview_width, 100);
        assert!(config.options.validate().is_ok());
    }

    #[test]
    fn absent_flags_leave_config_untouched() {
        let mut config = AppConfig::default();
        config.options.threshold = 77;
        let before = config.clone();

        let args = Args::try_parse_from(["img2code", "in.png"]).unwrap();
        args.apply(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn dither_accepts_explicit_false() {
        let mut config = AppConfig::default();
        config.options.dither = true;

        let args = Args::try_parse_from(["img2code", "in.png", "--dither", "false"]).unwrap();
        args.apply(&mut config);
        assert!(!config.options.dither);
    }

    #[test]
    fn input_is_optional_only_for_informational_flags() {
        assert!(Args::try_parse_from(["img2code"]).is_err());
        assert!(Args::try_parse_from(["img2code", "--print-config"]).is_ok());
        assert!(Args::try_parse_from(["img2code", "--list-settings"]).is_ok());
    }
}
