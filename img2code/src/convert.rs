//! Conversion pipeline: decode, binarize, encode, and build previews.
//!
//! The code text is always produced from the full-resolution image; the
//! previews are scaled copies of the original and of the binarized raster.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageError, RgbaImage};
use lcd_bitmap::{CodeText, ConvertOptions, LcdBitmapError, PackedBitmap, scale, to_binary};

/// Errors that can occur while converting an image file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to decode {}: {source}", .path.display())]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error(transparent)]
    Bitmap(#[from] LcdBitmapError),
}

/// Everything one conversion produces.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub code: CodeText,
    pub packed: PackedBitmap,
    /// Scaled copy of the source image; `None` for a zero-size source.
    pub original_preview: Option<RgbaImage>,
    /// Scaled copy of the binarized image; `None` for a zero-size source.
    pub binary_preview: Option<GrayImage>,
}

/// Decode the image at `path` and convert it.
pub fn load_and_convert(path: &Path, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let img = image::open(path).map_err(|source| ConvertError::DecodeFailure {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        width = img.width(),
        height = img.height(),
        "Decoded {}",
        path.display()
    );
    convert_image(&img, options)
}

/// Convert an already decoded image.
pub fn convert_image(img: &DynamicImage, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    options.validate()?;

    let raster = to_binary(img, options);
    let packed = PackedBitmap::from_raster(&raster);
    let code = packed.to_code_text();

    let (original_preview, binary_preview) = if raster.is_empty() {
        tracing::warn!("Image has no pixels, skipping previews");
        (None, None)
    } else {
        let bounds = options.preview_bounds();
        let original = scale(img, &bounds)?;
        let binary = scale(&raster.to_preview_image(), &bounds)?;
        (Some(original), Some(binary))
    };

    tracing::debug!(
        bytes = packed.as_bytes().len(),
        row_bytes = packed.row_bytes(),
        "Conversion complete"
    );

    Ok(Conversion {
        code,
        packed,
        original_preview,
        binary_preview,
    })
}

/// Write both previews as PNG files named `<stem>.original.png` and
/// `<stem>.binary.png` under `dir`, creating it if needed.
///
/// Returns the paths written; empty when the conversion has no previews.
pub fn write_previews(
    conversion: &Conversion,
    dir: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>, ConvertError> {
    std::fs::create_dir_all(dir).map_err(|e| ConvertError::WriteFailure {
        path: dir.to_path_buf(),
        source: ImageError::IoError(e),
    })?;

    let mut written = Vec::new();
    if let Some(original) = &conversion.original_preview {
        let path = dir.join(format!("{stem}.original.png"));
        save_png(original, &path)?;
        written.push(path);
    }
    if let Some(binary) = &conversion.binary_preview {
        let path = dir.join(format!("{stem}.binary.png"));
        save_png(binary, &path)?;
        written.push(path);
    }
    Ok(written)
}

fn save_png<I>(img: &I, path: &Path) -> Result<(), ConvertError>
where
    I: Into<DynamicImage> + Clone,
{
    let dynamic: DynamicImage = img.clone().into();
    dynamic
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| ConvertError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!("Wrote preview {}", path.display());
    Ok(())
}
