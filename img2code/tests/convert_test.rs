// End-to-end conversion of image files on disk.
use std::path::PathBuf;

use image::{GrayImage, Luma, Rgba, RgbaImage};
use img2code::{ConvertError, load_and_convert, write_previews};
use lcd_bitmap::ConvertOptions;

/// A per-test scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("img2code-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn png_black_white_pair_encodes_to_0x80() {
    let dir = scratch_dir("pair");
    let path = dir.join("pair.png");
    let mut img = GrayImage::new(2, 1);
    img.put_pixel(0, 0, Luma([0]));
    img.put_pixel(1, 0, Luma([255]));
    img.save(&path).unwrap();

    let conversion = load_and_convert(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(conversion.code.as_str(), "{\n0x80\n};\n");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn png_all_white_row_encodes_to_single_digit() {
    let dir = scratch_dir("white");
    let path = dir.join("white.png");
    GrayImage::from_pixel(8, 1, Luma([255])).save(&path).unwrap();

    let conversion = load_and_convert(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(conversion.code.as_str(), "{\n0x0\n};\n");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn transparent_pixels_are_light() {
    let dir = scratch_dir("alpha");
    let path = dir.join("alpha.png");
    let mut img = RgbaImage::from_pixel(9, 2, Rgba([0, 0, 0, 0]));
    img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
    img.put_pixel(8, 1, Rgba([0, 0, 0, 255]));
    img.save(&path).unwrap();

    let conversion = load_and_convert(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(conversion.code.as_str(), "{\n0x80,0x0,\n0x0,0x80\n};\n");
    assert_eq!(conversion.packed.row_bytes(), 2);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn missing_file_is_a_decode_failure() {
    let path = std::env::temp_dir().join("img2code-does-not-exist.png");
    let err = load_and_convert(&path, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::DecodeFailure { .. }), "{err}");
}

#[test]
fn garbage_bytes_are_a_decode_failure() {
    let dir = scratch_dir("garbage");
    let path = dir.join("garbage.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let err = load_and_convert(&path, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, ConvertError::DecodeFailure { .. }), "{err}");

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn previews_are_written_as_png() {
    let dir = scratch_dir("previews");
    let path = dir.join("logo.png");
    GrayImage::from_fn(40, 20, |x, _| Luma([if x < 20 { 0 } else { 255 }]))
        .save(&path)
        .unwrap();

    let opts = ConvertOptions::new().with_preview_size(100, 100);
    let conversion = load_and_convert(&path, &opts).unwrap();
    let out_dir = dir.join("out");
    let written = write_previews(&conversion, &out_dir, "logo").unwrap();

    assert_eq!(
        written,
        vec![out_dir.join("logo.original.png"), out_dir.join("logo.binary.png")]
    );
    for preview in &written {
        let decoded = image::open(preview).unwrap();
        // min(5.0, 100/40, 100/20) = 2.5
        assert_eq!((decoded.width(), decoded.height()), (100, 50));
    }

    std::fs::remove_dir_all(&dir).ok();
}
