//! Bit packing and array-literal serialization.
//!
//! Layout: row-major, MSB-first. The leftmost pixel of a row lands in bit 7
//! of that row's first byte, and every row is padded with zero bits up to a
//! whole byte, so a row takes `ceil(W / 8)` bytes.
//!
//! Text form: `{`, one line per row with each byte as `0x` plus lowercase
//! hex without zero padding, then `};`. Every byte but the last one of the
//! whole raster is followed by a comma.

use std::fmt;

use tracing::debug;

use crate::binarize::BinaryRaster;

/// Number of bytes a packed row of `width` pixels occupies.
pub fn row_byte_width(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

/// Pack one row of 0/1 pixels into bytes, MSB first.
fn pack_row(row: &[u8]) -> impl Iterator<Item = u8> + '_ {
    row.chunks(8).map(|chunk| {
        let mut byte_val: u8 = 0;
        for (bit, &px) in chunk.iter().enumerate() {
            if px != 0 {
                byte_val |= 0x80 >> bit;
            }
        }
        byte_val
    })
}

/// Packed, row-padded form of a [`BinaryRaster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBitmap {
    height: u32,
    row_bytes: usize,
    bytes: Vec<u8>,
}

impl PackedBitmap {
    pub fn from_raster(raster: &BinaryRaster) -> Self {
        let (width, height) = raster.dimensions();
        let row_bytes = row_byte_width(width);
        let mut bytes = Vec::with_capacity(row_bytes * height as usize);
        for row in raster.rows() {
            bytes.extend(pack_row(row));
        }
        debug!(width, height, row_bytes, total = bytes.len(), "Packed raster");

        Self {
            height,
            row_bytes,
            bytes,
        }
    }

    /// Bytes per packed row.
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Raw packed bytes, `row_bytes * height` of them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Packed rows. Yields nothing when the bitmap holds no bytes.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes.chunks(self.row_bytes.max(1))
    }

    /// Render as an array-initializer literal.
    pub fn to_code_text(&self) -> CodeText {
        let total = self.bytes.len();
        let mut out = String::with_capacity(4 + total * 5 + self.height as usize);
        out.push_str("{\n");

        let mut written = 0;
        for row in self.rows() {
            for byte in row {
                written += 1;
                out.push_str(&format!("0x{byte:x}"));
                if written != total {
                    out.push(',');
                }
            }
            out.push('\n');
        }

        out.push_str("};\n");
        CodeText(out)
    }
}

/// The rendered array literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeText(String);

impl CodeText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CodeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pack `raster` and render it as an array literal.
///
/// A raster with zero width or height renders as `"{\n};\n"`.
pub fn encode(raster: &BinaryRaster) -> CodeText {
    PackedBitmap::from_raster(raster).to_code_text()
}
