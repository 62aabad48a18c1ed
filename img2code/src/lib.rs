//! Image to LCD bitmap converter.
//!
//! Decodes an image file, converts it with [`lcd_bitmap`] and produces the
//! array-literal code text plus scaled previews of the original and the
//! binarized image.

pub mod bootstrap;
pub mod config;
pub mod convert;

pub use bootstrap::{init_tracing, load_dotenv};
pub use config::AppConfig;
pub use convert::{Conversion, ConvertError, convert_image, load_and_convert, write_previews};
