//! Bitmap decoding for bmpturn.
//!
//! This module provides functionality for:
//! - Validating and parsing the BMP file header and BITMAPINFOHEADER
//! - Reading row-padded 24-bit pixel data from the declared offset
//!
//! Only uncompressed 24-bit bitmaps are accepted. Palette images, RLE or
//! bitfield compression, and other bit depths fail with a format error
//! instead of being converted.
//!
//! # Examples
//!
//! ```ignore
//! use bmpturn_core::decode::decode_bmp;
//!
//! let bytes = std::fs::read("input.bmp").unwrap();
//! let bitmap = decode_bmp(&bytes).unwrap();
//! println!("Decoded {}x{} bitmap", bitmap.width(), bitmap.height());
//! ```

mod bmp;
mod types;

pub use bmp::{decode_bmp, decode_bmp_file, read_metadata};
pub use types::{row_stride, Bitmap, DecodeError, ImageMetadata};
