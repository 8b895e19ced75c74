//! Bitmap encoding for bmpturn.
//!
//! The encoder is the inverse of [`crate::decode`]: it writes the two
//! headers followed by the pixel buffer, byte for byte.
//!
//! # Examples
//!
//! ```ignore
//! use bmpturn_core::decode::{Bitmap, ImageMetadata};
//! use bmpturn_core::encode::encode_bmp;
//!
//! let meta = ImageMetadata::new(100, 100);
//! let bitmap = Bitmap::new(meta, vec![128u8; meta.pixel_data_len()]);
//! let bytes = encode_bmp(&bitmap);
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod bmp;

pub use bmp::{encode_bmp, write_bmp_file, EncodeError};
