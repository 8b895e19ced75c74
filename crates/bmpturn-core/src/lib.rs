//! bmpturn Core - 24-bit bitmap processing library
//!
//! This crate decodes uncompressed 24-bit BMP files, rotates them by exact
//! quarter turns, smooths them with a 3x3 Gaussian kernel, and encodes the
//! result back to BMP.
//!
//! # Module Structure
//!
//! - `decode` - Header validation and pixel data extraction
//! - `encode` - Byte-exact serialization, inverse of `decode`
//! - `transform` - Clockwise and counter-clockwise 90-degree rotation
//! - `filter` - 3x3 Gaussian smoothing with a zero border
//! - `pipeline` - Decode once, rotate both ways, smooth both, write four files
//!
//! All transforms are pure: they borrow their input and return a freshly
//! allocated `Bitmap`.

pub mod decode;
pub mod encode;
pub mod filter;
mod header;
pub mod pipeline;
pub mod transform;

pub use decode::{decode_bmp, decode_bmp_file, Bitmap, DecodeError, ImageMetadata};
pub use encode::{encode_bmp, write_bmp_file, EncodeError};
pub use filter::smooth;
pub use header::{FILE_HEADER_LEN, HEADER_LEN, INFO_HEADER_LEN};
pub use pipeline::{process_file, run_pipeline, PipelineConfig, PipelineError, PipelineOutputs};
pub use transform::{rotate_90, rotate_clockwise, rotate_counter_clockwise, RotationDirection};

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x4 top-down image, every pixel (200, 100, 50).
    fn uniform_4x4() -> Bitmap {
        let meta = ImageMetadata::new(4, -4);
        let mut pixels = vec![0u8; meta.pixel_data_len()];
        for px in pixels.chunks_exact_mut(3) {
            px.copy_from_slice(&[200, 100, 50]);
        }
        Bitmap::new(meta, pixels)
    }

    #[test]
    fn test_full_round_trip_through_bytes() {
        let bytes = encode_bmp(&uniform_4x4());
        let decoded = decode_bmp(&bytes).unwrap();

        let rotated = rotate_clockwise(&decoded);
        assert_eq!(rotated.pixel(3, 0), [200, 100, 50]);

        let smoothed = smooth(&rotated);
        assert_eq!(smoothed.pixel(1, 1), [200, 100, 50]);
        assert_eq!(smoothed.pixel(0, 0), [0, 0, 0]);

        let reread = decode_bmp(&encode_bmp(&smoothed)).unwrap();
        assert_eq!(reread, smoothed);
    }

    #[test]
    fn test_header_lengths() {
        assert_eq!(FILE_HEADER_LEN, 14);
        assert_eq!(INFO_HEADER_LEN, 40);
        assert_eq!(HEADER_LEN, 54);
    }

    #[test]
    fn test_bitmap_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Bitmap>();
    }
}
