//! Uncompressed 24-bit BMP decoding.

use std::path::Path;

use tracing::{debug, warn};

use super::{Bitmap, DecodeError, ImageMetadata};
use crate::header::{self, HEADER_LEN, SIGNATURE};

/// Decode a 24-bit uncompressed BMP from bytes.
///
/// The pixel data length is derived from the dimensions
/// (`|height| * row_stride`) rather than taken from the declared
/// `image_size`, which many writers leave at 0.
///
/// # Errors
///
/// Returns `DecodeError::Truncated` if the stream is shorter than the headers
/// or the pixel data they describe, `DecodeError::InvalidSignature` if it does
/// not start with "BM", `UnsupportedBitDepth` / `UnsupportedCompression`
/// for anything but 24-bit BI_RGB data, and `TooLarge` if the pixel data
/// would not fit the header's 32-bit size fields.
pub fn decode_bmp(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let metadata = read_metadata(bytes)?;

    let expected = metadata.pixel_data_len();
    if metadata.image_size != 0 && metadata.image_size as usize != expected {
        warn!(
            declared = metadata.image_size,
            derived = expected,
            "Declared image size disagrees with dimensions, using derived size"
        );
    }

    let start = metadata.data_offset as usize;
    let end = start.saturating_add(expected);
    let data = bytes.get(start..end).ok_or(DecodeError::Truncated {
        expected: end,
        actual: bytes.len(),
    })?;

    debug!(
        width = metadata.width,
        height = metadata.height,
        stride = metadata.row_stride(),
        "Decoded bitmap"
    );
    Ok(Bitmap::new(metadata, data.to_vec()))
}

/// Read and validate the headers without touching the pixel data.
///
/// # Errors
///
/// Same format errors as [`decode_bmp`], except for pixel data truncation.
pub fn read_metadata(bytes: &[u8]) -> Result<ImageMetadata, DecodeError> {
    if bytes.len() < HEADER_LEN {
        return Err(DecodeError::Truncated {
            expected: HEADER_LEN,
            actual: bytes.len(),
        });
    }

    let signature = [bytes[0], bytes[1]];
    if signature != SIGNATURE {
        return Err(DecodeError::InvalidSignature(signature));
    }

    let metadata = header::read_metadata(bytes);

    if metadata.bits_per_pixel != 24 {
        return Err(DecodeError::UnsupportedBitDepth(metadata.bits_per_pixel));
    }
    if metadata.compression != 0 {
        return Err(DecodeError::UnsupportedCompression(metadata.compression));
    }
    if metadata.planes != 1 {
        return Err(DecodeError::UnsupportedPlanes(metadata.planes));
    }
    if metadata.width <= 0 || metadata.height == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: metadata.width,
            height: metadata.height,
        });
    }
    if (metadata.data_offset as usize) < HEADER_LEN {
        return Err(DecodeError::InvalidDataOffset(metadata.data_offset));
    }

    // Both the upright and the quarter-turned layout must fit the 32-bit
    // size fields, and therefore `usize` on every target.
    let (columns, rows) = (metadata.columns(), metadata.rows());
    let fits = checked_data_len(columns, rows)
        .zip(checked_data_len(rows, columns))
        .and_then(|(upright, turned)| metadata.data_offset.checked_add(upright.max(turned)));
    if fits.is_none() {
        return Err(DecodeError::TooLarge {
            width: metadata.width.unsigned_abs(),
            height: metadata.height.unsigned_abs(),
        });
    }

    Ok(metadata)
}

/// `rows * row_stride(columns)`, if it fits in a `u32`.
fn checked_data_len(columns: usize, rows: usize) -> Option<u32> {
    let stride = columns.checked_mul(3)?.checked_add(3)? & !3;
    u32::try_from(stride.checked_mul(rows)?).ok()
}

/// Read and decode a BMP file.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be read, otherwise the same
/// errors as [`decode_bmp`].
pub fn decode_bmp_file(path: impl AsRef<Path>) -> Result<Bitmap, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), len = bytes.len(), "Read bitmap file");
    decode_bmp(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a BMP stream by hand, independent of the encoder.
    fn bmp_bytes(width: i32, height: i32, bits: u16, compression: u32) -> Vec<u8> {
        let stride = ((width.unsigned_abs() as usize) * 3 + 3) & !3;
        let data_len = stride * height.unsigned_abs() as usize;

        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&((54 + data_len) as u32).to_le_bytes());
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&54u32.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bits.to_le_bytes());
        out.extend_from_slice(&compression.to_le_bytes());
        out.extend_from_slice(&(data_len as u32).to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&2835i32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend((0..data_len).map(|i| (i % 251) as u8));
        out
    }

    #[test]
    fn test_decode_valid() {
        let bytes = bmp_bytes(3, 2, 24, 0);
        let bmp = decode_bmp(&bytes).unwrap();

        assert_eq!(bmp.metadata.width, 3);
        assert_eq!(bmp.metadata.height, 2);
        assert_eq!(bmp.metadata.bits_per_pixel, 24);
        assert_eq!(bmp.metadata.data_offset, 54);
        assert_eq!(bmp.metadata.x_pixels_per_meter, 2835);
        assert_eq!(bmp.pixels.len(), 2 * 12);
        assert_eq!(&bmp.pixels[..], &bytes[54..]);
    }

    #[test]
    fn test_decode_top_down() {
        let bytes = bmp_bytes(2, -3, 24, 0);
        let bmp = decode_bmp(&bytes).unwrap();

        assert!(bmp.metadata.is_top_down());
        assert_eq!(bmp.height(), 3);
        assert_eq!(bmp.pixels.len(), 3 * 8);
    }

    #[test]
    fn test_rejects_short_header() {
        let bytes = bmp_bytes(2, 2, 24, 0);
        let result = decode_bmp(&bytes[..53]);
        assert!(matches!(
            result,
            Err(DecodeError::Truncated {
                expected: 54,
                actual: 53
            })
        ));
    }

    #[test]
    fn test_rejects_empty_input() {
        assert!(matches!(
            decode_bmp(&[]),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_signature() {
        let mut bytes = bmp_bytes(2, 2, 24, 0);
        bytes[0] = b'P';
        bytes[1] = b'N';
        let err = decode_bmp(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidSignature([b'P', b'N'])));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_rejects_8_bit() {
        let bytes = bmp_bytes(2, 2, 8, 0);
        assert!(matches!(
            decode_bmp(&bytes),
            Err(DecodeError::UnsupportedBitDepth(8))
        ));
    }

    #[test]
    fn test_rejects_32_bit() {
        let bytes = bmp_bytes(2, 2, 32, 0);
        assert!(matches!(
            decode_bmp(&bytes),
            Err(DecodeError::UnsupportedBitDepth(32))
        ));
    }

    #[test]
    fn test_rejects_compression() {
        // BI_RLE8
        let bytes = bmp_bytes(2, 2, 24, 1);
        assert!(matches!(
            decode_bmp(&bytes),
            Err(DecodeError::UnsupportedCompression(1))
        ));

        // BI_BITFIELDS
        let bytes = bmp_bytes(2, 2, 24, 3);
        assert!(matches!(
            decode_bmp(&bytes),
            Err(DecodeError::UnsupportedCompression(3))
        ));
    }

    #[test]
    fn test_rejects_zero_height() {
        let bytes = bmp_bytes(2, 0, 24, 0);
        assert!(matches!(
            decode_bmp(&bytes),
            Err(DecodeError::InvalidDimensions {
                width: 2,
                height: 0
            })
        ));
    }

    #[test]
    fn test_rejects_negative_width() {
        let mut bytes = bmp_bytes(2, 2, 24, 0);
        bytes[18..22].copy_from_slice(&(-2i32).to_le_bytes());
        assert!(matches!(
            decode_bmp(&bytes),
            Err(DecodeError::InvalidDimensions { width: -2, .. })
        ));
    }

    #[test]
    fn test_rejects_planes() {
        let mut bytes = bmp_bytes(2, 2, 24, 0);
        bytes[26..28].copy_from_slice(&2u16.to_le_bytes());
        assert!(matches!(
            decode_bmp(&bytes),
            Err(DecodeError::UnsupportedPlanes(2))
        ));
    }

    #[test]
    fn test_rejects_offset_inside_headers() {
        let mut bytes = bmp_bytes(2, 2, 24, 0);
        bytes[10..14].copy_from_slice(&14u32.to_le_bytes());
        assert!(matches!(
            decode_bmp(&bytes),
            Err(DecodeError::InvalidDataOffset(14))
        ));
    }

    #[test]
    fn test_rejects_truncated_pixel_data() {
        let bytes = bmp_bytes(4, 4, 24, 0);
        let result = decode_bmp(&bytes[..bytes.len() - 1]);
        assert!(matches!(
            result,
            Err(DecodeError::Truncated { expected, actual })
                if expected == 54 + 48 && actual == 54 + 47
        ));
    }

    #[test]
    fn test_rejects_width_that_overflows_stride() {
        // width * 3 wraps to 2 in 32-bit arithmetic
        let mut bytes = bmp_bytes(1, 1, 24, 0);
        bytes[18..22].copy_from_slice(&0x5555_5556i32.to_le_bytes());
        assert!(matches!(
            decode_bmp(&bytes),
            Err(DecodeError::TooLarge {
                width: 0x5555_5556,
                height: 1
            })
        ));

        bytes[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
        let err = read_metadata(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::TooLarge { .. }));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_rejects_dimensions_too_large_once_rotated() {
        // 3.6e9 bytes upright, but 4.8e9 bytes after a quarter turn
        let mut bytes = bmp_bytes(1, 1, 24, 0);
        bytes[18..22].copy_from_slice(&1_200_000_000i32.to_le_bytes());
        assert!(matches!(
            read_metadata(&bytes),
            Err(DecodeError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_rejects_height_at_i32_min() {
        let mut bytes = bmp_bytes(1, 1, 24, 0);
        bytes[22..26].copy_from_slice(&i32::MIN.to_le_bytes());
        assert!(matches!(
            read_metadata(&bytes),
            Err(DecodeError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_checked_data_len() {
        assert_eq!(checked_data_len(3, 2), Some(24));
        assert_eq!(checked_data_len(5, 0), Some(0));
        assert_eq!(checked_data_len(usize::MAX / 2, 1), None);
        assert_eq!(checked_data_len(1_000_000, 2000), None);
    }

    #[test]
    fn test_zero_image_size_uses_dimensions() {
        let mut bytes = bmp_bytes(5, 3, 24, 0);
        bytes[34..38].copy_from_slice(&0u32.to_le_bytes());

        let bmp = decode_bmp(&bytes).unwrap();
        assert_eq!(bmp.metadata.image_size, 0);
        assert_eq!(bmp.pixels.len(), 3 * 16);
    }

    #[test]
    fn test_garbage_image_size_uses_dimensions() {
        let mut bytes = bmp_bytes(2, 2, 24, 0);
        bytes[34..38].copy_from_slice(&u32::MAX.to_le_bytes());

        let bmp = decode_bmp(&bytes).unwrap();
        assert_eq!(bmp.pixels.len(), 2 * 8);
    }

    #[test]
    fn test_pixel_data_at_declared_offset() {
        let mut bytes = bmp_bytes(1, 1, 24, 0);
        // Move pixel data 4 bytes further out
        bytes.splice(54..54, [0xEE; 4]);
        bytes[10..14].copy_from_slice(&58u32.to_le_bytes());

        let bmp = decode_bmp(&bytes).unwrap();
        assert_eq!(bmp.metadata.data_offset, 58);
        assert_eq!(bmp.pixels, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let mut bytes = bmp_bytes(1, 1, 24, 0);
        bytes.extend_from_slice(&[9, 9]);

        let bmp = decode_bmp(&bytes).unwrap();
        assert_eq!(bmp.pixels.len(), 4);
    }

    #[test]
    fn test_read_metadata_only() {
        let bytes = bmp_bytes(6, 2, 24, 0);
        let meta = read_metadata(&bytes[..54]).unwrap();
        assert_eq!(meta.width, 6);
        assert_eq!(meta.row_stride(), 20);
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode_bmp_file("/nonexistent/bmpturn/input.bmp");
        let err = result.unwrap_err();
        assert!(matches!(err, DecodeError::Io { .. }));
        assert!(!err.is_format_error());
    }
}
