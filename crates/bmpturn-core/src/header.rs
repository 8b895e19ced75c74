//! Byte layout of the BMP file header and the BITMAPINFOHEADER.
//!
//! Both headers are packed little-endian structures. Fields are read and
//! written at explicit offsets:
//!
//! ```text
//! offset  size  field
//!      0     2  signature ("BM")
//!      2     4  file size
//!      6     2  reserved1
//!      8     2  reserved2
//!     10     4  pixel data offset
//!     14     4  info header size
//!     18     4  width (signed)
//!     22     4  height (signed, negative = top-down)
//!     26     2  color planes
//!     28     2  bits per pixel
//!     30     4  compression
//!     34     4  image size
//!     38     4  horizontal resolution (signed)
//!     42     4  vertical resolution (signed)
//!     46     4  colors used
//!     50     4  important colors
//! ```

use crate::decode::ImageMetadata;

/// Size of the file header.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of the BITMAPINFOHEADER.
pub const INFO_HEADER_LEN: usize = 40;
/// Combined size of both headers; the smallest valid pixel data offset.
pub const HEADER_LEN: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;
/// "BM"
pub const SIGNATURE: [u8; 2] = *b"BM";

/// Parse both headers. The caller guarantees `bytes.len() >= HEADER_LEN`.
pub(crate) fn read_metadata(bytes: &[u8]) -> ImageMetadata {
    debug_assert!(bytes.len() >= HEADER_LEN);
    ImageMetadata {
        file_size: read_u32_le(bytes, 2),
        reserved1: read_u16_le(bytes, 6),
        reserved2: read_u16_le(bytes, 8),
        data_offset: read_u32_le(bytes, 10),
        header_size: read_u32_le(bytes, 14),
        width: read_i32_le(bytes, 18),
        height: read_i32_le(bytes, 22),
        planes: read_u16_le(bytes, 26),
        bits_per_pixel: read_u16_le(bytes, 28),
        compression: read_u32_le(bytes, 30),
        image_size: read_u32_le(bytes, 34),
        x_pixels_per_meter: read_i32_le(bytes, 38),
        y_pixels_per_meter: read_i32_le(bytes, 42),
        colors_used: read_u32_le(bytes, 46),
        important_colors: read_u32_le(bytes, 50),
    }
}

/// Append both headers (exactly `HEADER_LEN` bytes) to `out`.
pub(crate) fn write_headers(meta: &ImageMetadata, out: &mut Vec<u8>) {
    out.extend_from_slice(&SIGNATURE);
    out.extend_from_slice(&meta.file_size.to_le_bytes());
    out.extend_from_slice(&meta.reserved1.to_le_bytes());
    out.extend_from_slice(&meta.reserved2.to_le_bytes());
    out.extend_from_slice(&meta.data_offset.to_le_bytes());

    out.extend_from_slice(&meta.header_size.to_le_bytes());
    out.extend_from_slice(&meta.width.to_le_bytes());
    out.extend_from_slice(&meta.height.to_le_bytes());
    out.extend_from_slice(&meta.planes.to_le_bytes());
    out.extend_from_slice(&meta.bits_per_pixel.to_le_bytes());
    out.extend_from_slice(&meta.compression.to_le_bytes());
    out.extend_from_slice(&meta.image_size.to_le_bytes());
    out.extend_from_slice(&meta.x_pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&meta.y_pixels_per_meter.to_le_bytes());
    out.extend_from_slice(&meta.colors_used.to_le_bytes());
    out.extend_from_slice(&meta.important_colors.to_le_bytes());
}

#[inline]
fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn read_i32_le(bytes: &[u8], offset: usize) -> i32 {
    read_u32_le(bytes, offset) as i32
}
