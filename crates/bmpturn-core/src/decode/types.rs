//! Core types for bitmap decoding.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::header::HEADER_LEN;

/// Error types for bitmap decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input file could not be opened or read.
    #[error("Unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stream ends before the header or the pixel data is complete.
    #[error("Truncated bitmap: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The first two bytes are not the "BM" signature.
    #[error("Not a BMP file: signature {0:02X?}")]
    InvalidSignature([u8; 2]),

    /// Anything other than 24 bits per pixel.
    #[error("Only 24-bit bitmaps are supported, got {0} bits per pixel")]
    UnsupportedBitDepth(u16),

    /// Anything other than uncompressed (BI_RGB) pixel data.
    #[error("Only uncompressed bitmaps are supported, got compression method {0}")]
    UnsupportedCompression(u32),

    /// Color plane count other than 1.
    #[error("Unsupported color plane count: {0}")]
    UnsupportedPlanes(u16),

    /// Width must be positive and height non-zero.
    #[error("Invalid dimensions: width {width}, height {height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// Pixel data offset points inside the headers.
    #[error("Invalid pixel data offset: {0}")]
    InvalidDataOffset(u32),

    /// Dimensions do not fit the header's signed 32-bit fields.
    #[error("Image too large for a bitmap header: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
}

impl DecodeError {
    /// Returns true for errors caused by the content of the stream rather
    /// than by the filesystem.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, DecodeError::Io { .. })
    }
}

/// Number of bytes in one stored row of a 24-bit image, including the
/// padding up to the next 4-byte boundary.
#[inline]
pub fn row_stride(width: usize) -> usize {
    (width * 3 + 3) & !3
}

/// Header fields of a 24-bit bitmap.
///
/// Fields that the transforms never look at (`reserved*`, resolution,
/// palette counts) are kept so a decoded file can be written back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageMetadata {
    /// Total file size in bytes, as declared.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset of the pixel data from the start of the stream.
    pub data_offset: u32,
    /// Size of the info header (40 for BITMAPINFOHEADER).
    pub header_size: u32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels. Negative means rows are stored top-down.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Declared pixel data length in bytes. May be 0 for uncompressed files.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl ImageMetadata {
    /// Create headers for a 24-bit uncompressed image with pixel data
    /// directly after the headers.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            data_offset: HEADER_LEN as u32,
            header_size: 40,
            width,
            height,
            planes: 1,
            bits_per_pixel: 24,
            // 72 DPI
            x_pixels_per_meter: 2835,
            y_pixels_per_meter: 2835,
            ..Default::default()
        }
        .with_refreshed_sizes()
    }

    /// Pixels per row.
    #[inline]
    pub fn columns(&self) -> usize {
        self.width.max(0) as usize
    }

    /// Number of stored rows, regardless of orientation.
    #[inline]
    pub fn rows(&self) -> usize {
        self.height.unsigned_abs() as usize
    }

    #[inline]
    pub fn row_stride(&self) -> usize {
        row_stride(self.columns())
    }

    /// Pixel data length implied by the dimensions (`rows * stride`).
    pub fn pixel_data_len(&self) -> usize {
        self.rows().saturating_mul(self.row_stride())
    }

    /// True when row 0 of the pixel data is the top row of the picture.
    #[inline]
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Copy with `image_size` and `file_size` recomputed from the dimensions.
    pub fn with_refreshed_sizes(mut self) -> Self {
        let image_size = u32::try_from(self.pixel_data_len()).unwrap_or(u32::MAX);
        let data_start = self.data_offset.max(HEADER_LEN as u32);
        self.image_size = image_size;
        self.file_size = data_start.saturating_add(image_size);
        self
    }
}

/// A decoded 24-bit bitmap: header fields plus the raw, row-padded pixel data.
///
/// Pixels are addressed in stored-row order. Row 0 is the first row in the
/// buffer, which is the bottom of the picture for bottom-up files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub metadata: ImageMetadata,
    /// Rows of `width * 3` bytes, each padded to `metadata.row_stride()`.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Create a Bitmap from headers and pixel data.
    pub fn new(metadata: ImageMetadata, pixels: Vec<u8>) -> Self {
        debug_assert!(
            pixels.len() >= metadata.pixel_data_len(),
            "Pixel buffer shorter than rows * stride"
        );
        Self { metadata, pixels }
    }

    /// Create a bottom-up Bitmap from an image::RgbImage.
    ///
    /// Channels are stored in BMP order (blue, green, red).
    pub fn from_rgb_image(img: &image::RgbImage) -> Result<Self, DecodeError> {
        let (w, h) = img.dimensions();
        let too_large = || DecodeError::TooLarge {
            width: w,
            height: h,
        };
        let width = i32::try_from(w).map_err(|_| too_large())?;
        let height = i32::try_from(h).map_err(|_| too_large())?;

        let metadata = ImageMetadata::new(width, height);
        if metadata.rows() == 0 || metadata.columns() == 0 {
            return Err(DecodeError::InvalidDimensions { width, height });
        }
        let stride = metadata.row_stride();
        let rows = metadata.rows();
        let mut pixels = vec![0u8; metadata.pixel_data_len()];

        for (display_y, row) in img.rows().enumerate() {
            let start = (rows - 1 - display_y) * stride;
            for (x, px) in row.enumerate() {
                let idx = start + x * 3;
                let [r, g, b] = px.0;
                pixels[idx] = b;
                pixels[idx + 1] = g;
                pixels[idx + 2] = r;
            }
        }

        Ok(Self { metadata, pixels })
    }

    /// Create a bottom-up Bitmap from tightly packed RGB bytes in display
    /// order (top row first).
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::Truncated` if `rgb` is shorter than
    /// `width * height * 3` bytes, otherwise the errors of
    /// [`Bitmap::from_rgb_image`]. Trailing bytes are ignored.
    pub fn from_rgb_bytes(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, DecodeError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or(DecodeError::TooLarge { width, height })?;
        let actual = rgb.len();
        let img = image::RgbImage::from_raw(width, height, rgb)
            .ok_or(DecodeError::Truncated { expected, actual })?;
        Self::from_rgb_image(&img)
    }

    /// Convert to an image::RgbImage in display order (top row first, RGB).
    ///
    /// Returns None for an empty bitmap, or if the dimensions do not fit or
    /// the buffer is too short.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        if self.is_empty() {
            return None;
        }
        let width = u32::try_from(self.metadata.columns()).ok()?;
        let height = u32::try_from(self.metadata.rows()).ok()?;
        if self.pixels.len() < self.metadata.pixel_data_len() {
            return None;
        }

        let rows = self.metadata.rows();
        let top_down = self.metadata.is_top_down();
        Some(image::RgbImage::from_fn(width, height, |x, y| {
            let stored_y = if top_down {
                y as usize
            } else {
                rows - 1 - y as usize
            };
            let [b, g, r] = self.pixel(x as usize, stored_y);
            image::Rgb([r, g, b])
        }))
    }

    /// Pixels per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.metadata.columns()
    }

    /// Number of stored rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.metadata.rows()
    }

    /// The three channel bytes at stored coordinates `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the pixel buffer.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = y * self.metadata.row_stride() + x * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0 || self.pixels.is_empty()
    }
}
