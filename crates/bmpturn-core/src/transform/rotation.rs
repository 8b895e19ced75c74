//! Exact 90-degree rotation of row-padded 24-bit pixel data.
//!
//! Rotation is pure coordinate remapping: every pixel's three channel bytes
//! are copied verbatim, no interpolation is involved. For a source of
//! `W x H` pixels, the destination is `H x W` and its row stride is
//! recomputed from the new width:
//!
//! ```text
//! clockwise:          (x, y) -> (H - 1 - y, x)
//! counter-clockwise:  (x, y) -> (y, W - 1 - x)
//! ```
//!
//! Coordinates are in stored-row order (row 0 is the first row in the
//! buffer), so for bottom-up files the visual direction is mirrored.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decode::{Bitmap, ImageMetadata};

/// Direction of a quarter turn.
///
/// Serialized as `"clockwise"` or `"counter_clockwise"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// The direction that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Headers for a quarter-turned image.
///
/// Width and height are swapped; every other field is copied unchanged,
/// including `image_size` and `file_size`. A top-down source stays top-down:
/// the new width is `|height|` and the new height carries the old sign.
pub fn rotated_metadata(metadata: &ImageMetadata) -> ImageMetadata {
    let mut rotated = *metadata;
    rotated.width = metadata.height.saturating_abs();
    rotated.height = if metadata.is_top_down() {
        -metadata.width
    } else {
        metadata.width
    };
    rotated
}

/// Rotate a bitmap 90 degrees clockwise.
pub fn rotate_clockwise(bitmap: &Bitmap) -> Bitmap {
    rotate_90(bitmap, RotationDirection::Clockwise)
}

/// Rotate a bitmap 90 degrees counter-clockwise.
pub fn rotate_counter_clockwise(bitmap: &Bitmap) -> Bitmap {
    rotate_90(bitmap, RotationDirection::CounterClockwise)
}

/// Rotate a bitmap by a quarter turn.
///
/// The output buffer is `new_rows * new_stride` bytes and starts zeroed, so
/// the padding at the end of every destination row is always 0.
///
/// # Panics
///
/// Panics if `bitmap.pixels` is shorter than `rows * stride`.
pub fn rotate_90(bitmap: &Bitmap, direction: RotationDirection) -> Bitmap {
    let src_w = bitmap.metadata.columns();
    let src_h = bitmap.metadata.rows();
    let src_stride = bitmap.metadata.row_stride();

    let metadata = rotated_metadata(&bitmap.metadata);
    let dst_stride = metadata.row_stride();
    let mut output = vec![0u8; metadata.pixel_data_len()];

    for y in 0..src_h {
        let row_start = y * src_stride;
        let row = &bitmap.pixels[row_start..row_start + src_w * 3];

        for (x, pixel) in row.chunks_exact(3).enumerate() {
            let (dst_x, dst_y) = match direction {
                RotationDirection::Clockwise => (src_h - 1 - y, x),
                RotationDirection::CounterClockwise => (y, src_w - 1 - x),
            };
            let dst_idx = dst_y * dst_stride + dst_x * 3;
            output[dst_idx..dst_idx + 3].copy_from_slice(pixel);
        }
    }

    debug!(
        ?direction,
        src_w,
        src_h,
        dst_stride,
        "Rotated bitmap 90 degrees"
    );
    Bitmap::new(metadata, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
