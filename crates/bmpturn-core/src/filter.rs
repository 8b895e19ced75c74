//! 3x3 Gaussian smoothing of row-padded 24-bit pixel data.
//!
//! The kernel is the binomial approximation of a Gaussian:
//!
//! ```text
//! 1 2 1
//! 2 4 2   / 16
//! 1 2 1
//! ```
//!
//! Each channel is filtered independently. Only interior pixels are
//! computed; the outermost rows and columns of the output stay 0.

use tracing::debug;

use crate::decode::Bitmap;

/// Kernel weights, row-major. They sum to 16.
pub const GAUSSIAN_KERNEL: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];

/// log2 of the kernel sum.
const KERNEL_SHIFT: u32 = 4;

/// Apply the 3x3 Gaussian kernel to every interior pixel.
///
/// The result has the same metadata and buffer length as the input. Border
/// pixels (`x == 0`, `y == 0`, `x == width - 1`, `y == height - 1`) and row
/// padding are 0. Images narrower or shorter than 3 pixels have no interior
/// and come back all zero.
///
/// Values are truncated, not rounded: the weighted sum is divided by 16 with
/// a right shift. Every weight is a power-of-two fraction of 16, so this is
/// identical to summing in floating point and truncating.
///
/// # Panics
///
/// Panics if `bitmap.pixels` is shorter than `rows * stride`.
pub fn smooth(bitmap: &Bitmap) -> Bitmap {
    let width = bitmap.metadata.columns();
    let height = bitmap.metadata.rows();
    let stride = bitmap.metadata.row_stride();
    let src = &bitmap.pixels;

    let mut output = vec![0u8; src.len()];

    if width >= 3 && height >= 3 {
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let dst_idx = y * stride + x * 3;
                for c in 0..3 {
                    let mut sum = 0u32;
                    for (ky, weights) in GAUSSIAN_KERNEL.iter().enumerate() {
                        let row_start = (y + ky - 1) * stride;
                        for (kx, weight) in weights.iter().enumerate() {
                            let idx = row_start + (x + kx - 1) * 3 + c;
                            sum += weight * u32::from(src[idx]);
                        }
                    }
                    output[dst_idx + c] = (sum >> KERNEL_SHIFT).min(255) as u8;
                }
            }
        }
    }

    debug!(width, height, stride, "Applied 3x3 Gaussian filter");
    Bitmap::new(bitmap.metadata, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
