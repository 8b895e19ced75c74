//! WASM bindings for rotation and smoothing.
//!
//! Each function borrows its input and returns a new `JsBitmap`.

use crate::types::JsBitmap;
use bmpturn_core::filter;
use bmpturn_core::transform::{self, RotationDirection};
use wasm_bindgen::prelude::*;

/// Rotate a bitmap 90 degrees clockwise.
///
/// Width and height are swapped; the row stride is recomputed from the new
/// width.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_clockwise(bitmap);
/// console.log(rotated.width === bitmap.height); // true
/// ```
#[wasm_bindgen]
pub fn rotate_clockwise(bitmap: &JsBitmap) -> JsBitmap {
    JsBitmap::from_bitmap(transform::rotate_clockwise(bitmap.as_bitmap()))
}

/// Rotate a bitmap 90 degrees counter-clockwise.
#[wasm_bindgen]
pub fn rotate_counter_clockwise(bitmap: &JsBitmap) -> JsBitmap {
    JsBitmap::from_bitmap(transform::rotate_counter_clockwise(bitmap.as_bitmap()))
}

/// Rotate a bitmap a quarter turn in the given direction.
///
/// # Arguments
///
/// * `direction` - `"clockwise"` or `"counter_clockwise"`
///
/// # Example (TypeScript)
///
/// ```typescript
/// const turned = rotate(bitmap, 'counter_clockwise');
/// ```
#[wasm_bindgen]
pub fn rotate(bitmap: &JsBitmap, direction: JsValue) -> Result<JsBitmap, JsValue> {
    let direction: RotationDirection = serde_wasm_bindgen::from_value(direction)
        .map_err(|e| JsValue::from_str(&format!("Invalid rotation direction: {}", e)))?;
    Ok(rotate_in(bitmap, direction))
}

fn rotate_in(bitmap: &JsBitmap, direction: RotationDirection) -> JsBitmap {
    JsBitmap::from_bitmap(transform::rotate_90(bitmap.as_bitmap(), direction))
}

/// Smooth a bitmap with the 3x3 Gaussian kernel.
///
/// The outermost rows and columns of the result are black.
#[wasm_bindgen]
pub fn smooth(bitmap: &JsBitmap) -> JsBitmap {
    JsBitmap::from_bitmap(filter::smooth(bitmap.as_bitmap()))
}
