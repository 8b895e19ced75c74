//! Bitmap encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_bmp, rotate_clockwise, encode_bmp } from '@bmpturn/wasm';
//!
//! const rotated = rotate_clockwise(decode_bmp(bytes));
//! const out = encode_bmp(rotated);
//! await writable.write(new Blob([out], { type: 'image/bmp' }));
//! ```

use crate::types::JsBitmap;
use bmpturn_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a bitmap to BMP bytes.
///
/// Returns a `Uint8Array` holding the headers followed by the pixel data.
#[wasm_bindgen]
pub fn encode_bmp(bitmap: &JsBitmap) -> Vec<u8> {
    encode::encode_bmp(bitmap.as_bitmap())
}
