//! Bitmap decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_bmp } from '@bmpturn/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const bitmap = decode_bmp(bytes);
//! console.log(`Decoded ${bitmap.width}x${bitmap.height}`);
//! ```

use crate::types::JsBitmap;
use bmpturn_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a 24-bit uncompressed BMP from bytes.
///
/// # Errors
///
/// Returns an error string if:
/// - The bytes are shorter than the 54-byte headers or the pixel data
/// - The signature is not "BM"
/// - The bitmap is not 24-bit or is compressed
#[wasm_bindgen]
pub fn decode_bmp(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_bmp(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check whether bytes start with a supported 24-bit uncompressed header.
///
/// Only the 54 header bytes are examined; the pixel data is not checked.
#[wasm_bindgen]
pub fn is_supported_bmp(bytes: &[u8]) -> bool {
    decode::read_metadata(bytes).is_ok()
}
