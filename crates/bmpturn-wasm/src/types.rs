//! WASM-compatible wrapper types for bitmap data.
//!
//! This module provides JavaScript-friendly types that wrap the core bmpturn types,
//! handling the conversion between Rust and JavaScript data representations.

use bmpturn_core::decode::Bitmap;
use wasm_bindgen::prelude::*;

/// A decoded 24-bit bitmap wrapper for JavaScript.
///
/// The header fields stay in WASM memory alongside the pixels, so a bitmap
/// can be rotated, smoothed and re-encoded without round-tripping its
/// metadata through JavaScript.
///
/// # Memory Management
///
/// When you call `pixels()`, a copy is made to JavaScript memory as a
/// `Uint8Array`. The `free()` method can be called to explicitly release WASM
/// memory, but this is optional as wasm-bindgen's finalizer will handle
/// cleanup automatically.
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> i32 {
        self.inner.metadata.width
    }

    /// Get the image height in pixels (negative for top-down storage)
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> i32 {
        self.inner.metadata.height
    }

    /// Get the number of bytes in one padded row
    #[wasm_bindgen(getter)]
    pub fn row_stride(&self) -> usize {
        self.inner.metadata.row_stride()
    }

    /// Get the number of bytes in the pixel buffer (rows * row_stride)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Whether row 0 of the pixel buffer is the top of the picture
    #[wasm_bindgen(getter)]
    pub fn is_top_down(&self) -> bool {
        self.inner.metadata.is_top_down()
    }

    /// Returns every header field as a plain JS object.
    pub fn metadata(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.metadata)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns the row-padded BGR pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Build a bottom-up bitmap from tightly packed RGB bytes, top row first.
    ///
    /// # Errors
    ///
    /// Returns an error string if `rgb` is shorter than `width * height * 3`
    /// bytes or either dimension is zero.
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Result<JsBitmap, JsValue> {
        Bitmap::from_rgb_bytes(width, height, rgb)
            .map(JsBitmap::from_bitmap)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns tightly packed RGB bytes in display order (top row first),
    /// ready for a canvas.
    ///
    /// Returns an empty array for an empty bitmap.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.inner
            .to_rgb_image()
            .map(|img| img.into_raw())
            .unwrap_or_default()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBitmap {
    /// Wrap a core Bitmap.
    pub(crate) fn from_bitmap(inner: Bitmap) -> Self {
        Self { inner }
    }

    /// Borrow the core Bitmap for passing to core functions.
    pub(crate) fn as_bitmap(&self) -> &Bitmap {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmpturn_core::decode::ImageMetadata;

    fn bitmap(width: i32, height: i32) -> JsBitmap {
        let meta = ImageMetadata::new(width, height);
        JsBitmap::from_bitmap(Bitmap::new(meta, vec![9u8; meta.pixel_data_len()]))
    }

    #[test]
    fn test_js_bitmap_getters() {
        let img = bitmap(5, 3);
        assert_eq!(img.width(), 5);
        assert_eq!(img.height(), 3);
        assert_eq!(img.row_stride(), 16);
        assert_eq!(img.byte_length(), 48);
        assert!(!img.is_top_down());
    }

    #[test]
    fn test_js_bitmap_top_down() {
        let img = bitmap(2, -2);
        assert_eq!(img.height(), -2);
        assert!(img.is_top_down());
        assert_eq!(img.byte_length(), 16);
    }

    #[test]
    fn test_to_rgb_display_order() {
        // 1x2 bottom-up: stored row 0 is the bottom of the picture
        let meta = ImageMetadata::new(1, 2);
        let pixels = vec![1, 2, 3, 0, 4, 5, 6, 0];
        let img = JsBitmap::from_bitmap(Bitmap::new(meta, pixels));
        assert_eq!(img.to_rgb(), vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_to_rgb_empty() {
        let img = JsBitmap::from_bitmap(Bitmap::new(ImageMetadata::new(0, 0), Vec::new()));
        assert!(img.to_rgb().is_empty());
    }

    #[test]
    fn test_js_bitmap_pixels_copy() {
        let img = bitmap(1, 1);
        assert_eq!(img.pixels(), vec![9, 9, 9, 9]);
        assert_eq!(img.as_bitmap().pixels, img.pixels());
    }
}
