//! bmpturn WASM - WebAssembly bindings for bmpturn
//!
//! This crate provides WASM bindings to expose the bmpturn-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for decoded bitmaps
//! - `decode` - BMP decoding bindings
//! - `encode` - BMP encoding bindings
//! - `transform` - Rotation and smoothing bindings
//! - `pipeline` - The four-output rotate-and-smooth pipeline
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_bmp, rotate_clockwise, smooth, encode_bmp } from '@bmpturn/wasm';
//!
//! await init();
//!
//! const bitmap = decode_bmp(new Uint8Array(await file.arrayBuffer()));
//! const out = encode_bmp(smooth(rotate_clockwise(bitmap)));
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod pipeline;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_bmp, is_supported_bmp};
pub use encode::encode_bmp;
pub use pipeline::{default_pipeline_config, process_bmp};
pub use transform::{rotate, rotate_clockwise, rotate_counter_clockwise, smooth};
pub use types::JsBitmap;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
