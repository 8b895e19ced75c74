//! WASM bindings for the rotate-and-smooth pipeline.
//!
//! # Example
//!
//! ```typescript
//! import { process_bmp } from '@bmpturn/wasm';
//!
//! // [clockwise, counter-clockwise, filtered clockwise, filtered counter-clockwise]
//! const outputs = process_bmp(bytes, { refresh_size_fields: false });
//! ```

use bmpturn_core::decode::{decode_bmp, DecodeError};
use bmpturn_core::pipeline::{run_pipeline, PipelineConfig};
use wasm_bindgen::prelude::*;

/// Decode, rotate both ways and smooth both rotations.
///
/// # Arguments
///
/// * `bytes` - The input BMP file bytes
/// * `config` - Optional `PipelineConfig` object; missing fields use defaults
///
/// # Returns
///
/// An `Array` of four `Uint8Array`s holding the encoded outputs, in the
/// order clockwise, counter-clockwise, filtered clockwise, filtered
/// counter-clockwise.
#[wasm_bindgen]
pub fn process_bmp(bytes: &[u8], config: JsValue) -> Result<js_sys::Array, JsValue> {
    let config: PipelineConfig = if config.is_undefined() || config.is_null() {
        PipelineConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid pipeline config: {}", e)))?
    };

    let outputs = encode_outputs(bytes, &config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let array = js_sys::Array::new();
    for bytes in outputs {
        array.push(&js_sys::Uint8Array::from(bytes.as_slice()));
    }
    Ok(array)
}

/// The default pipeline configuration as a plain JS object.
#[wasm_bindgen]
pub fn default_pipeline_config() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&PipelineConfig::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Run the pipeline and encode all four outputs.
fn encode_outputs(bytes: &[u8], config: &PipelineConfig) -> Result<Vec<Vec<u8>>, DecodeError> {
    let source = decode_bmp(bytes)?;
    let outputs = run_pipeline(&source, config);
    Ok(outputs
        .encode_all(config)
        .into_iter()
        .map(|(_, bytes)| bytes)
        .collect())
}
