//! Rotate-and-smooth pipeline.
//!
//! Decodes one bitmap, rotates it a quarter turn in each direction, smooths
//! each rotated result, and produces four output bitmaps:
//!
//! ```text
//! source ──► clockwise ─────────► filtered clockwise
//!        └─► counter-clockwise ─► filtered counter-clockwise
//! ```
//!
//! Processing stops at the first error. File output is all or nothing: if any
//! write fails, the outputs already written by that run are removed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::decode::{decode_bmp_file, Bitmap, DecodeError};
use crate::encode::{encode_bmp, write_bmp_file, EncodeError};
use crate::filter::smooth;
use crate::transform::{rotate_clockwise, rotate_counter_clockwise};

/// Errors from [`process_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Pipeline settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// File name of the clockwise rotation.
    pub clockwise_name: String,
    /// File name of the counter-clockwise rotation.
    pub counter_clockwise_name: String,
    /// File name of the smoothed clockwise rotation.
    pub filtered_clockwise_name: String,
    /// File name of the smoothed counter-clockwise rotation.
    pub filtered_counter_clockwise_name: String,
    /// Recompute `image_size` and `file_size` on every output.
    ///
    /// Rotation copies these fields unchanged, which leaves them stale for
    /// non-square images whose row padding changes.
    pub refresh_size_fields: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            clockwise_name: "output_90_clockwise.bmp".to_string(),
            counter_clockwise_name: "output_90_counterclockwise.bmp".to_string(),
            filtered_clockwise_name: "filtered_90_clockwise.bmp".to_string(),
            filtered_counter_clockwise_name: "filtered_90_counterclockwise.bmp".to_string(),
            refresh_size_fields: true,
        }
    }
}

/// The four bitmaps produced from one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutputs {
    pub clockwise: Bitmap,
    pub counter_clockwise: Bitmap,
    pub filtered_clockwise: Bitmap,
    pub filtered_counter_clockwise: Bitmap,
}

impl PipelineOutputs {
    /// Pair each output with its configured file name, in write order.
    pub fn named<'a>(&'a self, config: &'a PipelineConfig) -> [(&'a str, &'a Bitmap); 4] {
        [
            (config.clockwise_name.as_str(), &self.clockwise),
            (config.counter_clockwise_name.as_str(), &self.counter_clockwise),
            (config.filtered_clockwise_name.as_str(), &self.filtered_clockwise),
            (
                config.filtered_counter_clockwise_name.as_str(),
                &self.filtered_counter_clockwise,
            ),
        ]
    }

    /// Encode every output, paired with its file name.
    pub fn encode_all<'a>(&'a self, config: &'a PipelineConfig) -> Vec<(&'a str, Vec<u8>)> {
        self.named(config)
            .into_iter()
            .map(|(name, bitmap)| (name, encode_bmp(bitmap)))
            .collect()
    }
}

/// Run both rotations and both filters on a decoded bitmap.
pub fn run_pipeline(source: &Bitmap, config: &PipelineConfig) -> PipelineOutputs {
    let finish = |mut bitmap: Bitmap| {
        if config.refresh_size_fields {
            bitmap.metadata = bitmap.metadata.with_refreshed_sizes();
        }
        bitmap
    };

    let clockwise = finish(rotate_clockwise(source));
    let counter_clockwise = finish(rotate_counter_clockwise(source));
    let filtered_clockwise = smooth(&clockwise);
    let filtered_counter_clockwise = smooth(&counter_clockwise);

    debug!(
        width = source.metadata.width,
        height = source.metadata.height,
        refresh_size_fields = config.refresh_size_fields,
        "Pipeline produced 4 outputs"
    );

    PipelineOutputs {
        clockwise,
        counter_clockwise,
        filtered_clockwise,
        filtered_counter_clockwise,
    }
}

/// Decode `input`, run the pipeline, and write the four outputs into
/// `output_dir`.
///
/// Returns the written paths in the order clockwise, counter-clockwise,
/// filtered clockwise, filtered counter-clockwise.
///
/// # Errors
///
/// Returns the first decode or write failure. On a write failure, every output
/// already written by this call is deleted before the error is returned.
pub fn process_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &PipelineConfig,
) -> Result<Vec<PathBuf>, PipelineError> {
    let source = decode_bmp_file(input)?;
    let outputs = run_pipeline(&source, config);

    let output_dir = output_dir.as_ref();
    let mut written = Vec::with_capacity(4);
    for (name, bitmap) in outputs.named(config) {
        let path = output_dir.join(name);
        if let Err(err) = write_bmp_file(&path, bitmap) {
            remove_outputs(&written);
            return Err(err.into());
        }
        written.push(path);
    }

    debug!(dir = %output_dir.display(), count = written.len(), "Wrote pipeline outputs");
    Ok(written)
}

/// Best-effort removal of partially written outputs.
fn remove_outputs(paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %err, "Failed to remove partial output");
        }
    }
}
