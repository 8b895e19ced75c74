//! 24-bit BMP encoding.
//!
//! The encoder serializes whatever it is given. It does not check the pixel
//! buffer against the declared dimensions or sizes; the transforms in this
//! crate always produce `rows * stride` bytes.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::decode::Bitmap;
use crate::header::{self, HEADER_LEN};

/// Errors that can occur while writing a bitmap.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The destination could not be created or written.
    #[error("Unable to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Encode a bitmap to BMP bytes.
///
/// Writes the file header, the info header and the pixel buffer in that
/// order. If `data_offset` points past the headers, the gap is zero-filled so
/// the pixel data lands where the header says it is.
pub fn encode_bmp(bitmap: &Bitmap) -> Vec<u8> {
    let data_start = (bitmap.metadata.data_offset as usize).max(HEADER_LEN);
    let mut out = Vec::with_capacity(data_start + bitmap.pixels.len());

    header::write_headers(&bitmap.metadata, &mut out);
    out.resize(data_start, 0);
    out.extend_from_slice(&bitmap.pixels);

    debug!(
        width = bitmap.metadata.width,
        height = bitmap.metadata.height,
        len = out.len(),
        "Encoded bitmap"
    );
    out
}

/// Encode a bitmap and write it to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns `EncodeError::Io` if the file cannot be created or written.
pub fn write_bmp_file(path: impl AsRef<Path>, bitmap: &Bitmap) -> Result<(), EncodeError> {
    let path = path.as_ref();
    std::fs::write(path, encode_bmp(bitmap)).map_err(|source| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Wrote bitmap file");
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
