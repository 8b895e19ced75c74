//! Geometric transforms on decoded bitmaps.
//!
//! Every transform takes a `&Bitmap` and returns a freshly allocated
//! `Bitmap`; the input is never modified.
//!
//! # Coordinate System
//!
//! - Origin is the first pixel of the first stored row
//! - For bottom-up files (positive height) that row is the bottom of the picture
//! - Rotations are exact quarter turns; no resampling

mod rotation;

pub use rotation::{
    rotate_90, rotate_clockwise, rotate_counter_clockwise, rotated_metadata, RotationDirection,
};
