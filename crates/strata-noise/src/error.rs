//! Noise error types.

use std::path::PathBuf;

use crate::descriptor::{FractalType, NoiseFunction};

/// Errors raised when constructing an evaluator or exporting a preview.
#[derive(Debug, thiserror::Error)]
pub enum NoiseError {
    /// A numeric descriptor field is outside its valid range.
    #[error("invalid noise parameter `{name}` = {value}: expected {expected}")]
    InvalidParameter {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Human-readable valid range.
        expected: &'static str,
    },

    /// The descriptor selects a base function that has no implementation.
    #[error("noise function {0:?} is not implemented")]
    UnsupportedFunction(NoiseFunction),

    /// The descriptor selects a fractal type that has no implementation.
    #[error("fractal type {0:?} is not implemented")]
    UnsupportedFractal(FractalType),

    /// A preview was requested with a zero-sized dimension.
    #[error("noise preview must be at least 1x1, got {width}x{height}")]
    EmptyPreview {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Writing the preview image failed.
    #[error("failed to write noise preview to {}: {source}", path.display())]
    Image {
        /// Destination path.
        path: PathBuf,
        /// Underlying encoder or I/O error.
        #[source]
        source: image::ImageError,
    },
}
