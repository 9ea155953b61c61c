//! Deterministic, seed-based height-field noise: lattice hash, bilinear and
//! bicubic value noise, FBM composition, and grayscale preview export.

mod descriptor;
mod error;
mod evaluator;
mod preview;

pub mod lattice;

pub use descriptor::{FractalType, Interpolation, NoiseDescriptor, NoiseFunction};
pub use error::NoiseError;
pub use evaluator::{CLAMP_CUBIC_FINAL_BLEND, NoiseEvaluator};
pub use lattice::hash_float;
pub use preview::NoisePreview;
