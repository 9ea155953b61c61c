//! Noise parameter descriptor.

use serde::{Deserialize, Serialize};

use crate::error::NoiseError;

/// Base noise function sampled at each lattice point.
///
/// Only [`Value`](Self::Value) and [`ValueCubic`](Self::ValueCubic) are
/// implemented; the remaining variants are reserved and rejected by
/// [`NoiseEvaluator::new`](crate::NoiseEvaluator::new).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseFunction {
    /// Value noise with bilinear blending of the four cell corners.
    #[default]
    Value,
    /// Value noise with bicubic blending of a 4x4 neighborhood.
    ValueCubic,
    /// Reserved.
    Perlin,
    /// Reserved.
    Simplex,
    /// Reserved.
    Cellular,
}

impl NoiseFunction {
    /// Returns `true` if the evaluator can sample this function.
    pub fn is_implemented(self) -> bool {
        matches!(self, Self::Value | Self::ValueCubic)
    }
}

/// Remapping applied to the fractional cell offset before bilinear blending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpolation {
    /// Identity.
    Linear,
    /// `(1 - cos(t * pi)) / 2`.
    Cosine,
    /// `3t² - 2t³`.
    #[default]
    Smoothstep,
    /// `6t⁵ - 15t⁴ + 10t³`.
    Smootherstep,
}

impl Interpolation {
    /// Remaps a fractional offset in `[0, 1]`.
    #[inline]
    pub fn remap(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::Cosine => (1.0 - libm::cosf(t * std::f32::consts::PI)) * 0.5,
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
            Self::Smootherstep => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
        }
    }
}

/// How octaves are composed.
///
/// Only [`None`](Self::None) and [`Fbm`](Self::Fbm) are implemented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FractalType {
    /// A single octave.
    None,
    /// Fractal Brownian motion.
    #[default]
    Fbm,
    /// Reserved.
    Ridged,
    /// Reserved.
    Turbulence,
    /// Reserved.
    DomainWarp,
}

impl FractalType {
    /// Returns `true` if the evaluator can compose this fractal type.
    pub fn is_implemented(self) -> bool {
        matches!(self, Self::None | Self::Fbm)
    }
}

/// Complete parameter set for a height-field noise.
///
/// Two descriptors compare equal only if every field is identical; the
/// terrain relies on this to skip rebuilds when nothing changed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseDescriptor {
    /// Base lattice function.
    pub function: NoiseFunction,
    /// Fractional-offset remapping for the bilinear path.
    pub interpolation: Interpolation,
    /// Octave composition.
    pub fractal: FractalType,
    /// Hash seed. Every octave uses this same seed.
    pub seed: i32,
    /// Input scale applied before any lattice lookup. Must be positive.
    pub frequency: f32,
    /// Frequency multiplier between octaves. Must be non-negative.
    pub lacunarity: f32,
    /// How strongly an octave's value damps the next octave, in `[0, 1]`.
    pub weighted_strength: f32,
    /// Amplitude multiplier between octaves, in `[0, 1]`.
    pub gain: f32,
    /// Number of octaves, at least 1.
    pub octaves: u32,
    /// Output scale: heights span roughly `[0, amplitude]`.
    pub amplitude: f32,
}

impl Default for NoiseDescriptor {
    fn default() -> Self {
        Self {
            function: NoiseFunction::Value,
            interpolation: Interpolation::Smoothstep,
            fractal: FractalType::Fbm,
            seed: 1337,
            frequency: 0.05,
            lacunarity: 2.0,
            weighted_strength: 0.0,
            gain: 0.5,
            octaves: 4,
            amplitude: 32.0,
        }
    }
}

impl NoiseDescriptor {
    /// Checks every numeric field, returning the first violation.
    pub fn validate(&self) -> Result<(), NoiseError> {
        check(
            "frequency",
            self.frequency,
            self.frequency.is_finite() && self.frequency > 0.0,
            "a finite value > 0",
        )?;
        check(
            "lacunarity",
            self.lacunarity,
            self.lacunarity.is_finite() && self.lacunarity >= 0.0,
            "a finite value >= 0",
        )?;
        check(
            "weighted_strength",
            self.weighted_strength,
            (0.0..=1.0).contains(&self.weighted_strength),
            "a value in [0, 1]",
        )?;
        check(
            "gain",
            self.gain,
            (0.0..=1.0).contains(&self.gain),
            "a value in [0, 1]",
        )?;
        check(
            "amplitude",
            self.amplitude,
            self.amplitude.is_finite(),
            "a finite value",
        )?;
        if self.octaves == 0 {
            return Err(NoiseError::InvalidParameter {
                name: "octaves",
                value: 0.0,
                expected: "at least 1",
            });
        }
        Ok(())
    }
}

fn check(
    name: &'static str,
    value: f32,
    ok: bool,
    expected: &'static str,
) -> Result<(), NoiseError> {
    if ok {
        Ok(())
    } else {
        Err(NoiseError::InvalidParameter {
            name,
            value: value as f64,
            expected,
        })
    }
}
