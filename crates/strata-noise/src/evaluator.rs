//! Height evaluation over the lattice hash.
//!
//! A [`NoiseEvaluator`] holds one validated [`NoiseDescriptor`] and nothing
//! else, so [`NoiseEvaluator::eval`] is a pure function of its input point.
//! Lattice lookups always use world coordinates, which is what keeps chunk
//! borders seamless: a sample does not know which chunk asked for it.

use glam::Vec2;

use crate::descriptor::{FractalType, Interpolation, NoiseDescriptor, NoiseFunction};
use crate::error::NoiseError;
use crate::lattice::{PRIME_X, PRIME_Y, prime_x, prime_y, primed_value};

/// Whether the bicubic path clamps its final y blend to `[0, 1]`.
///
/// Per-row x blends are always clamped; the final blend is left free, so
/// single-octave cubic noise may overshoot the unit range slightly.
pub const CLAMP_CUBIC_FINAL_BLEND: bool = false;

/// Amplitude of the first FBM octave for one octave (`lerp(0.4, 1.0, 1/1)`)
/// versus many (`-> 0.4`).
const FBM_FIRST_AMPLITUDE_MIN: f32 = 0.4;
const FBM_FIRST_AMPLITUDE_MAX: f32 = 1.0;

#[derive(Clone, Copy, Debug)]
enum BasePath {
    Bilinear(Interpolation),
    Bicubic,
}

#[derive(Clone, Copy, Debug)]
enum Composition {
    Single,
    Fbm,
}

/// Evaluates height samples for one noise configuration.
#[derive(Clone, Debug)]
pub struct NoiseEvaluator {
    descriptor: NoiseDescriptor,
    base: BasePath,
    composition: Composition,
}

impl NoiseEvaluator {
    /// Validates `descriptor` and builds an evaluator for it.
    ///
    /// Reserved function and fractal variants are rejected here rather than
    /// silently falling back to value noise.
    pub fn new(descriptor: NoiseDescriptor) -> Result<Self, NoiseError> {
        descriptor.validate()?;

        let base = match descriptor.function {
            NoiseFunction::Value => BasePath::Bilinear(descriptor.interpolation),
            NoiseFunction::ValueCubic => BasePath::Bicubic,
            other => return Err(NoiseError::UnsupportedFunction(other)),
        };
        let composition = match descriptor.fractal {
            FractalType::None => Composition::Single,
            FractalType::Fbm => Composition::Fbm,
            other => return Err(NoiseError::UnsupportedFractal(other)),
        };

        Ok(Self {
            descriptor,
            base,
            composition,
        })
    }

    /// The descriptor this evaluator was built from.
    pub fn descriptor(&self) -> &NoiseDescriptor {
        &self.descriptor
    }

    /// Height at a continuous world point: the normalized value scaled by
    /// the descriptor's amplitude.
    #[inline]
    pub fn eval(&self, point: Vec2) -> f32 {
        self.eval_normalized(point) * self.descriptor.amplitude
    }

    /// Height at an integer world lattice position.
    #[inline]
    pub fn eval_lattice(&self, x: i32, y: i32) -> f32 {
        self.eval(Vec2::new(x as f32, y as f32))
    }

    /// Value before amplitude scaling. In `[0, 1]` for FBM and the bilinear
    /// path; the bicubic path may overshoot slightly.
    pub fn eval_normalized(&self, point: Vec2) -> f32 {
        let p = point * self.descriptor.frequency;
        match self.composition {
            Composition::Single => self.eval_base(p),
            Composition::Fbm => self.eval_fbm(p),
        }
    }

    #[inline]
    fn eval_base(&self, p: Vec2) -> f32 {
        match self.base {
            BasePath::Bilinear(interpolation) => self.eval_linear(p, interpolation),
            BasePath::Bicubic => self.eval_cubic(p),
        }
    }

    fn eval_linear(&self, p: Vec2, interpolation: Interpolation) -> f32 {
        let seed = self.descriptor.seed;
        let cell = p.floor();
        let t = p - cell;
        let tx = interpolation.remap(t.x);
        let ty = interpolation.remap(t.y);

        let x0 = prime_x(cell.x as i32);
        let y0 = prime_y(cell.y as i32);
        let x1 = x0.wrapping_add(PRIME_X);
        let y1 = y0.wrapping_add(PRIME_Y);

        let bottom = lerp(primed_value(seed, x0, y0), primed_value(seed, x1, y0), tx);
        let top = lerp(primed_value(seed, x0, y1), primed_value(seed, x1, y1), tx);
        lerp(bottom, top, ty)
    }

    fn eval_cubic(&self, p: Vec2) -> f32 {
        let seed = self.descriptor.seed;
        let cell = p.floor();
        let t = p - cell;

        let x1 = prime_x(cell.x as i32);
        let y1 = prime_y(cell.y as i32);
        let xs = [
            x1.wrapping_sub(PRIME_X),
            x1,
            x1.wrapping_add(PRIME_X),
            x1.wrapping_add(PRIME_X.wrapping_mul(2)),
        ];
        let ys = [
            y1.wrapping_sub(PRIME_Y),
            y1,
            y1.wrapping_add(PRIME_Y),
            y1.wrapping_add(PRIME_Y.wrapping_mul(2)),
        ];

        let mut rows = [0.0_f32; 4];
        for (row, &y) in rows.iter_mut().zip(ys.iter()) {
            let blended = catmull_rom(
                primed_value(seed, xs[0], y),
                primed_value(seed, xs[1], y),
                primed_value(seed, xs[2], y),
                primed_value(seed, xs[3], y),
                t.x,
            );
            *row = blended.clamp(0.0, 1.0);
        }

        let value = catmull_rom(rows[0], rows[1], rows[2], rows[3], t.y);
        if CLAMP_CUBIC_FINAL_BLEND {
            value.clamp(0.0, 1.0)
        } else {
            value
        }
    }

    fn eval_fbm(&self, p: Vec2) -> f32 {
        let desc = &self.descriptor;
        let mut amplitude = lerp(
            FBM_FIRST_AMPLITUDE_MIN,
            FBM_FIRST_AMPLITUDE_MAX,
            1.0 / desc.octaves as f32,
        );
        let mut frequency = 1.0_f32;
        let mut sum = 0.0_f32;

        for _ in 0..desc.octaves {
            let sample = self.eval_base(p * frequency);
            sum += amplitude * sample;
            amplitude *= lerp(1.0, sample * 0.5, desc.weighted_strength) * desc.gain;
            frequency *= desc.lacunarity;
        }

        sum.clamp(0.0, 1.0)
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Catmull-Rom blend between `b` (t = 0) and `c` (t = 1).
#[inline]
fn catmull_rom(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    b + 0.5
        * t
        * (c - a + t * (2.0 * a - 5.0 * b + 4.0 * c - d + t * (3.0 * (b - c) + d - a)))
}
