//! Grayscale raster previews of a noise configuration.
//!
//! Used to inspect a descriptor without building any geometry: sample the
//! evaluator over a window of the world and write the result as a PNG.

use std::path::Path;

use glam::Vec2;

use crate::error::NoiseError;
use crate::evaluator::NoiseEvaluator;

/// An 8-bit grayscale raster of normalized noise values, row-major.
#[derive(Clone, Debug)]
pub struct NoisePreview {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl NoisePreview {
    /// Samples `evaluator` on a `width` x `height` grid starting at world
    /// position `origin`, advancing `step` world units per pixel.
    ///
    /// Pixel values are the normalized noise (before amplitude) clamped to
    /// `[0, 1]` and scaled to `0..=255`.
    pub fn render(
        evaluator: &NoiseEvaluator,
        origin: Vec2,
        width: u32,
        height: u32,
        step: f32,
    ) -> Result<Self, NoiseError> {
        if width == 0 || height == 0 {
            return Err(NoiseError::EmptyPreview { width, height });
        }

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for py in 0..height {
            for px in 0..width {
                let p = origin + Vec2::new(px as f32, py as f32) * step;
                let v = evaluator.eval_normalized(p).clamp(0.0, 1.0);
                pixels.push((v * 255.0).round() as u8);
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw pixel bytes, one per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel value at `(x, y)`, or `None` outside the raster.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Darkest and brightest pixel.
    pub fn value_range(&self) -> (u8, u8) {
        let min = self.pixels.iter().copied().min().unwrap_or(0);
        let max = self.pixels.iter().copied().max().unwrap_or(0);
        (min, max)
    }

    /// Writes the raster as an 8-bit grayscale PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), NoiseError> {
        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ColorType::L8,
            image::ImageFormat::Png,
        )
        .map_err(|source| NoiseError::Image {
            path: path.to_path_buf(),
            source,
        })
    }
}
