//! Command-line argument parsing for Strata.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Streams procedural height-field terrain")]
pub struct CliArgs {
    /// Chunk edge length in lattice cells.
    #[arg(long)]
    pub chunk_size: Option<u32>,

    /// Chunks kept resident around the center.
    #[arg(long)]
    pub view_radius: Option<u32>,

    /// Noise seed.
    #[arg(long, allow_hyphen_values = true)]
    pub seed: Option<i32>,

    /// Base noise frequency.
    #[arg(long)]
    pub frequency: Option<f32>,

    /// FBM octave count.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Build line meshes instead of triangles.
    #[arg(long)]
    pub wireframe: Option<bool>,

    /// Frames of the scripted walk.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write a noise preview PNG to this path.
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.chunk_size {
            self.terrain.chunk_size = size;
        }
        if let Some(radius) = args.view_radius {
            self.terrain.view_radius = radius;
        }
        if let Some(seed) = args.seed {
            self.noise.seed = seed;
        }
        if let Some(frequency) = args.frequency {
            self.noise.frequency = frequency;
        }
        if let Some(octaves) = args.octaves {
            self.noise.octaves = octaves;
        }
        if let Some(wireframe) = args.wireframe {
            self.terrain.wireframe = wireframe;
        }
        if let Some(frames) = args.frames {
            self.walk.frames = frames;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref path) = args.preview {
            self.debug.preview_path = Some(path.clone());
        }
    }
}
