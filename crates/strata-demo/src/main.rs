//! Headless demo that streams terrain along a scripted walk.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p strata-demo -- --frames 32 --view-radius 3`.
//! Add `--preview noise.png` to also write a grayscale image of the noise.

use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;
use strata_config::{CliArgs, Config, ConfigError, default_config_dir};
use strata_coords::ChunkCoord;
use strata_noise::{NoiseError, NoiseEvaluator, NoisePreview};
use strata_terrain::{HeadlessRenderer, Terrain, TerrainError, TerrainSettings};
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Noise(#[from] NoiseError),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    strata_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), DemoError> {
    config.validate()?;

    if config.debug.preview_path.is_some() {
        export_preview(config)?;
    }

    let settings = TerrainSettings {
        chunk_size: config.chunk_size()?,
        view_radius: config.terrain.view_radius,
        center: config.terrain.center,
        wireframe: config.terrain.wireframe,
    };
    let mut terrain = Terrain::new(config.noise.clone(), settings, HeadlessRenderer::new())?;

    walk(&mut terrain, config)?;

    let renderer = terrain.renderer();
    info!(
        resident = terrain.chunk_count(),
        live_bytes = renderer.live_bytes(),
        created = renderer.created_total(),
        released = renderer.released_total(),
        "Walk finished"
    );
    if let Some((lo, hi)) = height_range(&terrain) {
        info!(min = lo, max = hi, "Resident height range");
    }

    let renderer = terrain.into_renderer();
    if renderer.live_count() != 0 {
        warn!(leaked = renderer.live_count(), "Renderer still holds chunk buffers");
    }
    Ok(())
}

fn walk(terrain: &mut Terrain<HeadlessRenderer>, config: &Config) -> Result<(), DemoError> {
    let walk = &config.walk;
    let (vx, vy) = walk.velocity;
    let halfway = walk.frames / 2;
    let mut center = terrain.center();

    for frame in 1..=walk.frames {
        center = center.offset(vx, vy);

        if walk.reseed_every > 0 && frame % walk.reseed_every == 0 {
            let mut descriptor = terrain.descriptor().clone();
            descriptor.seed = descriptor.seed.wrapping_add(1);
            let seed = descriptor.seed;
            if terrain.set_noise(descriptor)? {
                info!(frame, seed, "Reseeded noise");
            }
        }

        if frame == halfway {
            let wireframe = !terrain.is_wireframe();
            terrain.set_wireframe(wireframe);
            info!(frame, wireframe, "Toggled wireframe");
        }

        let report = terrain.update(center)?;
        info!(
            frame,
            %center,
            loaded = report.loaded,
            unloaded = report.unloaded,
            rebuilt = report.rebuilt,
            resident = terrain.chunk_count(),
            events = terrain.renderer().events().len(),
            "Frame"
        );
        terrain.renderer_mut().clear_events();
    }
    Ok(())
}

fn export_preview(config: &Config) -> Result<(), DemoError> {
    let Some(path) = config.debug.preview_path.as_deref() else {
        return Ok(());
    };
    let evaluator = NoiseEvaluator::new(config.noise.clone())?;
    let size = config.debug.preview_size;
    let origin = world_origin(config.terrain.center, config.terrain.chunk_size)
        - Vec2::splat(size as f32 / 2.0);

    let preview = NoisePreview::render(&evaluator, origin, size, size, 1.0)?;
    preview.save_png(path)?;
    let (lo, hi) = preview.value_range();
    info!(path = %path.display(), size, min = lo, max = hi, "Wrote noise preview");
    Ok(())
}

fn world_origin(center: ChunkCoord, chunk_size: u32) -> Vec2 {
    center.world_origin(chunk_size).as_vec2()
}

fn height_range(terrain: &Terrain<HeadlessRenderer>) -> Option<(f32, f32)> {
    terrain
        .chunks()
        .filter_map(|chunk| chunk.height_range())
        .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
}
