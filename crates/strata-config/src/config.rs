//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strata_coords::ChunkCoord;
use strata_mesh::ChunkSize;
use strata_noise::NoiseDescriptor;

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Chunk grid and streaming settings.
    pub terrain: TerrainConfig,
    /// Height-field noise parameters.
    pub noise: NoiseDescriptor,
    /// Scripted camera path driven by the demo.
    pub walk: WalkConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Terrain configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Chunk edge length in lattice cells (1..=255).
    pub chunk_size: u32,
    /// Chunks kept resident in every direction around the center.
    pub view_radius: u32,
    /// Starting center chunk.
    pub center: ChunkCoord,
    /// Emit line meshes instead of triangles.
    pub wireframe: bool,
}

/// Scripted walk configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WalkConfig {
    /// Number of frames to simulate.
    pub frames: u32,
    /// Chunks moved per frame along x and y.
    pub velocity: (i32, i32),
    /// Change the noise seed every this many frames (0 = never).
    pub reseed_every: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a grayscale noise preview PNG here at startup.
    pub preview_path: Option<PathBuf>,
    /// Edge length in pixels of the preview image.
    pub preview_size: u32,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: ChunkSize::DEFAULT.get(),
            view_radius: 2,
            center: ChunkCoord::ORIGIN,
            wireframe: false,
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            frames: 16,
            velocity: (1, 0),
            reseed_every: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            preview_path: None,
            preview_size: 256,
        }
    }
}

/// `<platform config dir>/strata`, or `./strata` when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("strata")
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        log::debug!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Checks every section, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chunk_size()?;
        self.noise.validate()?;
        if self.debug.preview_path.is_some() && self.debug.preview_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "debug.preview_size",
                reason: "must be at least 1 when a preview path is set",
            });
        }
        Ok(())
    }

    /// The validated chunk edge length.
    pub fn chunk_size(&self) -> Result<ChunkSize, ConfigError> {
        Ok(ChunkSize::new(self.terrain.chunk_size)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_noise::{FractalType, NoiseFunction};

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("chunk_size: 32"));
        assert!(ron_str.contains("view_radius: 2"));
        assert!(ron_str.contains("seed: 1337"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.noise.function = NoiseFunction::ValueCubic;
        config.noise.fractal = FractalType::None;
        config.debug.preview_path = Some(PathBuf::from("noise.png"));
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(terrain: (chunk_size: 16), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.terrain.chunk_size, 16);
        assert_eq!(config.terrain.view_radius, 2);
        assert_eq!(config.noise, NoiseDescriptor::default());
        assert_eq!(config.walk, WalkConfig::default());
    }

    #[test]
    fn test_partial_noise_section() {
        let ron_str = "(noise: (seed: 7, function: ValueCubic))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.noise.seed, 7);
        assert_eq!(config.noise.function, NoiseFunction::ValueCubic);
        assert_eq!(config.noise.octaves, NoiseDescriptor::default().octaves);
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.chunk_size = 64;
        config.terrain.center = ChunkCoord::new(-3, 9);
        config.walk.velocity = (0, -1);

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("strata");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.noise.frequency = 0.1;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().noise.frequency, 0.1);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.terrain.chunk_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Terrain(_))));

        let mut config = Config::default();
        config.noise.octaves = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Noise(_))));

        let mut config = Config::default();
        config.debug.preview_path = Some(PathBuf::from("out.png"));
        config.debug.preview_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "debug.preview_size",
                ..
            })
        ));
    }

    #[test]
    fn test_default_config_dir_ends_with_strata() {
        assert!(default_config_dir().ends_with("strata"));
    }
}
