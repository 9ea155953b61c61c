//! Configuration for the Strata terrain streamer.
//!
//! Settings persist to disk as `config.ron`. Every section tolerates missing
//! and unknown fields, and command-line flags override loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, TerrainConfig, WalkConfig, default_config_dir,
};
pub use error::ConfigError;
