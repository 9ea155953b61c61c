//! Configuration error types.

use strata_mesh::MeshError;
use strata_noise::NoiseError;

/// Errors that can occur when loading, saving, parsing or validating
/// configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The `noise` section is out of range.
    #[error("invalid noise section: {0}")]
    Noise(#[from] NoiseError),

    /// The `terrain` section is out of range.
    #[error("invalid terrain section: {0}")]
    Terrain(#[from] MeshError),

    /// Some other field holds an unusable value.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}
