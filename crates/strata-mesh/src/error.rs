//! Mesh error types.

/// Errors raised when configuring chunk meshing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// The chunk edge length is zero or too large for 16-bit indices.
    #[error("chunk size {size} out of range: expected 1..={max}")]
    InvalidChunkSize {
        /// Requested edge length.
        size: u32,
        /// Largest supported edge length.
        max: u32,
    },
}
