use strata_coords::ChunkCoord;
use strata_mesh::MeshError;
use strata_noise::NoiseError;

/// Errors surfaced by [`Terrain`](crate::Terrain).
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("invalid noise configuration: {0}")]
    Noise(#[from] NoiseError),

    #[error("invalid mesh configuration: {0}")]
    Mesh(#[from] MeshError),

    /// Some chunk covered by the point of interest has sample positions
    /// outside the `i32` world lattice.
    #[error("point of interest at {center} with radius {radius} leaves the world lattice")]
    OutOfRange { center: ChunkCoord, radius: u32 },

    /// The renderer could not create resources for a freshly built chunk.
    /// The chunk was discarded.
    #[error("renderer failed to create chunk {coord}")]
    Renderer {
        coord: ChunkCoord,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
