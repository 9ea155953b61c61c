use strata_coords::ChunkCoord;
use strata_mesh::{ChunkSize, ChunkUniforms, Mesh, Topology, build_chunk_mesh};
use strata_noise::NoiseEvaluator;

/// A materialized chunk: its mesh and shader uniforms.
///
/// Fully determined by `(descriptor, coord, chunk size, topology)`.
#[derive(Clone, Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    mesh: Mesh,
    uniforms: ChunkUniforms,
}

impl Chunk {
    /// Samples and meshes the chunk at `coord`.
    pub fn build(
        evaluator: &NoiseEvaluator,
        coord: ChunkCoord,
        size: ChunkSize,
        topology: Topology,
    ) -> Self {
        Self {
            coord,
            mesh: build_chunk_mesh(evaluator, coord, size, topology),
            uniforms: ChunkUniforms::for_chunk(),
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn uniforms(&self) -> &ChunkUniforms {
        &self.uniforms
    }

    /// Lowest and highest vertex height.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.mesh.height_range()
    }
}
