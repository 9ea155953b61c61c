//! Chunk meshing for height-field terrain.
//!
//! Turns a chunk coordinate and a noise evaluator into GPU-ready vertex and
//! 16-bit index buffers, either as a triangle surface or as a wireframe.

mod builder;
mod error;
mod grid;
mod mesh;
mod size;
mod uniforms;
mod vertex;

pub use builder::{
    NORMAL_UP, build_chunk_mesh, indices_for, line_indices, mesh_from_grid, triangle_indices,
};
pub use error::MeshError;
pub use grid::{BorderedHeightGrid, CellSlot, cell_slots};
pub use mesh::{INDEX_ALIGNMENT, Mesh, Topology, pad_indices};
pub use size::ChunkSize;
pub use uniforms::ChunkUniforms;
pub use vertex::{COLOR_OFFSET, NORMAL_OFFSET, POSITION_OFFSET, TerrainVertex, VERTEX_STRIDE};
