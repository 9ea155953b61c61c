//! Chunk meshing: bordered heights to vertices and indices.

use glam::Vec3;
use strata_coords::ChunkCoord;
use strata_noise::NoiseEvaluator;
use tracing::trace;

use crate::grid::{BorderedHeightGrid, CellSlot, cell_slots};
use crate::mesh::{Mesh, Topology};
use crate::size::ChunkSize;
use crate::vertex::TerrainVertex;

/// Vertical component of the unnormalized central-difference normal.
pub const NORMAL_UP: f32 = 2.0;

/// Samples a bordered grid for `coord` and meshes it.
pub fn build_chunk_mesh(
    evaluator: &NoiseEvaluator,
    coord: ChunkCoord,
    size: ChunkSize,
    topology: Topology,
) -> Mesh {
    let grid = BorderedHeightGrid::sample(evaluator, coord, size);
    let mesh = mesh_from_grid(&grid, topology);
    trace!(
        %coord,
        vertices = mesh.vertices().len(),
        indices = mesh.indices().len(),
        ?topology,
        "Built chunk mesh"
    );
    mesh
}

/// Meshes an already-sampled grid. Only interior cells emit vertices; the
/// border ring feeds the normals of the edge vertices.
pub fn mesh_from_grid(grid: &BorderedHeightGrid, topology: Topology) -> Mesh {
    let size = grid.size();
    let side = grid.side();
    let mesh_side = size.mesh_side();
    let heights = grid.heights();

    let mut vertices = Vec::with_capacity(size.vertex_count());
    for (i, slot) in cell_slots(size).into_iter().enumerate() {
        let CellSlot::Vertex(index) = slot else {
            continue;
        };
        let row = i / side;
        let col = i % side;
        let world = grid.world_position(row, col);

        let left = heights[i - 1];
        let right = heights[i + 1];
        let above = heights[i + side];
        let below = heights[i - side];
        let normal = Vec3::new(left - right, NORMAL_UP, below - above).normalize();

        let mesh_row = index as usize / mesh_side;
        let mesh_col = index as usize % mesh_side;
        let r = mesh_col as f32 / mesh_side as f32;
        let g = mesh_row as f32 / mesh_side as f32;
        let color = Vec3::new(r, g, (1.0 - g) * (1.0 - r));

        let position = Vec3::new(world.x as f32, heights[i], world.y as f32);
        vertices.push(TerrainVertex::new(position, normal, color));
    }

    Mesh::new(vertices, indices_for(size, topology), topology)
}

/// Index list for a chunk of `size` in the given topology, unpadded.
pub fn indices_for(size: ChunkSize, topology: Topology) -> Vec<u16> {
    match topology {
        Topology::TriangleList => triangle_indices(size),
        Topology::LineList => line_indices(size),
    }
}

/// Two triangles per cell, split along the top-left to bottom-right diagonal.
pub fn triangle_indices(size: ChunkSize) -> Vec<u16> {
    let m = size.mesh_side();
    let mut indices = Vec::with_capacity(size.triangle_count() * 3);
    for row in 0..m - 1 {
        for col in 0..m - 1 {
            let bl = (row * m + col) as u16;
            let br = bl + 1;
            let tl = ((row + 1) * m + col) as u16;
            let tr = tl + 1;
            indices.extend_from_slice(&[bl, br, tl, tl, br, tr]);
        }
    }
    indices
}

/// Cell outlines plus the triangle diagonal, each shared edge emitted once.
pub fn line_indices(size: ChunkSize) -> Vec<u16> {
    let m = size.mesh_side();
    let mut indices = Vec::with_capacity(size.line_count() * 2);
    for row in 0..m {
        for col in 0..m {
            let v = (row * m + col) as u16;
            let has_right = col + 1 < m;
            let has_top = row + 1 < m;
            if has_right {
                indices.extend_from_slice(&[v, v + 1]);
            }
            if has_top {
                let up = ((row + 1) * m + col) as u16;
                indices.extend_from_slice(&[up, v]);
                if has_right {
                    indices.extend_from_slice(&[up, v + 1]);
                }
            }
        }
    }
    indices
}
