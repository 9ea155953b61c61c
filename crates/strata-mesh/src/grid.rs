//! Bordered height grids.
//!
//! A chunk's heights are sampled with one extra ring of neighbor cells so
//! that normals on the chunk edge use the same finite differences as the
//! neighboring chunk. Neighbors therefore agree on shared edges.

use glam::IVec2;
use strata_coords::ChunkCoord;
use strata_noise::NoiseEvaluator;

use crate::size::ChunkSize;

/// Slot of a bordered-grid cell in the vertex buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellSlot {
    /// Interior cell emitting the vertex at this index.
    Vertex(u16),
    /// Border-ring cell, numbered `-1, -2, ...` in row-major order.
    Border(i32),
}

/// Heights of a chunk plus a one-cell border ring, row-major.
#[derive(Clone, Debug)]
pub struct BorderedHeightGrid {
    coord: ChunkCoord,
    size: ChunkSize,
    heights: Vec<f32>,
}

impl BorderedHeightGrid {
    /// Samples `(N+3)²` heights. Cell `(row, col)` maps to world
    /// `((col - 1) + cx·N, (row - 1) + cy·N)`.
    pub fn sample(evaluator: &NoiseEvaluator, coord: ChunkCoord, size: ChunkSize) -> Self {
        let side = size.bordered_side();
        let mut heights = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                let world = cell_world_position(coord, size, row, col);
                heights.push(evaluator.eval_lattice(world.x, world.y));
            }
        }
        Self {
            coord,
            size,
            heights,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn size(&self) -> ChunkSize {
        self.size
    }

    /// Cells per side (`N + 3`).
    pub fn side(&self) -> usize {
        self.size.bordered_side()
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Height at `(row, col)`, `None` outside the grid.
    pub fn height(&self, row: usize, col: usize) -> Option<f32> {
        let side = self.side();
        if row >= side || col >= side {
            return None;
        }
        self.heights.get(row * side + col).copied()
    }

    /// World lattice position of `(row, col)`.
    pub fn world_position(&self, row: usize, col: usize) -> IVec2 {
        cell_world_position(self.coord, self.size, row, col)
    }
}

fn cell_world_position(coord: ChunkCoord, size: ChunkSize, row: usize, col: usize) -> IVec2 {
    coord.world_origin(size.get()) + IVec2::new(col as i32 - 1, row as i32 - 1)
}

/// Assigns every bordered-grid cell its [`CellSlot`], row-major.
pub fn cell_slots(size: ChunkSize) -> Vec<CellSlot> {
    let side = size.bordered_side();
    let mut slots = Vec::with_capacity(side * side);
    let mut next_vertex: u16 = 0;
    let mut next_border: i32 = -1;
    for row in 0..side {
        for col in 0..side {
            let on_border = row == 0 || col == 0 || row == side - 1 || col == side - 1;
            if on_border {
                slots.push(CellSlot::Border(next_border));
                next_border -= 1;
            } else {
                slots.push(CellSlot::Vertex(next_vertex));
                next_vertex = next_vertex.wrapping_add(1);
            }
        }
    }
    slots
}
