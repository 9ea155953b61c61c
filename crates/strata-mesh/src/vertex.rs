//! GPU-facing vertex format for terrain chunks.
//!
//! ## Attribute Layout
//!
//! | Location | Offset | Format    | Field    |
//! |----------|--------|-----------|----------|
//! | 0        | 0      | Float32x3 | position |
//! | 1        | 12     | Float32x3 | normal   |
//! | 2        | 24     | Float32x3 | color    |

use std::mem;

use glam::Vec3;

/// One terrain vertex: world position, unit normal and cosmetic color.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// `(world_x, height, world_y)`.
    pub position: [f32; 3],
    /// Unit-length surface normal.
    pub normal: [f32; 3],
    /// Gradient color derived from the vertex's grid position.
    pub color: [f32; 3],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 36]);

/// Byte stride of [`TerrainVertex`].
pub const VERTEX_STRIDE: usize = mem::size_of::<TerrainVertex>();
/// Byte offset of the position attribute.
pub const POSITION_OFFSET: usize = mem::offset_of!(TerrainVertex, position);
/// Byte offset of the normal attribute.
pub const NORMAL_OFFSET: usize = mem::offset_of!(TerrainVertex, normal);
/// Byte offset of the color attribute.
pub const COLOR_OFFSET: usize = mem::offset_of!(TerrainVertex, color);

const _: () = assert!(POSITION_OFFSET == 0);
const _: () = assert!(NORMAL_OFFSET == 12);
const _: () = assert!(COLOR_OFFSET == 24);
const _: () = assert!(
    COLOR_OFFSET + 12 <= VERTEX_STRIDE,
    "Last attribute exceeds vertex stride"
);

impl TerrainVertex {
    /// Builds a vertex from `glam` vectors.
    pub fn new(position: Vec3, normal: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: color.to_array(),
        }
    }

    /// Position as a `Vec3`.
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Normal as a `Vec3`.
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    /// Height component of the position.
    pub fn height(&self) -> f32 {
        self.position[1]
    }
}
