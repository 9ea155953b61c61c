//! CPU-side mesh container with index padding.

use crate::vertex::{TerrainVertex, VERTEX_STRIDE};

/// Index buffers are padded with zeros to a multiple of this many entries.
pub const INDEX_ALIGNMENT: usize = 4;

/// Primitive topology of a mesh's index list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Three indices per triangle.
    #[default]
    TriangleList,
    /// Two indices per line segment.
    LineList,
}

impl Topology {
    /// `LineList` when `wireframe` is set, otherwise `TriangleList`.
    pub fn from_wireframe(wireframe: bool) -> Self {
        if wireframe { Self::LineList } else { Self::TriangleList }
    }

    /// Indices consumed per primitive.
    pub fn indices_per_primitive(self) -> usize {
        match self {
            Self::TriangleList => 3,
            Self::LineList => 2,
        }
    }
}

/// Vertex and 16-bit index buffers ready for upload.
///
/// The index buffer is always zero-padded to [`INDEX_ALIGNMENT`]. The
/// unpadded length is kept so primitive counts stay exact.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<TerrainVertex>,
    indices: Vec<u16>,
    topology: Topology,
    logical_index_count: usize,
}

impl Mesh {
    /// Takes ownership of the buffers and pads `indices`.
    pub fn new(vertices: Vec<TerrainVertex>, mut indices: Vec<u16>, topology: Topology) -> Self {
        let logical_index_count = indices.len();
        pad_indices(&mut indices);
        Self {
            vertices,
            indices,
            topology,
            logical_index_count,
        }
    }

    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// Padded index buffer.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Indices that describe primitives, i.e. without the padding tail.
    pub fn logical_indices(&self) -> &[u16] {
        &self.indices[..self.logical_index_count]
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Triangles described by the index list; zero for line meshes.
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::TriangleList => self.logical_index_count / 3,
            Topology::LineList => 0,
        }
    }

    /// Line segments described by the index list; zero for triangle meshes.
    pub fn line_count(&self) -> usize {
        match self.topology {
            Topology::LineList => self.logical_index_count / 2,
            Topology::TriangleList => 0,
        }
    }

    /// Size of the vertex buffer in bytes.
    pub fn vertex_bytes(&self) -> usize {
        self.vertices.len() * VERTEX_STRIDE
    }

    /// Size of the padded index buffer in bytes.
    pub fn index_bytes(&self) -> usize {
        self.indices.len() * std::mem::size_of::<u16>()
    }

    /// Vertex buffer as raw bytes.
    pub fn vertex_bytes_slice(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Lowest and highest vertex height, `None` for an empty mesh.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        let mut heights = self.vertices.iter().map(TerrainVertex::height);
        let first = heights.next()?;
        Some(heights.fold((first, first), |(lo, hi), h| (lo.min(h), hi.max(h))))
    }
}

/// Appends zeros until the length is a multiple of [`INDEX_ALIGNMENT`].
pub fn pad_indices(indices: &mut Vec<u16>) {
    let rem = indices.len() % INDEX_ALIGNMENT;
    if rem != 0 {
        indices.resize(indices.len() + INDEX_ALIGNMENT - rem, 0);
    }
}
