use crate::error::MeshError;

/// Edge length of a chunk in lattice cells.
///
/// Bounded to `1..=255` so that the `(N+1)²` vertices of a chunk stay
/// addressable with 16-bit indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkSize(u32);

impl ChunkSize {
    /// Largest supported edge length.
    pub const MAX: u32 = 255;

    /// Edge length used when nothing else is configured.
    pub const DEFAULT: Self = Self(32);

    /// Validates and wraps an edge length.
    pub fn new(cells: u32) -> Result<Self, MeshError> {
        if cells == 0 || cells > Self::MAX {
            return Err(MeshError::InvalidChunkSize {
                size: cells,
                max: Self::MAX,
            });
        }
        Ok(Self(cells))
    }

    /// Edge length in cells (`N`).
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Vertices along one edge of the mesh (`N + 1`).
    #[inline]
    pub fn mesh_side(self) -> usize {
        self.0 as usize + 1
    }

    /// Side of the bordered height grid (`N + 3`).
    #[inline]
    pub fn bordered_side(self) -> usize {
        self.0 as usize + 3
    }

    /// `(N + 1)²`.
    pub fn vertex_count(self) -> usize {
        self.mesh_side() * self.mesh_side()
    }

    /// `2N²`.
    pub fn triangle_count(self) -> usize {
        let n = self.0 as usize;
        2 * n * n
    }

    /// `2N(N + 1) + N²`.
    pub fn line_count(self) -> usize {
        let n = self.0 as usize;
        2 * n * (n + 1) + n * n
    }
}

impl Default for ChunkSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for ChunkSize {
    type Error = MeshError;

    fn try_from(cells: u32) -> Result<Self, Self::Error> {
        Self::new(cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(ChunkSize::new(0).is_err());
        assert!(ChunkSize::new(1).is_ok());
        assert!(ChunkSize::new(255).is_ok());
        assert_eq!(
            ChunkSize::new(256),
            Err(MeshError::InvalidChunkSize { size: 256, max: 255 })
        );
    }

    #[test]
    fn test_largest_size_fits_u16_indices() {
        let size = ChunkSize::new(ChunkSize::MAX).unwrap();
        assert!(size.vertex_count() - 1 <= u16::MAX as usize);
    }

    #[test]
    fn test_derived_counts() {
        let size = ChunkSize::new(4).unwrap();
        assert_eq!(size.mesh_side(), 5);
        assert_eq!(size.bordered_side(), 7);
        assert_eq!(size.vertex_count(), 25);
        assert_eq!(size.triangle_count(), 32);
        assert_eq!(size.line_count(), 56);
    }
}
