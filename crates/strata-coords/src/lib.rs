//! Chunk-grid coordinates for the streamed height field.
//!
//! A [`ChunkCoord`] names one square chunk on the unbounded 2D chunk grid.
//! Coordinates are totally ordered lexicographically (x, then y), so ordered
//! sets and maps keyed by them iterate in a stable, reproducible order.
//!
//! Relevance regions are Chebyshev balls: a coordinate lies within radius `r`
//! of a center when `max(|dx|, |dy|) <= r`.

use std::fmt;
use std::ops::{Add, Sub};

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Integer coordinate of a chunk on the chunk grid.
///
/// Field order matters: the derived `Ord` compares `x` first, then `y`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    /// Chunk-grid X coordinate.
    pub x: i32,
    /// Chunk-grid Y coordinate.
    pub y: i32,
}

impl ChunkCoord {
    /// The chunk at the world origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Creates a new chunk coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate offset by `(dx, dy)` chunks. Overflows like
    /// integer addition.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev (square) distance in chunks: `max(|dx|, |dy|)`.
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy)
    }

    /// Returns `true` if `self` lies within the square of `radius` chunks
    /// around `center` (border inclusive).
    pub fn within_square(self, center: Self, radius: u32) -> bool {
        self.chebyshev_distance(center) <= radius
    }

    /// World-lattice position of this chunk's first interior sample, for a
    /// chunk edge length of `chunk_size` lattice steps.
    ///
    /// Overflows once `coord * chunk_size` leaves the `i32` range; use
    /// [`checked_world_origin`](Self::checked_world_origin) for untrusted
    /// coordinates.
    pub fn world_origin(self, chunk_size: u32) -> IVec2 {
        IVec2::new(self.x, self.y) * chunk_size as i32
    }

    /// [`world_origin`](Self::world_origin), or `None` when the position
    /// does not fit in `i32`.
    pub fn checked_world_origin(self, chunk_size: u32) -> Option<IVec2> {
        let size = i32::try_from(chunk_size).ok()?;
        Some(IVec2::new(
            self.x.checked_mul(size)?,
            self.y.checked_mul(size)?,
        ))
    }

    /// Chunk containing the given world-lattice position.
    pub fn from_world(world: IVec2, chunk_size: u32) -> Self {
        let size = chunk_size as i32;
        Self {
            x: world.x.div_euclid(size),
            y: world.y.div_euclid(size),
        }
    }
}

impl From<IVec2> for ChunkCoord {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<ChunkCoord> for IVec2 {
    fn from(c: ChunkCoord) -> Self {
        IVec2::new(c.x, c.y)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for ChunkCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ChunkCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Iterates every coordinate in the square of `radius` chunks around
/// `center`, row by row (y outer, x inner).
pub fn square_around(center: ChunkCoord, radius: u32) -> impl Iterator<Item = ChunkCoord> {
    let r = radius as i32;
    (-r..=r).flat_map(move |dy| (-r..=r).map(move |dx| center.offset(dx, dy)))
}

/// Number of coordinates in a square of the given radius: `(2r + 1)²`.
pub fn square_area(radius: u32) -> usize {
    let side = 2 * radius as usize + 1;
    side * side
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_ordering_is_x_then_y() {
        let mut set = BTreeSet::new();
        set.insert(ChunkCoord::new(1, -5));
        set.insert(ChunkCoord::new(0, 3));
        set.insert(ChunkCoord::new(0, -2));
        set.insert(ChunkCoord::new(-1, 9));

        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![
                ChunkCoord::new(-1, 9),
                ChunkCoord::new(0, -2),
                ChunkCoord::new(0, 3),
                ChunkCoord::new(1, -5),
            ]
        );
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = ChunkCoord::new(0, 0);
        assert_eq!(a.chebyshev_distance(ChunkCoord::new(3, -1)), 3);
        assert_eq!(a.chebyshev_distance(ChunkCoord::new(-2, 2)), 2);
        assert_eq!(a.chebyshev_distance(a), 0);
    }

    #[test]
    fn test_within_square_is_border_inclusive() {
        let center = ChunkCoord::new(5, 5);
        assert!(ChunkCoord::new(6, 4).within_square(center, 1));
        assert!(!ChunkCoord::new(7, 5).within_square(center, 1));
        assert!(center.within_square(center, 0));
    }

    #[test]
    fn test_square_around_covers_area() {
        let coords: Vec<_> = square_around(ChunkCoord::new(2, -3), 2).collect();
        assert_eq!(coords.len(), square_area(2));
        assert_eq!(coords.first(), Some(&ChunkCoord::new(0, -5)));
        assert_eq!(coords.last(), Some(&ChunkCoord::new(4, -1)));

        let unique: BTreeSet<_> = coords.iter().copied().collect();
        assert_eq!(unique.len(), coords.len());
    }

    #[test]
    fn test_from_world_handles_negatives() {
        assert_eq!(
            ChunkCoord::from_world(IVec2::new(-1, 0), 32),
            ChunkCoord::new(-1, 0)
        );
        assert_eq!(
            ChunkCoord::from_world(IVec2::new(32, 31), 32),
            ChunkCoord::new(1, 0)
        );
        assert_eq!(ChunkCoord::new(-2, 3).world_origin(16), IVec2::new(-32, 48));
    }

    #[test]
    fn test_checked_world_origin_detects_overflow() {
        let far = ChunkCoord::new(70_000_000, 0);
        assert_eq!(far.checked_world_origin(32), None);
        assert_eq!(ChunkCoord::new(0, -70_000_000).checked_world_origin(32), None);
        assert_eq!(
            ChunkCoord::new(-2, 3).checked_world_origin(16),
            Some(IVec2::new(-32, 48))
        );
        let edge = ChunkCoord::new(i32::MAX / 32, i32::MIN / 32);
        assert_eq!(edge.checked_world_origin(32), Some(edge.world_origin(32)));
    }
}
