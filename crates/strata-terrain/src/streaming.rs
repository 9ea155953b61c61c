//! Point-of-interest driven chunk bookkeeping.
//!
//! The [`ChunkStreamingManager`] never builds anything itself. It tracks
//! which coordinates must be built (`to_load`), which are resident
//! (`to_render`), and which must be released (`to_unload`). The owner drains
//! these sets during reconciliation.
//!
//! Registrations are counted per point: adding the same point twice needs two
//! removals before its square is evicted. Coordinates are not counted, so
//! removing one point evicts every coordinate within its square even if a
//! different point still covers it. The next
//! [`ChunkStreamingManager::update_chunk_lists`] call puts covered
//! coordinates back, so the owner must reconcile before releasing chunks.

use std::collections::{BTreeMap, BTreeSet};

use strata_coords::{ChunkCoord, square_around};

/// A region of relevance: every chunk within Chebyshev distance `radius` of
/// `center`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointOfInterest {
    pub center: ChunkCoord,
    pub radius: u32,
}

impl PointOfInterest {
    pub const fn new(center: ChunkCoord, radius: u32) -> Self {
        Self { center, radius }
    }

    /// Whether `coord` lies inside this point's square.
    pub fn covers(&self, coord: ChunkCoord) -> bool {
        coord.within_square(self.center, self.radius)
    }

    /// Every covered coordinate, row by row.
    pub fn coords(&self) -> impl Iterator<Item = ChunkCoord> + use<> {
        square_around(self.center, self.radius)
    }
}

/// Ordered coordinate sets driven by a set of points of interest.
#[derive(Clone, Debug, Default)]
pub struct ChunkStreamingManager {
    points: BTreeMap<PointOfInterest, u32>,
    to_load: BTreeSet<ChunkCoord>,
    to_unload: BTreeSet<ChunkCoord>,
    to_render: BTreeSet<ChunkCoord>,
}

impl ChunkStreamingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a point. Takes effect on the next
    /// [`update_chunk_lists`](Self::update_chunk_lists).
    ///
    /// Returns `true` if the point was not registered before.
    pub fn add_point_of_interest(&mut self, poi: PointOfInterest) -> bool {
        let count = self.points.entry(poi).or_insert(0);
        *count += 1;
        *count == 1
    }

    /// Drops one registration of a point. When the last one goes, the point
    /// is forgotten and its square evicted from `to_load` and `to_render`.
    /// Evicted resident coordinates are queued in `to_unload`.
    ///
    /// Returns `false` if the point was not registered.
    pub fn remove_point_of_interest(&mut self, poi: PointOfInterest) -> bool {
        let Some(count) = self.points.get_mut(&poi) else {
            return false;
        };
        *count -= 1;
        if *count > 0 {
            return true;
        }
        self.points.remove(&poi);

        self.to_load.retain(|&coord| !poi.covers(coord));

        let evicted: Vec<ChunkCoord> = self
            .to_render
            .iter()
            .copied()
            .filter(|&coord| poi.covers(coord))
            .collect();
        for coord in evicted {
            self.to_render.remove(&coord);
            self.to_unload.insert(coord);
        }
        true
    }

    /// Walks every registered square. Covered coordinates pending unload
    /// are restored to `to_render`; covered coordinates not resident are
    /// queued in `to_load`. Idempotent.
    pub fn update_chunk_lists(&mut self) {
        for poi in self.points.keys() {
            for coord in poi.coords() {
                if self.to_unload.remove(&coord) {
                    self.to_render.insert(coord);
                }
                if !self.to_render.contains(&coord) {
                    self.to_load.insert(coord);
                }
            }
        }
    }

    /// Registered points in order, each listed once.
    pub fn points_of_interest(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.points.keys()
    }

    /// How many times `poi` is currently registered.
    pub fn registrations(&self, poi: PointOfInterest) -> u32 {
        self.points.get(&poi).copied().unwrap_or(0)
    }

    pub fn to_load(&self) -> &BTreeSet<ChunkCoord> {
        &self.to_load
    }

    pub fn to_unload(&self) -> &BTreeSet<ChunkCoord> {
        &self.to_unload
    }

    pub fn to_render(&self) -> &BTreeSet<ChunkCoord> {
        &self.to_render
    }

    /// Whether any registered point covers `coord`.
    pub fn is_covered(&self, coord: ChunkCoord) -> bool {
        self.points.keys().any(|poi| poi.covers(coord))
    }

    /// Removes and returns the smallest coordinate waiting to be built.
    pub fn pop_load(&mut self) -> Option<ChunkCoord> {
        self.to_load.pop_first()
    }

    /// Empties `to_unload`, returning its contents in order.
    pub fn take_unload(&mut self) -> BTreeSet<ChunkCoord> {
        std::mem::take(&mut self.to_unload)
    }

    /// Records that `coord` has been built and handed to the renderer.
    pub fn mark_rendered(&mut self, coord: ChunkCoord) {
        self.to_load.remove(&coord);
        self.to_render.insert(coord);
    }

    /// Moves every resident coordinate back into `to_load`, returning them
    /// in order.
    pub fn requeue_rendered(&mut self) -> Vec<ChunkCoord> {
        let resident: Vec<ChunkCoord> = std::mem::take(&mut self.to_render).into_iter().collect();
        self.to_load.extend(resident.iter().copied());
        resident
    }
}
