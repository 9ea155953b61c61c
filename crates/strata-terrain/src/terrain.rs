//! The terrain composition root: noise, streaming bookkeeping, resident
//! chunks and the renderer they are handed to.

use std::collections::BTreeMap;

use glam::IVec2;
use strata_coords::ChunkCoord;
use strata_mesh::{ChunkSize, Topology};
use strata_noise::{NoiseDescriptor, NoiseEvaluator};
use tracing::{debug, info, warn};

use crate::chunk::Chunk;
use crate::error::TerrainError;
use crate::renderer::ChunkRenderer;
use crate::streaming::{ChunkStreamingManager, PointOfInterest};

/// Construction parameters for [`Terrain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainSettings {
    pub chunk_size: ChunkSize,
    /// Radius in chunks of the square kept resident around `center`.
    pub view_radius: u32,
    pub center: ChunkCoord,
    pub wireframe: bool,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            chunk_size: ChunkSize::DEFAULT,
            view_radius: 2,
            center: ChunkCoord::ORIGIN,
            wireframe: false,
        }
    }
}

/// A pending full rebuild of the resident set, consumed by the next
/// [`Terrain::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebuildRequest {
    pub noise_changed: bool,
    pub wireframe_changed: bool,
}

impl RebuildRequest {
    pub const NOISE: Self = Self {
        noise_changed: true,
        wireframe_changed: false,
    };

    pub const WIREFRAME: Self = Self {
        noise_changed: false,
        wireframe_changed: true,
    };

    /// Union of two requests.
    pub fn merge(self, other: Self) -> Self {
        Self {
            noise_changed: self.noise_changed || other.noise_changed,
            wireframe_changed: self.wireframe_changed || other.wireframe_changed,
        }
    }
}

/// What a call to [`Terrain::update`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Chunks built and handed to the renderer, rebuilds included.
    pub loaded: usize,
    /// Chunks released because no point of interest covers them any more.
    pub unloaded: usize,
    /// Resident chunks torn down by a rebuild request.
    pub rebuilt: usize,
}

impl UpdateReport {
    /// True when the update changed nothing.
    pub fn is_idle(&self) -> bool {
        self.loaded == 0 && self.unloaded == 0 && self.rebuilt == 0
    }
}

#[derive(Debug)]
struct Resident<H> {
    chunk: Chunk,
    handle: H,
}

/// Streams height-field chunks around a moving center.
///
/// All work is synchronous: when [`Terrain::new`] or [`Terrain::update`]
/// returns, every covered chunk is built and owned by the renderer.
pub struct Terrain<R: ChunkRenderer> {
    evaluator: NoiseEvaluator,
    settings: TerrainSettings,
    streaming: ChunkStreamingManager,
    chunks: BTreeMap<ChunkCoord, Resident<R::Handle>>,
    rebuild: Option<RebuildRequest>,
    renderer: R,
}

impl<R: ChunkRenderer> Terrain<R> {
    /// Builds every chunk around `settings.center`.
    pub fn new(
        descriptor: NoiseDescriptor,
        settings: TerrainSettings,
        renderer: R,
    ) -> Result<Self, TerrainError> {
        let evaluator = NoiseEvaluator::new(descriptor)?;
        let primary = PointOfInterest::new(settings.center, settings.view_radius);
        check_world_range(primary, settings.chunk_size)?;

        let mut streaming = ChunkStreamingManager::new();
        streaming.add_point_of_interest(primary);
        streaming.update_chunk_lists();

        let mut terrain = Self {
            evaluator,
            settings,
            streaming,
            chunks: BTreeMap::new(),
            rebuild: None,
            renderer,
        };
        let loaded = terrain.materialize_pending()?;
        info!(
            center = %settings.center,
            radius = settings.view_radius,
            chunk_size = settings.chunk_size.get(),
            loaded,
            "Terrain initialized"
        );
        Ok(terrain)
    }

    /// Swaps the noise descriptor. Returns `false`, and requests nothing,
    /// when `descriptor` equals the current one.
    pub fn set_noise(&mut self, descriptor: NoiseDescriptor) -> Result<bool, TerrainError> {
        if *self.evaluator.descriptor() == descriptor {
            return Ok(false);
        }
        self.evaluator = NoiseEvaluator::new(descriptor)?;
        self.request_rebuild(RebuildRequest::NOISE);
        Ok(true)
    }

    /// Switches between triangle and line meshes. Returns `false` when the
    /// value is unchanged.
    pub fn set_wireframe(&mut self, wireframe: bool) -> bool {
        if self.settings.wireframe == wireframe {
            return false;
        }
        self.settings.wireframe = wireframe;
        self.request_rebuild(RebuildRequest::WIREFRAME);
        true
    }

    fn request_rebuild(&mut self, request: RebuildRequest) {
        let merged = self
            .rebuild
            .map_or(request, |pending| pending.merge(request));
        debug!(?merged, "Rebuild requested");
        self.rebuild = Some(merged);
    }

    /// Registers an additional point of interest, reconciled on the next
    /// [`update`](Self::update). Registrations are counted, so a point equal
    /// to the primary one outlives the primary moving away.
    ///
    /// Returns `Ok(true)` if the point was not registered before.
    pub fn add_point_of_interest(&mut self, poi: PointOfInterest) -> Result<bool, TerrainError> {
        check_world_range(poi, self.settings.chunk_size)?;
        Ok(self.streaming.add_point_of_interest(poi))
    }

    /// Unregisters a point of interest, reconciled on the next
    /// [`update`](Self::update).
    pub fn remove_point_of_interest(&mut self, poi: PointOfInterest) -> bool {
        self.streaming.remove_point_of_interest(poi)
    }

    /// Per-frame reconciliation.
    ///
    /// Moves the primary point of interest to `center`, releases uncovered
    /// chunks, tears down the resident set if a rebuild is pending, then
    /// builds every queued coordinate in order.
    ///
    /// If the renderer rejects a chunk, the chunk is dropped and the error
    /// returned. Coordinates not yet built stay queued; the rejected one is
    /// requeued by the next update while it remains covered.
    ///
    /// A `center` whose square leaves the world lattice is rejected before
    /// anything changes.
    pub fn update(&mut self, center: ChunkCoord) -> Result<UpdateReport, TerrainError> {
        let mut report = UpdateReport::default();

        if center != self.settings.center {
            let previous = self.primary_poi();
            let next = PointOfInterest::new(center, self.settings.view_radius);
            check_world_range(next, self.settings.chunk_size)?;
            self.streaming.remove_point_of_interest(previous);
            self.settings.center = center;
            self.streaming.add_point_of_interest(next);
            debug!(from = %previous.center, to = %center, "Moved center");
        }

        self.streaming.update_chunk_lists();

        for coord in self.streaming.take_unload() {
            if self.destroy(coord) {
                report.unloaded += 1;
            }
        }

        if let Some(request) = self.rebuild.take() {
            let resident = self.streaming.requeue_rendered();
            for &coord in &resident {
                self.destroy(coord);
            }
            report.rebuilt = resident.len();
            info!(
                chunks = report.rebuilt,
                noise = request.noise_changed,
                wireframe = request.wireframe_changed,
                "Rebuilding resident chunks"
            );
        }

        report.loaded = self.materialize_pending()?;

        if !report.is_idle() {
            debug!(
                loaded = report.loaded,
                unloaded = report.unloaded,
                rebuilt = report.rebuilt,
                resident = self.chunks.len(),
                "Terrain updated"
            );
        }
        Ok(report)
    }

    fn materialize_pending(&mut self) -> Result<usize, TerrainError> {
        let topology = Topology::from_wireframe(self.settings.wireframe);
        let mut built = 0;
        while let Some(coord) = self.streaming.pop_load() {
            let chunk = Chunk::build(&self.evaluator, coord, self.settings.chunk_size, topology);
            let handle = match self.renderer.create(&chunk) {
                Ok(handle) => handle,
                Err(source) => {
                    warn!(%coord, error = %source, "Renderer rejected chunk");
                    return Err(TerrainError::Renderer {
                        coord,
                        source: Box::new(source),
                    });
                }
            };
            if let Some(stale) = self.chunks.insert(coord, Resident { chunk, handle }) {
                self.renderer.release(coord, stale.handle);
            }
            self.streaming.mark_rendered(coord);
            built += 1;
        }
        Ok(built)
    }

    fn destroy(&mut self, coord: ChunkCoord) -> bool {
        match self.chunks.remove(&coord) {
            Some(resident) => {
                self.renderer.release(coord, resident.handle);
                true
            }
            None => false,
        }
    }

    fn primary_poi(&self) -> PointOfInterest {
        PointOfInterest::new(self.settings.center, self.settings.view_radius)
    }

    /// Releases every resident chunk and returns the renderer.
    pub fn into_renderer(mut self) -> R {
        let coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        for coord in coords {
            self.destroy(coord);
        }
        self.renderer
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord).map(|r| &r.chunk)
    }

    /// Resident chunks in coordinate order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values().map(|r| &r.chunk)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    pub fn pending_rebuild(&self) -> Option<RebuildRequest> {
        self.rebuild
    }

    pub fn descriptor(&self) -> &NoiseDescriptor {
        self.evaluator.descriptor()
    }

    pub fn evaluator(&self) -> &NoiseEvaluator {
        &self.evaluator
    }

    pub fn is_wireframe(&self) -> bool {
        self.settings.wireframe
    }

    pub fn center(&self) -> ChunkCoord {
        self.settings.center
    }

    pub fn view_radius(&self) -> u32 {
        self.settings.view_radius
    }

    pub fn chunk_size(&self) -> ChunkSize {
        self.settings.chunk_size
    }

    pub fn streaming(&self) -> &ChunkStreamingManager {
        &self.streaming
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

/// Fails unless every sample of every chunk `poi` covers, the one-sample
/// apron included, has an `i32` world position.
fn check_world_range(poi: PointOfInterest, chunk_size: ChunkSize) -> Result<(), TerrainError> {
    let out_of_range = || TerrainError::OutOfRange {
        center: poi.center,
        radius: poi.radius,
    };
    let radius = i32::try_from(poi.radius).map_err(|_| out_of_range())?;
    let size = chunk_size.get();
    let corner = |r: i32| -> Option<IVec2> {
        let x = poi.center.x.checked_add(r)?;
        let y = poi.center.y.checked_add(r)?;
        ChunkCoord::new(x, y).checked_world_origin(size)
    };
    let apron = |origin: IVec2, lo: i32, hi: i32| -> Option<()> {
        origin.x.checked_add(lo)?;
        origin.y.checked_add(lo)?;
        origin.x.checked_add(hi)?;
        origin.y.checked_add(hi)?;
        Some(())
    };

    // Bordered samples span origin - 1 ..= origin + size + 1 on each axis.
    let far = size as i32 + 1;
    corner(-radius)
        .and_then(|lo| apron(lo, -1, far))
        .and_then(|()| corner(radius))
        .and_then(|hi| apron(hi, -1, far))
        .ok_or_else(out_of_range)
}
