//! The seam between terrain bookkeeping and whatever owns GPU resources.

use std::collections::{BTreeMap, BTreeSet};

use strata_coords::ChunkCoord;
use tracing::trace;

use crate::chunk::Chunk;

/// Receives chunk meshes when they become resident and their handles when
/// they are destroyed.
pub trait ChunkRenderer {
    /// Whatever the renderer needs to find the chunk's resources again.
    type Handle;
    /// Resource creation failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Uploads `chunk`'s buffers.
    fn create(&mut self, chunk: &Chunk) -> Result<Self::Handle, Self::Error>;

    /// Frees the resources behind `handle`.
    fn release(&mut self, coord: ChunkCoord, handle: Self::Handle);
}

/// Opaque id handed out by [`HeadlessRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeadlessHandle(pub u64);

/// A create or release observed by [`HeadlessRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    Created {
        coord: ChunkCoord,
        handle: HeadlessHandle,
        vertex_bytes: usize,
        index_bytes: usize,
    },
    Released {
        coord: ChunkCoord,
        handle: HeadlessHandle,
    },
}

/// Failure injected through [`HeadlessRenderer::fail_on`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("buffer creation failed for chunk {coord}")]
pub struct HeadlessError {
    pub coord: ChunkCoord,
}

#[derive(Clone, Copy, Debug)]
struct Allocation {
    handle: HeadlessHandle,
    bytes: usize,
}

/// A renderer that only does bookkeeping. Used by the demo and tests.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    next_handle: u64,
    live: BTreeMap<ChunkCoord, Allocation>,
    events: Vec<RenderEvent>,
    created: usize,
    released: usize,
    failing: BTreeSet<ChunkCoord>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every future `create` for `coord` fail.
    pub fn fail_on(&mut self, coord: ChunkCoord) {
        self.failing.insert(coord);
    }

    /// Stops injecting failures for `coord`.
    pub fn clear_failure(&mut self, coord: ChunkCoord) {
        self.failing.remove(&coord);
    }

    /// Events recorded since construction or the last
    /// [`clear_events`](Self::clear_events).
    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Forgets recorded events. Live allocations and the running totals are
    /// kept.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Number of chunks with live resources.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Coordinates with live resources, in order.
    pub fn live_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.live.keys().copied()
    }

    /// Total bytes of vertex and index buffers currently held.
    pub fn live_bytes(&self) -> usize {
        self.live.values().map(|a| a.bytes).sum()
    }

    /// Number of `create` calls that succeeded.
    pub fn created_total(&self) -> usize {
        self.created
    }

    /// Number of `release` calls.
    pub fn released_total(&self) -> usize {
        self.released
    }
}

impl ChunkRenderer for HeadlessRenderer {
    type Handle = HeadlessHandle;
    type Error = HeadlessError;

    fn create(&mut self, chunk: &Chunk) -> Result<HeadlessHandle, HeadlessError> {
        let coord = chunk.coord();
        if self.failing.contains(&coord) {
            return Err(HeadlessError { coord });
        }

        let handle = HeadlessHandle(self.next_handle);
        self.next_handle += 1;

        let vertex_bytes = chunk.mesh().vertex_bytes();
        let index_bytes = chunk.mesh().index_bytes();
        self.live.insert(
            coord,
            Allocation {
                handle,
                bytes: vertex_bytes + index_bytes,
            },
        );
        self.events.push(RenderEvent::Created {
            coord,
            handle,
            vertex_bytes,
            index_bytes,
        });
        self.created += 1;
        trace!(%coord, handle = handle.0, vertex_bytes, index_bytes, "Created chunk buffers");
        Ok(handle)
    }

    fn release(&mut self, coord: ChunkCoord, handle: HeadlessHandle) {
        if self.live.get(&coord).is_some_and(|a| a.handle == handle) {
            self.live.remove(&coord);
        }
        self.events.push(RenderEvent::Released { coord, handle });
        self.released += 1;
        trace!(%coord, handle = handle.0, "Released chunk buffers");
    }
}
