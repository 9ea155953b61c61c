//! Chunked height-field terrain streaming.
//!
//! [`Terrain`] keeps the chunks around one or more points of interest
//! resident, rebuilding them when the noise configuration or the wireframe
//! mode changes. Chunk meshes are handed to a [`ChunkRenderer`].

mod chunk;
mod error;
mod renderer;
mod streaming;
mod terrain;

pub use chunk::Chunk;
pub use error::TerrainError;
pub use renderer::{ChunkRenderer, HeadlessError, HeadlessHandle, HeadlessRenderer, RenderEvent};
pub use streaming::{ChunkStreamingManager, PointOfInterest};
pub use terrain::{RebuildRequest, Terrain, TerrainSettings, UpdateReport};
