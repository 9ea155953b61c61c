use std::collections::BTreeSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strata_coords::{ChunkCoord, square_around};
use strata_mesh::ChunkSize;
use strata_noise::{FractalType, NoiseDescriptor, NoiseFunction};
use strata_terrain::{
    Chunk, HeadlessRenderer, PointOfInterest, RenderEvent, Terrain, TerrainError, TerrainSettings,
};

fn settings(radius: u32, chunk_size: u32) -> TerrainSettings {
    TerrainSettings {
        chunk_size: ChunkSize::new(chunk_size).unwrap(),
        view_radius: radius,
        center: ChunkCoord::ORIGIN,
        wireframe: false,
    }
}

fn resident(terrain: &Terrain<HeadlessRenderer>) -> BTreeSet<ChunkCoord> {
    terrain.chunks().map(Chunk::coord).collect()
}

fn square(center: ChunkCoord, radius: u32) -> BTreeSet<ChunkCoord> {
    square_around(center, radius).collect()
}

// ---------------------------------------------------------------------------
// Renderer failures
// ---------------------------------------------------------------------------

#[test]
fn test_renderer_failure_leaves_no_dangling_chunk() {
    let mut terrain = Terrain::new(
        NoiseDescriptor::default(),
        settings(1, 8),
        HeadlessRenderer::new(),
    )
    .unwrap();
    let failing = ChunkCoord::new(2, 0);
    terrain.renderer_mut().fail_on(failing);

    let err = terrain.update(ChunkCoord::new(1, 0)).unwrap_err();
    match err {
        TerrainError::Renderer { coord, .. } => assert_eq!(coord, failing),
        other => panic!("unexpected error: {other}"),
    }

    // (2,-1) was built before the failure, (2,1) is still queued.
    assert!(!terrain.contains(failing));
    assert!(terrain.contains(ChunkCoord::new(2, -1)));
    assert!(!terrain.streaming().to_render().contains(&failing));
    assert!(!terrain.streaming().to_load().contains(&failing));
    assert!(terrain.streaming().to_load().contains(&ChunkCoord::new(2, 1)));
    assert_eq!(terrain.chunk_count(), 7);
    assert_eq!(terrain.renderer().live_count(), terrain.chunk_count());

    terrain.renderer_mut().clear_failure(failing);
    let report = terrain.update(ChunkCoord::new(1, 0)).unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(resident(&terrain), square(ChunkCoord::new(1, 0), 1));
}

#[test]
fn test_renderer_failure_during_construction() {
    let mut renderer = HeadlessRenderer::new();
    renderer.fail_on(ChunkCoord::ORIGIN);
    let result = Terrain::new(NoiseDescriptor::default(), settings(1, 4), renderer);
    let err = result.err().expect("construction should fail");
    assert!(matches!(err, TerrainError::Renderer { coord, .. } if coord == ChunkCoord::ORIGIN));
    assert_eq!(err.to_string(), "renderer failed to create chunk (0, 0)");
    assert!(std::error::Error::source(&err).is_some());
}

// ---------------------------------------------------------------------------
// Points of interest
// ---------------------------------------------------------------------------

#[test]
fn test_overlapping_points_are_restored_before_release() {
    let mut terrain = Terrain::new(
        NoiseDescriptor::default(),
        settings(1, 4),
        HeadlessRenderer::new(),
    )
    .unwrap();
    let secondary = PointOfInterest::new(ChunkCoord::new(1, 0), 1);

    assert!(terrain.add_point_of_interest(secondary).unwrap());
    let report = terrain.update(ChunkCoord::ORIGIN).unwrap();
    assert_eq!(report.loaded, 3);
    assert_eq!(terrain.chunk_count(), 12);

    assert!(terrain.remove_point_of_interest(secondary));
    let report = terrain.update(ChunkCoord::ORIGIN).unwrap();
    assert_eq!(report.unloaded, 3);
    assert_eq!(report.loaded, 0);
    assert_eq!(resident(&terrain), square(ChunkCoord::ORIGIN, 1));
    // Chunks still covered by the primary point were neither released nor rebuilt.
    assert_eq!(terrain.renderer().created_total(), 12);
    assert_eq!(terrain.renderer().released_total(), 3);
}

#[test]
fn test_disjoint_secondary_point() {
    let mut terrain = Terrain::new(
        NoiseDescriptor::default(),
        settings(0, 4),
        HeadlessRenderer::new(),
    )
    .unwrap();
    terrain
        .add_point_of_interest(PointOfInterest::new(ChunkCoord::new(10, 10), 1))
        .unwrap();
    terrain.update(ChunkCoord::ORIGIN).unwrap();
    assert_eq!(terrain.chunk_count(), 10);
    assert!(terrain.contains(ChunkCoord::new(11, 9)));
}

#[test]
fn test_secondary_point_survives_primary_passing_over_it() {
    let mut terrain = Terrain::new(
        NoiseDescriptor::default(),
        settings(1, 4),
        HeadlessRenderer::new(),
    )
    .unwrap();
    let secondary = PointOfInterest::new(ChunkCoord::new(1, 0), 1);
    assert!(terrain.add_point_of_interest(secondary).unwrap());

    // The primary lands exactly on the secondary, then leaves.
    terrain.update(ChunkCoord::new(1, 0)).unwrap();
    assert_eq!(terrain.streaming().registrations(secondary), 2);
    terrain.update(ChunkCoord::new(5, 0)).unwrap();

    assert_eq!(terrain.streaming().registrations(secondary), 1);
    assert!(terrain.contains(ChunkCoord::new(1, 0)));
    let mut expected = square(ChunkCoord::new(5, 0), 1);
    expected.extend(square(ChunkCoord::new(1, 0), 1));
    assert_eq!(resident(&terrain), expected);

    // Only the explicit removal drops it.
    assert!(terrain.remove_point_of_interest(secondary));
    terrain.update(ChunkCoord::new(5, 0)).unwrap();
    assert_eq!(resident(&terrain), square(ChunkCoord::new(5, 0), 1));
    assert_eq!(terrain.renderer().live_count(), 9);
}

// ---------------------------------------------------------------------------
// Seams
// ---------------------------------------------------------------------------

#[test]
fn test_resident_neighbors_share_edges() {
    let descriptor = NoiseDescriptor {
        function: NoiseFunction::ValueCubic,
        fractal: FractalType::Fbm,
        octaves: 3,
        ..Default::default()
    };
    let terrain = Terrain::new(descriptor, settings(1, 6), HeadlessRenderer::new()).unwrap();
    let m = terrain.chunk_size().mesh_side();

    for chunk in terrain.chunks() {
        let Some(east) = terrain.chunk(chunk.coord().offset(1, 0)) else {
            continue;
        };
        for row in 0..m {
            let a = chunk.mesh().vertices()[row * m + m - 1];
            let b = east.mesh().vertices()[row * m];
            assert_eq!(a.position, b.position, "{} row {row}", chunk.coord());
            assert_eq!(a.normal, b.normal, "{} row {row}", chunk.coord());
        }
    }
}

// ---------------------------------------------------------------------------
// Random walk
// ---------------------------------------------------------------------------

#[test]
fn test_random_walk_keeps_resident_set_exact() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5742_7a7a);
    let radius = 2;
    let mut terrain = Terrain::new(
        NoiseDescriptor::default(),
        settings(radius, 4),
        HeadlessRenderer::new(),
    )
    .unwrap();
    let mut center = ChunkCoord::ORIGIN;

    for step in 0..60 {
        center = center.offset(rng.random_range(-2..=2), rng.random_range(-2..=2));

        if rng.random_bool(0.1) {
            let wireframe = !terrain.is_wireframe();
            terrain.set_wireframe(wireframe);
        }
        if rng.random_bool(0.1) {
            let descriptor = NoiseDescriptor {
                seed: rng.random(),
                ..terrain.descriptor().clone()
            };
            terrain.set_noise(descriptor).unwrap();
        }

        let rebuild_pending = terrain.pending_rebuild().is_some();
        let report = terrain.update(center).unwrap();

        assert_eq!(resident(&terrain), square(center, radius), "step {step}");
        assert_eq!(terrain.renderer().live_count(), terrain.chunk_count(), "step {step}");
        let live: BTreeSet<ChunkCoord> = terrain.renderer().live_coords().collect();
        assert_eq!(live, resident(&terrain), "step {step}");
        assert!(terrain.streaming().to_load().is_empty(), "step {step}");
        assert!(terrain.streaming().to_unload().is_empty(), "step {step}");
        assert_eq!(terrain.pending_rebuild(), None, "step {step}");
        if rebuild_pending {
            assert!(report.rebuilt > 0, "step {step}");
        }
    }
}

#[test]
fn test_release_events_match_handles() {
    let mut terrain = Terrain::new(
        NoiseDescriptor::default(),
        settings(1, 4),
        HeadlessRenderer::new(),
    )
    .unwrap();
    terrain.update(ChunkCoord::new(3, 0)).unwrap();
    terrain.update(ChunkCoord::new(3, 3)).unwrap();

    let mut live = BTreeSet::new();
    for event in terrain.renderer().events() {
        match *event {
            RenderEvent::Created { handle, .. } => assert!(live.insert(handle)),
            RenderEvent::Released { handle, .. } => assert!(live.remove(&handle)),
        }
    }
    assert_eq!(live.len(), 9);
}
