//! Integration tests for the recomputation pipeline.
//!
//! The atlas and voxelizer are in-memory stand-ins: regions are axis-aligned
//! cubes and the voxelizer derives its count from the enclosed mesh volume.

use std::cell::Cell;

use neurocanvas::colors;
use neurocanvas::*;
use proptest::prelude::*;

/// Axis-aligned cube with outward-facing triangles.
fn cube(origin: Vec3, edge: f32) -> Mesh {
    let corners = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 6, 2],
        [3, 7, 6],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ];
    Mesh::new(corners.iter().map(|&c| origin + c * edge).collect(), faces).unwrap()
}

fn tetrahedron() -> Mesh {
    let vertices = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
    let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
    Mesh::new(vertices, faces).unwrap()
}

/// Atlas with a whole-brain cube, the MCA stroke territory, and CA1.
fn atlas() -> InMemoryAtlas {
    let mut atlas = InMemoryAtlas::new()
        .with_region(Region::new(ROOT_ACRONYM, "root", cube(Vec3::splat(-10.0), 20.0)))
        .with_region(Region::new("CA1", "Field CA1", tetrahedron()));
    for (i, acronym) in ["MOp", "MOs", "SSp", "SSs", "CP"].iter().enumerate() {
        let offset = Vec3::new(i as f32 * 3.0, 0.0, 0.0);
        atlas.insert(Region::new(*acronym, *acronym, cube(offset, 2.0)));
    }
    atlas
}

/// Voxelizer reporting `round(volume / resolution^3)` voxels and counting calls.
#[derive(Default)]
struct VolumeVoxelizer {
    calls: Cell<usize>,
}

impl Voxelizer for VolumeVoxelizer {
    fn voxelize(&self, mesh: &Mesh, resolution: f32) -> Result<VoxelGrid> {
        self.calls.set(self.calls.get() + 1);
        let count = (mesh.enclosed_volume() / f64::from(resolution).powi(3)).round() as u64;
        Ok(VoxelGrid::new(count, resolution))
    }
}

fn pipeline() -> Pipeline<InMemoryAtlas, VolumeVoxelizer> {
    Pipeline::new(atlas(), VolumeVoxelizer::default(), Options::default()).unwrap()
}

fn stroke_session(severity: f32) -> Session {
    let mut session = Session::new();
    session
        .apply_preset(builtin_presets(), "Ischemic Stroke (MCA)")
        .unwrap();
    session.set_severity(severity, SeverityPolicy::Reject).unwrap();
    session
}

fn per_vertex(layer: &SceneLayer) -> &ColorField {
    match &layer.color {
        LayerColor::PerVertex(field) => field,
        LayerColor::Uniform { .. } => panic!("layer {} is uniformly colored", layer.name),
    }
}

#[test]
fn test_context_layer_comes_first() {
    let mut pipeline = pipeline();
    let frame = pipeline.run(&Session::new()).unwrap();

    assert_eq!(frame.scene.len(), 1);
    let context = &frame.scene.layers()[0];
    assert_eq!(context.name, CONTEXT_LAYER_NAME);
    assert!(!context.hoverable);
    assert_eq!(context.mode, None);
    assert_eq!(
        context.color,
        LayerColor::Uniform {
            color: colors::LIGHT_GREY,
            opacity: 0.1
        }
    );
    assert_eq!(frame.volumes.unwrap(), VolumeEstimate::default());
}

#[test]
fn test_missing_root_aborts_pass() {
    let atlas = InMemoryAtlas::new().with_region(Region::new("CA1", "Field CA1", tetrahedron()));
    let mut pipeline = Pipeline::new(atlas, VolumeVoxelizer::default(), Options::default()).unwrap();
    let err = pipeline.run(&Session::new()).unwrap_err();
    assert!(matches!(err, NeuroCanvasError::RegionNotFound(_)));
}

#[test]
fn test_highlight_palette_cycles() {
    let mut pipeline = pipeline();
    let mut session = Session::new();
    session.set_selected(["MOp", "MOs", "SSp", "CA1"]);
    let frame = pipeline.run(&session).unwrap();

    let expected = [colors::BLUE, colors::CRIMSON, colors::MEDIUM_SEA_GREEN, colors::BLUE];
    let layers = &frame.scene.layers()[1..];
    assert_eq!(layers.len(), 4);
    for (layer, color) in layers.iter().zip(expected) {
        assert_eq!(layer.mode, Some(ColorMode::Highlight));
        assert_eq!(layer.color, LayerColor::Uniform { color, opacity: 1.0 });
    }
}

#[test]
fn test_stroke_preset_lesion_coloring_and_volumes() {
    let mut pipeline = pipeline();
    let frame = pipeline.run(&stroke_session(0.75)).unwrap();
    assert!(frame.failures.is_empty());

    let expected = LesionGradient::default().color_at(Severity::new(0.75, SeverityPolicy::Reject).unwrap());
    for acronym in ["MOp", "MOs", "SSp", "SSs", "CP"] {
        let layer = frame.scene.layer(acronym).unwrap();
        assert_eq!(layer.mode, Some(ColorMode::Lesion));
        let field = per_vertex(layer);
        assert_eq!(field.len(), 8);
        assert!(field.colors().iter().all(|c| c.truncate() == expected));
    }

    let volumes = frame.volumes.unwrap();
    assert!((volumes.pathological_volume - 40.0).abs() < 1e-6);
    assert!((volumes.lesion_volume - 30.0).abs() < 1e-6);
    assert_eq!(volumes.total_voxel_volume, 0.0);
    assert!(volumes.regions.iter().all(|r| r.source == VolumeSource::Mesh));
}

#[test]
fn test_severity_endpoints() {
    let mut pipeline = pipeline();

    let healthy = pipeline.run(&stroke_session(0.0)).unwrap();
    let field = per_vertex(healthy.scene.layer("CP").unwrap());
    assert!(field.colors().iter().all(|c| c.truncate() == colors::HEALTHY_TISSUE));
    assert_eq!(healthy.volumes.unwrap().lesion_volume, 0.0);

    let necrotic = pipeline.run(&stroke_session(1.0)).unwrap();
    let field = per_vertex(necrotic.scene.layer("CP").unwrap());
    assert!(field.colors().iter().all(|c| c.truncate() == colors::NECROTIC_BLACK));
    let volumes = necrotic.volumes.unwrap();
    assert_eq!(volumes.lesion_volume, volumes.pathological_volume);
}

#[test]
fn test_density_mode() {
    let mut pipeline = pipeline();
    let mut session = Session::new();
    session.select_region("CA1");
    session.set_mode("CA1", ColorMode::Density);
    let frame = pipeline.run(&session).unwrap();

    let field = per_vertex(frame.scene.layer("CA1").unwrap());
    let map = viridis();
    // Origin vertex is nearest the centroid; the three unit vertices are farthest.
    assert_eq!(field.get(0).unwrap().truncate(), map.low());
    for i in 1..4 {
        assert_eq!(field.get(i).unwrap().truncate(), map.high());
    }
}

#[test]
fn test_modes_compose_per_region() {
    let mut pipeline = pipeline();
    let mut session = stroke_session(0.5);
    session.set_mode("CP", ColorMode::Density);
    session.select_region("CA1");
    let frame = pipeline.run(&session).unwrap();

    assert_eq!(frame.scene.layer("MOp").unwrap().mode, Some(ColorMode::Lesion));
    assert_eq!(frame.scene.layer("CP").unwrap().mode, Some(ColorMode::Density));
    assert_eq!(frame.scene.layer("CA1").unwrap().mode, Some(ColorMode::Highlight));
    // CP stays in the preset, so its volume still counts as pathological.
    assert!((frame.volumes.unwrap().pathological_volume - 40.0).abs() < 1e-6);
}

#[test]
fn test_bad_region_does_not_block_others() {
    let mut pipeline = pipeline();
    let mut session = Session::new();
    session.set_selected(["MOp", "NOPE", "CA1"]);
    let frame = pipeline.run(&session).unwrap();

    assert_eq!(frame.failures.len(), 1);
    assert_eq!(frame.failures[0].acronym, "NOPE");
    assert!(matches!(frame.failures[0].error, NeuroCanvasError::RegionNotFound(_)));
    assert!(frame.scene.layer("MOp").is_some());
    assert!(frame.scene.layer("CA1").is_some());
    assert!(frame.volumes.is_ok());
}

#[test]
fn test_unmeasurable_highlight_region_keeps_volumes() {
    let mut atlas = atlas();
    atlas.insert(Region::new("EMPTY", "Empty", Mesh::default()));
    let mut pipeline = Pipeline::new(atlas, VolumeVoxelizer::default(), Options::default()).unwrap();
    let mut session = stroke_session(0.5);
    session.select_region("EMPTY");

    let frame = pipeline.run(&session).unwrap();
    assert!(frame.failures.is_empty());
    assert!(frame.scene.layer("EMPTY").is_some());
    let volumes = frame.volumes.unwrap();
    assert!((volumes.pathological_volume - 40.0).abs() < 1e-6);
    assert!(volumes.regions.iter().all(|r| r.acronym != "EMPTY"));
}

/// Reports a negative voxel edge for tetrahedra and a normal grid otherwise.
struct NegativeEdgeForTetra;

impl Voxelizer for NegativeEdgeForTetra {
    fn voxelize(&self, mesh: &Mesh, resolution: f32) -> Result<VoxelGrid> {
        let grid = VolumeVoxelizer::default().voxelize(mesh, resolution)?;
        if mesh.num_vertices() == 4 {
            Ok(VoxelGrid::new(grid.occupied_count().max(1), -resolution))
        } else {
            Ok(grid)
        }
    }
}

#[test]
fn test_bad_voxel_grid_on_highlight_region_keeps_volumes() {
    let mut pipeline = Pipeline::new(atlas(), NegativeEdgeForTetra, Options::default()).unwrap();
    let mut session = stroke_session(1.0);
    session.select_region("CA1");
    session.enable_voxelization(0.5).unwrap();

    let frame = pipeline.run(&session).unwrap();
    let volumes = frame.volumes.unwrap();
    assert!((volumes.total_voxel_volume - 40.0).abs() < 1e-6);
    assert!((volumes.lesion_volume - 40.0).abs() < 1e-6);
    assert!(volumes.regions.iter().all(|r| r.acronym != "CA1"));
}

#[test]
fn test_bad_voxel_grid_on_pathology_region_fails_volumes() {
    let mut pipeline = Pipeline::new(atlas(), NegativeEdgeForTetra, Options::default()).unwrap();
    let mut session = Session::new();
    session.select_region("CA1");
    session.set_mode("CA1", ColorMode::Lesion);
    session.enable_voxelization(0.5).unwrap();

    let frame = pipeline.run(&session).unwrap();
    assert!(matches!(frame.volumes, Err(NeuroCanvasError::MissingInput(_))));
}

#[test]
fn test_missing_pathology_region_fails_volumes_only() {
    let mut atlas = InMemoryAtlas::new()
        .with_region(Region::new(ROOT_ACRONYM, "root", cube(Vec3::ZERO, 20.0)));
    atlas.insert(Region::new("MOp", "MOp", cube(Vec3::ZERO, 1.0)));
    let mut pipeline = Pipeline::new(atlas, VolumeVoxelizer::default(), Options::default()).unwrap();

    let frame = pipeline.run(&stroke_session(0.5)).unwrap();
    assert_eq!(frame.failures.len(), 4);
    assert!(frame.scene.layer("MOp").is_some());
    assert!(matches!(frame.volumes, Err(NeuroCanvasError::RegionNotFound(_))));
}

#[test]
fn test_voxelization_volumes_and_cache() {
    let mut pipeline = pipeline();
    let mut session = stroke_session(0.5);
    session.enable_voxelization(0.5).unwrap();

    let frame = pipeline.run(&session).unwrap();
    let layer = frame.scene.layer("MOp").unwrap();
    assert_eq!(layer.voxels, Some(VoxelGrid::new(64, 0.5)));
    let volumes = frame.volumes.unwrap();
    assert!((volumes.total_voxel_volume - 40.0).abs() < 1e-6);
    assert!((volumes.pathological_volume - 40.0).abs() < 1e-6);
    assert!((volumes.lesion_volume - 20.0).abs() < 1e-6);
    assert!(volumes.regions.iter().all(|r| r.source == VolumeSource::Voxels));

    let calls = pipeline_voxelizer_calls(&pipeline);
    assert_eq!(calls, 5);
    pipeline.run(&session).unwrap();
    assert_eq!(pipeline_voxelizer_calls(&pipeline), 5);

    session.enable_voxelization(0.25).unwrap();
    pipeline.run(&session).unwrap();
    assert_eq!(pipeline_voxelizer_calls(&pipeline), 10);
}

fn pipeline_voxelizer_calls(pipeline: &Pipeline<InMemoryAtlas, VolumeVoxelizer>) -> usize {
    pipeline.voxelizer().calls.get()
}

#[test]
fn test_passes_are_deterministic() {
    let mut session = stroke_session(0.6);
    session.set_mode("SSp", ColorMode::Density);
    session.enable_voxelization(0.5).unwrap();

    let a = pipeline().run(&session).unwrap();
    let b = pipeline().run(&session).unwrap();

    assert_eq!(a.scene.len(), b.scene.len());
    for (la, lb) in a.scene.layers().iter().zip(b.scene.layers()) {
        assert_eq!(la.name, lb.name);
        match (&la.color, &lb.color) {
            (LayerColor::PerVertex(fa), LayerColor::PerVertex(fb)) => {
                assert_eq!(fa.as_bytes(), fb.as_bytes());
            }
            (ca, cb) => assert_eq!(ca, cb),
        }
    }
    let (va, vb) = (a.volumes.unwrap(), b.volumes.unwrap());
    assert_eq!(va.total_voxel_volume.to_bits(), vb.total_voxel_volume.to_bits());
    assert_eq!(va.pathological_volume.to_bits(), vb.pathological_volume.to_bits());
    assert_eq!(va.lesion_volume.to_bits(), vb.lesion_volume.to_bits());
}

#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<usize>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.scene.len());
        Ok(())
    }
}

#[test]
fn test_render_with_hands_frame_to_renderer() {
    let mut pipeline = pipeline();
    let mut renderer = RecordingRenderer::default();
    pipeline
        .render_with(&stroke_session(0.2), &mut renderer)
        .unwrap();
    assert_eq!(renderer.frames, vec![6]);
}

#[test]
fn test_region_catalogue() {
    let pipeline = pipeline();
    assert_eq!(
        pipeline.region_catalogue().unwrap(),
        ["CA1", "CP", "MOp", "MOs", "SSp", "SSs", "root"]
    );
}

#[test]
fn test_unknown_colormap_rejected() {
    let options = Options {
        density_colormap: "jet".to_string(),
        ..Options::default()
    };
    assert!(Pipeline::new(atlas(), VolumeVoxelizer::default(), options).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn lesion_volume_tracks_severity(s in 0.0f32..=1.0) {
        let mut pipeline = pipeline();
        let volumes = pipeline.run(&stroke_session(s)).unwrap().volumes.unwrap();
        prop_assert!(volumes.lesion_volume >= 0.0);
        prop_assert!(volumes.lesion_volume <= volumes.pathological_volume);
        prop_assert!((volumes.lesion_volume - volumes.pathological_volume * f64::from(s)).abs() < 1e-9);
    }
}
