//! Simulates an MCA stroke and prints the resulting volumes.
//!
//! Pass a BrainGlobe atlas directory to use real meshes:
//!
//! ```text
//! cargo run --example stroke_demo -- ~/.brainglobe/allen_mouse_100um_v1.2
//! ```
//!
//! Without an argument a small synthetic atlas of cubes is used.

use neurocanvas::*;

/// Approximates voxelization by dividing the enclosed volume by the voxel volume.
struct ApproxVoxelizer;

impl Voxelizer for ApproxVoxelizer {
    fn voxelize(&self, mesh: &Mesh, resolution: f32) -> Result<VoxelGrid> {
        let voxels = mesh.enclosed_volume() / f64::from(resolution).powi(3);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = voxels.round() as u64;
        Ok(VoxelGrid::new(count, resolution))
    }
}

fn cube(origin: Vec3, edge: f32) -> Result<Mesh> {
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
    let quads: [[u32; 4]; 6] = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [3, 7, 6, 2],
        [0, 4, 7, 3],
        [1, 2, 6, 5],
    ];
    Mesh::from_polygons(
        corners.iter().map(|&c| origin + c * edge).collect(),
        &quads.iter().map(|q| q.to_vec()).collect::<Vec<_>>(),
    )
}

fn synthetic_atlas() -> Result<InMemoryAtlas> {
    let mut atlas = InMemoryAtlas::new().with_region(Region::new(
        ROOT_ACRONYM,
        "root",
        cube(Vec3::splat(-6.0), 12.0)?,
    ));
    let regions = [
        ("MOp", "Primary motor area"),
        ("MOs", "Secondary motor area"),
        ("SSp", "Primary somatosensory area"),
        ("SSs", "Supplemental somatosensory area"),
        ("CP", "Caudoputamen"),
    ];
    for (i, (acronym, name)) in regions.into_iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let origin = Vec3::new(-5.0 + 2.0 * i as f32, 0.0, 0.0);
        atlas.insert(Region::new(acronym, name, cube(origin, 1.5)?));
    }
    Ok(atlas)
}

fn report<P: MeshProvider>(provider: P) -> Result<()> {
    let mut pipeline = Pipeline::new(provider, ApproxVoxelizer, Options::default())?;
    log::info!("{} regions available", pipeline.region_catalogue()?.len());

    let mut session = Session::new();
    session.apply_preset(builtin_presets(), "Ischemic Stroke (MCA)")?;
    session.enable_voxelization(pipeline.options().default_voxel_resolution)?;
    let policy = pipeline.options().severity_policy;

    for severity in [0.0, 0.25, 0.5, 0.75, 1.0] {
        session.set_severity(severity, policy)?;
        let frame = pipeline.run(&session)?;
        for failure in &frame.failures {
            println!("  skipped {}: {}", failure.acronym, failure.error);
        }
        match &frame.volumes {
            Ok(v) => println!(
                "severity {severity:.2}: voxel {:.3} mm³, pathological {:.3} mm³, lesion {:.3} mm³",
                v.total_voxel_volume, v.pathological_volume, v.lesion_volume
            ),
            Err(e) => println!("severity {severity:.2}: volumes unavailable ({e})"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();

    match std::env::args().nth(1) {
        Some(dir) => report(AtlasDirectory::open(dir)?),
        None => report(synthetic_atlas()?),
    }
}
