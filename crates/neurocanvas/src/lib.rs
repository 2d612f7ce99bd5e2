//! neurocanvas: lesion simulation and volume metrics over a mouse-brain atlas.
//!
//! A session selects atlas regions (by hand or from a pathology preset), sets a
//! lesion severity and optionally a voxel resolution. Each interaction runs one
//! [`Pipeline`] pass that colors every selected region and estimates volumes,
//! producing a [`Frame`] for the presentation layer.
//!
//! # Quick Start
//!
//! ```no_run
//! use neurocanvas::*;
//!
//! struct NoVoxels;
//!
//! impl Voxelizer for NoVoxels {
//!     fn voxelize(&self, _mesh: &Mesh, resolution: f32) -> Result<VoxelGrid> {
//!         Ok(VoxelGrid::new(0, resolution))
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let atlas = AtlasDirectory::open("allen_mouse_100um")?;
//!     let mut pipeline = Pipeline::new(atlas, NoVoxels, Options::default())?;
//!
//!     let mut session = Session::new();
//!     session.apply_preset(builtin_presets(), "Ischemic Stroke (MCA)")?;
//!     session.set_severity(0.7, SeverityPolicy::Clamp)?;
//!
//!     let frame = pipeline.run(&session)?;
//!     if let Ok(volumes) = &frame.volumes {
//!         println!("lesion volume: {:.3} mm³", volumes.lesion_volume);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Collaborators
//!
//! - [`MeshProvider`] - atlas access ([`AtlasDirectory`], [`InMemoryAtlas`])
//! - [`Voxelizer`] - surface-to-grid conversion
//! - [`Renderer`] - draws a [`Frame`]

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod atlas;
mod init;
pub mod pipeline;
pub mod scene;

pub use atlas::{load_obj_mesh, AtlasDirectory, StructureInfo, MICROMETRES_TO_MM};
pub use init::init_logging;
pub use pipeline::{Pipeline, RegionFailure, CONTEXT_LAYER_NAME};
pub use scene::{Frame, LayerColor, Renderer, Scene, SceneLayer};

// Re-export core types
pub use neurocanvas_core::{
    builtin_presets, centroid, resolve_preset, ColorMode, InMemoryAtlas, LesionExtent,
    LesionOptions, Mesh, MeshProvider, NeuroCanvasError, Options, PathologyPreset,
    PresetRegistry, Region, Result, Session, Severity, SeverityPolicy, VoxelGrid, Voxelizer,
    ROOT_ACRONYM,
};
pub use neurocanvas_core::options::colors;

// Re-export coloring
pub use neurocanvas_render::{
    color_density, color_lesion, normalized_centroid_distances, viridis, ColorField, ColorMap,
    ColorMapRegistry, LesionGradient,
};

// Re-export metrics
pub use neurocanvas_metrics::{
    estimate_volumes, lesion_volume, region_volume, summarize_volumes, total_voxel_volume,
    RegionVolume, VolumeEstimate, VolumeInput, VolumeSource,
};

pub use glam::{Vec3, Vec4};
