//! Volume metrics for neurocanvas.
//!
//! [`estimate_volumes`] turns voxel grids and region meshes into the three
//! scalars shown next to the scene: total voxel volume, pathological volume,
//! and lesion volume.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod volume;

pub use volume::{
    estimate_volumes, lesion_volume, region_volume, summarize_volumes, total_voxel_volume,
    RegionVolume, VolumeEstimate, VolumeInput, VolumeSource,
};
