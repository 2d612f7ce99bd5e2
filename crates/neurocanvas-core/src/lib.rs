//! Core types for neurocanvas.
//!
//! This crate provides the data model shared by the metrics engine:
//! - [`Mesh`], [`VoxelGrid`] and [`Region`] geometry
//! - [`Severity`] and the per-session [`Session`] working set
//! - The static [`PathologyPreset`] table and [`resolve_preset`]
//! - [`MeshProvider`] and [`Voxelizer`] capability traits for external collaborators
//! - Configuration [`Options`] and the [`NeuroCanvasError`] taxonomy

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod mesh;
pub mod options;
pub mod preset;
pub mod provider;
pub mod region;
pub mod session;
pub mod severity;
pub mod voxel_grid;

pub use error::{NeuroCanvasError, Result};
pub use mesh::{centroid, centroid_f64, Mesh};
pub use options::{LesionOptions, Options};
pub use preset::{builtin_presets, resolve_preset, LesionExtent, PathologyPreset, PresetRegistry};
pub use provider::{InMemoryAtlas, MeshProvider, Voxelizer, ROOT_ACRONYM};
pub use region::Region;
pub use session::{ColorMode, Session};
pub use severity::{Severity, SeverityPolicy};
pub use voxel_grid::VoxelGrid;

// Re-export glam types for convenience
pub use glam::{Vec3, Vec4};
