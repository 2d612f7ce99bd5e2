//! Per-vertex coloring for neurocanvas.
//!
//! This crate turns region meshes into [`ColorField`]s:
//! - [`color_lesion`] - severity-driven healthy → blood red → necrotic gradient
//! - [`color_density`] - centroid-distance heatmap through a [`ColorMap`]
//! - [`ColorMapRegistry`] - named colormap lookup tables (Viridis by default)
//!
//! All functions are pure: identical inputs give byte-identical fields.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod color_field;
pub mod color_maps;
pub mod density;
pub mod lesion;

pub use color_field::ColorField;
pub use color_maps::{viridis, ColorMap, ColorMapRegistry};
pub use density::{color_density, normalized_centroid_distances};
pub use lesion::{color_lesion, LesionGradient};
