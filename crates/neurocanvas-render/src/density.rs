//! Centroid-distance density heatmap.
//!
//! Each vertex is scored by its Euclidean distance to the mesh centroid. Scores
//! are min-max normalized over the vertex set and mapped through a colormap, so
//! the vertex nearest the centroid gets the low end of the ramp and the farthest
//! gets the high end.

use glam::Vec3;
use neurocanvas_core::{centroid_f64, NeuroCanvasError, Result};

use crate::color_field::ColorField;
use crate::color_maps::ColorMap;

/// Relative spread below which all vertices count as equidistant.
const DEGENERATE_RANGE: f64 = 1e-9;

/// Distances to the centroid, min-max normalized into `[0, 1]`.
///
/// A degenerate set (one vertex, or every vertex equidistant from the centroid)
/// maps to `0.0` everywhere. An empty set is a [`NeuroCanvasError::MissingInput`].
pub fn normalized_centroid_distances(vertices: &[Vec3]) -> Result<Vec<f32>> {
    let center = centroid_f64(vertices)
        .ok_or_else(|| NeuroCanvasError::MissingInput("density heatmap needs vertices".into()))?;

    let distances: Vec<f64> = vertices
        .iter()
        .map(|v| v.as_dvec3().distance(center))
        .collect();

    let (min, max) = distances
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });
    let range = max - min;

    if range.is_nan() || range <= DEGENERATE_RANGE * max.max(1.0) {
        log::debug!(
            "density heatmap: {} vertices equidistant from centroid",
            vertices.len()
        );
        return Ok(vec![0.0; vertices.len()]);
    }

    #[allow(clippy::cast_possible_truncation)]
    Ok(distances
        .iter()
        .map(|&d| ((d - min) / range) as f32)
        .collect())
}

/// Colors a vertex set by normalized centroid distance.
pub fn color_density(vertices: &[Vec3], colormap: &ColorMap) -> Result<ColorField> {
    let values = normalized_centroid_distances(vertices)?;
    Ok(ColorField::from_rgb(values.into_iter().map(|t| colormap.sample(t))))
}
