//! Voxel occupancy summary produced by a [`Voxelizer`](crate::provider::Voxelizer).

use serde::{Deserialize, Serialize};

use crate::error::{NeuroCanvasError, Result};

/// Triangles needed to draw one voxel as a closed cube.
pub const TRIANGLES_PER_VOXEL: u64 = 12;

/// Occupancy of a mesh discretized at a fixed voxel edge length.
///
/// The grid is recomputed whenever the source mesh or resolution changes and is
/// never persisted. Values are stored as reported by the voxelizer; validity of
/// the edge length is checked when a volume is requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoxelGrid {
    occupied_count: u64,
    voxel_size: f32,
}

impl VoxelGrid {
    /// Creates a grid summary from an occupied-voxel count and edge length.
    pub fn new(occupied_count: u64, voxel_size: f32) -> Self {
        Self {
            occupied_count,
            voxel_size,
        }
    }

    /// Number of occupied voxels.
    #[must_use]
    pub fn occupied_count(&self) -> u64 {
        self.occupied_count
    }

    /// Voxel edge length in physical units.
    #[must_use]
    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Triangle count of the cube mesh that draws every occupied voxel.
    #[must_use]
    pub fn cube_triangle_count(&self) -> u64 {
        self.occupied_count.saturating_mul(TRIANGLES_PER_VOXEL)
    }

    /// Total occupied volume: `occupied_count * voxel_size^3`.
    ///
    /// An empty grid yields `0.0` for any edge length. A non-positive or
    /// non-finite edge length on a non-empty grid is a
    /// [`NeuroCanvasError::MissingInput`].
    pub fn total_volume(&self) -> Result<f64> {
        if self.occupied_count == 0 {
            return Ok(0.0);
        }
        let edge = f64::from(self.voxel_size);
        if !edge.is_finite() || edge <= 0.0 {
            return Err(NeuroCanvasError::MissingInput(format!(
                "voxel grid has no usable edge length ({})",
                self.voxel_size
            )));
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.occupied_count as f64;
        let volume = count * edge.powi(3);
        if volume.is_finite() {
            Ok(volume)
        } else {
            Err(NeuroCanvasError::invalid(
                "voxel_grid",
                format!("volume of {} voxels overflows", self.occupied_count),
            ))
        }
    }
}
