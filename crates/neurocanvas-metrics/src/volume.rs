//! Volume estimation.
//!
//! Volumes are reported in cubed physical units (mm³ when meshes and voxel
//! sizes are in millimetres). A region contributes its voxel volume when a
//! voxel grid is available and its mesh-enclosed volume otherwise.

use neurocanvas_core::{Mesh, NeuroCanvasError, Result, Severity, VoxelGrid};
use serde::{Deserialize, Serialize};

/// Geometry available for one region.
#[derive(Debug, Clone, Copy)]
pub struct VolumeInput<'a> {
    /// Region acronym, used in error messages and the per-region breakdown.
    pub acronym: &'a str,
    /// Voxel grid, present when voxelization is active.
    pub voxels: Option<VoxelGrid>,
    /// Surface mesh, used when there is no voxel grid.
    pub mesh: Option<&'a Mesh>,
    /// Whether the region belongs to the active pathology.
    pub pathological: bool,
}

impl<'a> VolumeInput<'a> {
    /// A region measured by its voxel grid.
    pub fn voxels(acronym: &'a str, grid: VoxelGrid) -> Self {
        Self {
            acronym,
            voxels: Some(grid),
            mesh: None,
            pathological: false,
        }
    }

    /// A region measured by its enclosed mesh volume.
    pub fn mesh(acronym: &'a str, mesh: &'a Mesh) -> Self {
        Self {
            acronym,
            voxels: None,
            mesh: Some(mesh),
            pathological: false,
        }
    }

    /// Marks the region as part of the active pathology.
    #[must_use]
    pub fn pathological(mut self, pathological: bool) -> Self {
        self.pathological = pathological;
        self
    }
}

/// Where a region's volume came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeSource {
    /// Occupied voxel count times voxel edge cubed.
    Voxels,
    /// Volume enclosed by the surface mesh.
    Mesh,
}

/// Volume of a single region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionVolume {
    /// Region acronym.
    pub acronym: String,
    /// Volume in cubed physical units.
    pub volume: f64,
    /// Geometry the volume was measured from.
    pub source: VolumeSource,
    /// Whether the volume counts toward the pathological total.
    pub pathological: bool,
}

/// Scalar volume outputs of one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    /// Sum of voxel volumes over every region with a voxel grid.
    pub total_voxel_volume: f64,
    /// Sum of region volumes over the pathological regions.
    pub pathological_volume: f64,
    /// Pathological volume scaled linearly by severity.
    pub lesion_volume: f64,
    /// Per-region breakdown in input order.
    pub regions: Vec<RegionVolume>,
}

/// Volume of one voxel grid: `occupied_count * edge^3`.
pub fn total_voxel_volume(grid: &VoxelGrid) -> Result<f64> {
    grid.total_volume()
}

/// Lesioned share of a pathological volume.
///
/// Linear in severity: `0` at severity 0 and the whole pathological volume at 1.
pub fn lesion_volume(pathological_volume: f64, severity: Severity) -> f64 {
    pathological_volume * f64::from(severity.value())
}

/// Volume of one region from whichever geometry it has.
pub fn region_volume(input: &VolumeInput<'_>) -> Result<RegionVolume> {
    let (volume, source) = match (input.voxels, input.mesh) {
        (Some(grid), _) => (grid.total_volume()?, VolumeSource::Voxels),
        (None, Some(mesh)) if !mesh.is_empty() => (mesh.enclosed_volume(), VolumeSource::Mesh),
        (None, _) => {
            return Err(NeuroCanvasError::MissingInput(format!(
                "region '{}' has neither a voxel grid nor a mesh",
                input.acronym
            )))
        }
    };
    Ok(RegionVolume {
        acronym: input.acronym.to_string(),
        volume,
        source,
        pathological: input.pathological,
    })
}

/// Computes total voxel, pathological and lesion volumes.
///
/// Fails with [`NeuroCanvasError::MissingInput`] if any region lacks geometry
/// or has a voxel grid with an unusable edge length.
pub fn estimate_volumes(inputs: &[VolumeInput<'_>], severity: Severity) -> Result<VolumeEstimate> {
    let regions = inputs
        .iter()
        .map(region_volume)
        .collect::<Result<Vec<_>>>()?;
    summarize_volumes(regions, severity)
}

/// Aggregates already measured regions into the three volume scalars.
pub fn summarize_volumes(
    regions: Vec<RegionVolume>,
    severity: Severity,
) -> Result<VolumeEstimate> {
    let total_voxel_volume = finite_sum(
        "total_voxel_volume",
        regions
            .iter()
            .filter(|r| r.source == VolumeSource::Voxels)
            .map(|r| r.volume),
    )?;
    let pathological_volume = finite_sum(
        "pathological_volume",
        regions.iter().filter(|r| r.pathological).map(|r| r.volume),
    )?;
    let lesion_volume = lesion_volume(pathological_volume, severity);

    log::debug!(
        "volumes over {} regions: voxel {total_voxel_volume:.4}, pathological {pathological_volume:.4}, lesion {lesion_volume:.4}",
        regions.len()
    );

    Ok(VolumeEstimate {
        total_voxel_volume,
        pathological_volume,
        lesion_volume,
        regions,
    })
}

fn finite_sum(name: &str, values: impl Iterator<Item = f64>) -> Result<f64> {
    let sum: f64 = values.sum();
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(NeuroCanvasError::invalid(name, "sum is not finite"))
    }
}
