//! Capability traits for the external collaborators of the metrics engine.
//!
//! The engine only sees the data shapes in this crate ([`Region`], [`Mesh`],
//! [`VoxelGrid`]); atlas and voxelization libraries plug in behind these traits.

use std::collections::BTreeMap;

use crate::error::{NeuroCanvasError, Result};
use crate::mesh::Mesh;
use crate::region::Region;
use crate::voxel_grid::VoxelGrid;

/// Acronym of the whole-brain structure in the atlas.
pub const ROOT_ACRONYM: &str = "root";

/// Source of atlas region meshes.
pub trait MeshProvider {
    /// Returns every region acronym the atlas knows, sorted and without duplicates.
    fn region_acronyms(&self) -> Result<Vec<String>>;

    /// Loads the region with the given acronym.
    ///
    /// Fails with [`NeuroCanvasError::RegionNotFound`] for an unknown acronym.
    fn get_mesh(&self, acronym: &str) -> Result<Region>;

    /// Loads the whole-brain mesh used as scene context.
    fn root_mesh(&self) -> Result<Region> {
        self.get_mesh(ROOT_ACRONYM)
    }

    /// Returns the display name for an acronym, falling back to the acronym itself.
    fn display_name(&self, acronym: &str) -> String {
        self.get_mesh(acronym)
            .map_or_else(|_| acronym.to_string(), |region| region.name().to_string())
    }
}

/// Converts a surface mesh into a voxel occupancy grid.
pub trait Voxelizer {
    /// Voxelizes the interior of `mesh` with voxels of edge length `resolution`.
    fn voxelize(&self, mesh: &Mesh, resolution: f32) -> Result<VoxelGrid>;
}

/// A [`MeshProvider`] over regions held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAtlas {
    regions: BTreeMap<String, Region>,
}

impl InMemoryAtlas {
    /// Creates an empty atlas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region, replacing any region with the same acronym.
    pub fn insert(&mut self, region: Region) {
        self.regions.insert(region.acronym().to_string(), region);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.insert(region);
        self
    }

    /// Returns the number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if the atlas holds no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl MeshProvider for InMemoryAtlas {
    fn region_acronyms(&self) -> Result<Vec<String>> {
        Ok(self.regions.keys().cloned().collect())
    }

    fn get_mesh(&self, acronym: &str) -> Result<Region> {
        self.regions
            .get(acronym)
            .cloned()
            .ok_or_else(|| NeuroCanvasError::RegionNotFound(acronym.to_string()))
    }
}
