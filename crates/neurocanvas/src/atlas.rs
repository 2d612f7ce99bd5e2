//! Atlas reader for BrainGlobe-layout directories.
//!
//! The directory holds a `structures.json` array describing every structure
//! (acronym, numeric id, display name) and one Wavefront mesh per structure
//! at `meshes/<id>.obj`. Meshes are read on demand; caching is the pipeline's
//! job.
//!
//! BrainGlobe meshes are stored in micrometres. Regions are returned in
//! millimetres so volumes come out in mm³.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use neurocanvas_core::{Mesh, MeshProvider, NeuroCanvasError, Region, Result};
use serde::Deserialize;

/// One entry of `structures.json`. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StructureInfo {
    pub acronym: String,
    pub id: u32,
    pub name: String,
}

/// Factor converting BrainGlobe mesh coordinates (µm) to millimetres.
pub const MICROMETRES_TO_MM: f32 = 1e-3;

/// A [`MeshProvider`] over an atlas directory on disk.
#[derive(Debug, Clone)]
pub struct AtlasDirectory {
    root: PathBuf,
    structures: Vec<StructureInfo>,
    mesh_scale: f32,
}

impl AtlasDirectory {
    /// Opens an atlas directory and reads its structure table.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let json = fs::read_to_string(root.join("structures.json"))?;
        let structures: Vec<StructureInfo> = serde_json::from_str(&json)?;
        log::info!(
            "opened atlas at {} ({} structures)",
            root.display(),
            structures.len()
        );
        Ok(Self {
            root,
            structures,
            mesh_scale: MICROMETRES_TO_MM,
        })
    }

    /// Overrides the factor applied to mesh coordinates on load.
    ///
    /// Use `1.0` for atlases whose meshes are already in millimetres.
    pub fn with_mesh_scale(mut self, scale: f32) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(NeuroCanvasError::invalid(
                "mesh_scale",
                format!("{scale} is not a positive factor"),
            ));
        }
        self.mesh_scale = scale;
        Ok(self)
    }

    /// Factor applied to mesh coordinates on load.
    pub fn mesh_scale(&self) -> f32 {
        self.mesh_scale
    }

    /// Returns the structure table.
    pub fn structures(&self) -> &[StructureInfo] {
        &self.structures
    }

    /// Looks up a structure by acronym.
    pub fn structure(&self, acronym: &str) -> Option<&StructureInfo> {
        self.structures.iter().find(|s| s.acronym == acronym)
    }

    /// Path of the mesh file for a structure id.
    pub fn mesh_path(&self, id: u32) -> PathBuf {
        self.root.join("meshes").join(format!("{id}.obj"))
    }
}

impl MeshProvider for AtlasDirectory {
    fn region_acronyms(&self) -> Result<Vec<String>> {
        let acronyms: BTreeSet<&str> = self.structures.iter().map(|s| s.acronym.as_str()).collect();
        Ok(acronyms.into_iter().map(str::to_string).collect())
    }

    fn get_mesh(&self, acronym: &str) -> Result<Region> {
        let info = self
            .structure(acronym)
            .ok_or_else(|| NeuroCanvasError::RegionNotFound(acronym.to_string()))?;
        let mesh = load_obj_mesh(&self.mesh_path(info.id), self.mesh_scale)?;
        Ok(Region::new(&info.acronym, &info.name, mesh))
    }

    fn display_name(&self, acronym: &str) -> String {
        self.structure(acronym)
            .map_or_else(|| acronym.to_string(), |s| s.name.clone())
    }
}

/// Loads a Wavefront OBJ file as a single triangulated mesh, multiplying every
/// coordinate by `scale`.
///
/// All objects in the file are merged into one vertex and face list.
pub fn load_obj_mesh(path: &Path, scale: f32) -> Result<Mesh> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options)
        .map_err(|e| NeuroCanvasError::MeshLoadError(format!("{}: {e}", path.display())))?;

    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for model in &models {
        let offset = u32::try_from(vertices.len()).map_err(|_| {
            NeuroCanvasError::MeshLoadError(format!("{}: too many vertices", path.display()))
        })?;
        vertices.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2]) * scale),
        );
        faces.extend(
            model
                .mesh
                .indices
                .chunks_exact(3)
                .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
        );
    }
    log::debug!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        vertices.len(),
        faces.len()
    );
    Mesh::new(vertices, faces)
}
