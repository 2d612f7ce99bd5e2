//! Atlas regions.

use crate::mesh::Mesh;

/// An atlas-defined anatomical structure with its surface mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    acronym: String,
    name: String,
    mesh: Mesh,
}

impl Region {
    /// Creates a region.
    pub fn new(acronym: impl Into<String>, name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            acronym: acronym.into(),
            name: name.into(),
            mesh,
        }
    }

    /// Returns the atlas acronym (e.g. `CA1`).
    #[must_use]
    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    /// Returns the display name, e.g. `Field CA1`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the region mesh.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}
