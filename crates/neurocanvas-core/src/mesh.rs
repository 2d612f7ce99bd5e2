//! Triangle mesh geometry for atlas regions.
//!
//! A [`Mesh`] is read-only once built: the metrics engine only ever borrows it.
//! Derived quantities (centroid, bounds, enclosed volume) are computed on demand
//! and accumulate in double precision so repeated passes agree bit for bit.

use glam::{DVec3, Vec3};

use crate::error::{NeuroCanvasError, Result};

/// A triangle surface mesh: vertex positions plus index triples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from vertices and triangle faces.
    ///
    /// Fails with [`NeuroCanvasError::InvalidParameter`] if any face references a
    /// vertex that does not exist.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        let n = vertices.len();
        if let Some(face) = faces
            .iter()
            .find(|face| face.iter().any(|&vi| vi as usize >= n))
        {
            return Err(NeuroCanvasError::invalid(
                "faces",
                format!("face {face:?} references a vertex outside 0..{n}"),
            ));
        }
        Ok(Self { vertices, faces })
    }

    /// Creates a mesh from arbitrary polygon faces using fan triangulation.
    ///
    /// For a polygon `[v0, v1, v2, v3, ...]` the triangles are
    /// `[v0, v1, v2], [v0, v2, v3], ...`. Polygons with fewer than three
    /// vertices are dropped.
    pub fn from_polygons(vertices: Vec<Vec3>, polygons: &[Vec<u32>]) -> Result<Self> {
        let mut faces = Vec::with_capacity(polygons.len());
        for polygon in polygons {
            if polygon.len() < 3 {
                continue;
            }
            let v0 = polygon[0];
            for i in 1..(polygon.len() - 1) {
                faces.push([v0, polygon[i], polygon[i + 1]]);
            }
        }
        Self::new(vertices, faces)
    }

    /// Returns the vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Returns the triangle faces.
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Arithmetic mean of the vertex positions, or `None` for an empty mesh.
    #[must_use]
    pub fn centroid(&self) -> Option<Vec3> {
        centroid(&self.vertices)
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(min, max), &v| (min.min(v), max.max(v))),
        )
    }

    /// Volume enclosed by the surface, in cubed mesh units.
    ///
    /// Sums signed tetrahedra spanned by the origin and each triangle. The result
    /// is exact for closed, consistently oriented surfaces; the absolute value is
    /// returned so inward-facing winding gives the same answer.
    #[must_use]
    pub fn enclosed_volume(&self) -> f64 {
        let signed: f64 = self
            .faces
            .iter()
            .map(|&[a, b, c]| {
                let v0 = self.vertices[a as usize].as_dvec3();
                let v1 = self.vertices[b as usize].as_dvec3();
                let v2 = self.vertices[c as usize].as_dvec3();
                v0.dot(v1.cross(v2))
            })
            .sum();
        (signed / 6.0).abs()
    }
}

/// Arithmetic mean of a set of positions, or `None` if the set is empty.
#[must_use]
pub fn centroid(vertices: &[Vec3]) -> Option<Vec3> {
    centroid_f64(vertices).map(|c| c.as_vec3())
}

/// Double-precision [`centroid`], for callers that measure distances to it.
#[must_use]
pub fn centroid_f64(vertices: &[Vec3]) -> Option<DVec3> {
    if vertices.is_empty() {
        return None;
    }
    let sum: DVec3 = vertices.iter().map(|v| v.as_dvec3()).sum();
    #[allow(clippy::cast_precision_loss)]
    let n = vertices.len() as f64;
    Some(sum / n)
}
