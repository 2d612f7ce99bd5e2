//! Per-vertex color assignments.

use glam::{Vec3, Vec4};

/// RGBA color per mesh vertex, channels in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorField {
    colors: Vec<Vec4>,
}

impl ColorField {
    /// Builds an opaque field from RGB colors.
    pub fn from_rgb(colors: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            colors: colors.into_iter().map(|c| c.extend(1.0)).collect(),
        }
    }

    /// Builds a field with the same opaque color on `len` vertices.
    pub fn uniform(len: usize, color: Vec3) -> Self {
        Self {
            colors: vec![color.extend(1.0); len],
        }
    }

    /// Returns a copy with every alpha channel set to `alpha`.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        for c in &mut self.colors {
            c.w = alpha;
        }
        self
    }

    /// Returns the per-vertex colors.
    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    /// Returns the color of one vertex.
    pub fn get(&self, vertex: usize) -> Option<Vec4> {
        self.colors.get(vertex).copied()
    }

    /// Returns the number of vertices covered.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the field covers no vertices.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Raw byte view, suitable for vertex-buffer upload and exact comparison.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Quantizes to 8-bit RGBA.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        self.colors
            .iter()
            .map(|c| [quantize(c.x), quantize(c.y), quantize(c.z), quantize(c.w)])
            .collect()
    }
}
