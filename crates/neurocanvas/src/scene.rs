//! Scene assembly handed to the presentation layer.
//!
//! A [`Scene`] is an ordered list of layers: the whole-brain context mesh
//! first, then one layer per selected region. Layers share region geometry
//! through [`Arc`] so assembling a scene never copies vertex data.

use std::sync::Arc;

use glam::Vec3;
use neurocanvas_core::{ColorMode, Region, Result, VoxelGrid};
use neurocanvas_metrics::VolumeEstimate;
use neurocanvas_render::ColorField;

use crate::pipeline::RegionFailure;

/// How a layer is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerColor {
    /// One color for the whole mesh.
    Uniform { color: Vec3, opacity: f32 },
    /// One RGBA color per vertex.
    PerVertex(ColorField),
}

/// A single mesh in the scene.
#[derive(Debug, Clone)]
pub struct SceneLayer {
    /// Legend label.
    pub name: String,
    /// Region geometry.
    pub region: Arc<Region>,
    /// Coloring of the mesh.
    pub color: LayerColor,
    /// Coloring mode that produced `color`; `None` for the context layer.
    pub mode: Option<ColorMode>,
    /// Voxel grid when voxelization is active.
    pub voxels: Option<VoxelGrid>,
    /// Whether hovering the layer shows its label.
    pub hoverable: bool,
}

/// Ordered collection of layers.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    layers: Vec<SceneLayer>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer.
    pub fn push(&mut self, layer: SceneLayer) {
        self.layers.push(layer);
    }

    /// Returns the layers in draw order.
    pub fn layers(&self) -> &[SceneLayer] {
        &self.layers
    }

    /// Gets a layer by legend label.
    pub fn layer(&self, name: &str) -> Option<&SceneLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Returns the number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if the scene has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Axis-aligned bounding box over all layers, or `None` if nothing has extent.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        self.layers
            .iter()
            .filter_map(|l| l.region.mesh().bounding_box())
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }

    /// Representative length scale: the diagonal of the bounding box.
    pub fn length_scale(&self) -> f32 {
        self.bounding_box()
            .map_or(1.0, |(min, max)| (max - min).length())
    }
}

/// Output of one recomputation pass.
#[derive(Debug)]
pub struct Frame {
    /// Layers to draw.
    pub scene: Scene,
    /// Volume scalars, or the reason they could not be computed.
    pub volumes: Result<VolumeEstimate>,
    /// Regions that could not be drawn this pass.
    pub failures: Vec<RegionFailure>,
}

/// Presentation layer that draws a frame.
pub trait Renderer {
    /// Draws the frame, replacing whatever was drawn before.
    fn render(&mut self, frame: &Frame) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use neurocanvas_core::Mesh;

    fn layer(name: &str, offset: Vec3) -> SceneLayer {
        let mesh = Mesh::new(
            vec![offset, offset + Vec3::X, offset + Vec3::Y],
            vec![[0, 1, 2]],
        )
        .unwrap();
        SceneLayer {
            name: name.to_string(),
            region: Arc::new(Region::new(name, name, mesh)),
            color: LayerColor::Uniform {
                color: Vec3::ONE,
                opacity: 1.0,
            },
            mode: None,
            voxels: None,
            hoverable: true,
        }
    }

    #[test]
    fn test_extents() {
        let mut scene = Scene::new();
        assert!(scene.bounding_box().is_none());
        assert_eq!(scene.length_scale(), 1.0);

        scene.push(layer("a", Vec3::ZERO));
        scene.push(layer("b", Vec3::new(2.0, 2.0, 0.0)));
        assert_eq!(
            scene.bounding_box(),
            Some((Vec3::ZERO, Vec3::new(3.0, 3.0, 0.0)))
        );
        assert!(scene.layer("b").is_some());
        assert!(scene.layer("c").is_none());
    }
}
