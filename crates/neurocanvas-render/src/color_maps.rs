//! Color map system.
//!
//! A colormap is an injected lookup table: an ordered list of stop colors
//! sampled with linear interpolation. Nothing here depends on a plotting
//! library's colormap implementation.

use std::collections::HashMap;

use glam::Vec3;
use neurocanvas_core::{NeuroCanvasError, Result};

/// A color map for mapping scalar values to colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    /// Color map name.
    pub name: String,
    /// Color samples (evenly spaced from 0 to 1).
    pub colors: Vec<Vec3>,
}

impl ColorMap {
    /// Creates a new color map.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Samples the color map at a given value (0 to 1).
    ///
    /// Values outside the unit range are clamped; NaN samples the low end.
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        if self.colors.is_empty() {
            return Vec3::ZERO;
        }

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let n = self.colors.len() - 1;
        if t >= 1.0 {
            return self.colors[n];
        }
        #[allow(clippy::cast_precision_loss)]
        let scaled = t * n as f32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = (scaled.floor() as usize).min(n - 1);
        #[allow(clippy::cast_precision_loss)]
        let frac = scaled - idx as f32;

        self.colors[idx].lerp(self.colors[idx + 1], frac)
    }

    /// Color at the low end of the map.
    pub fn low(&self) -> Vec3 {
        self.sample(0.0)
    }

    /// Color at the high end of the map.
    pub fn high(&self) -> Vec3 {
        self.sample(1.0)
    }
}

/// Registry for managing color maps.
#[derive(Debug, Clone, Default)]
pub struct ColorMapRegistry {
    color_maps: HashMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a new color map registry with default color maps.
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(viridis());

        // Inferno color map
        self.register(ColorMap::new(
            "inferno",
            vec![
                Vec3::new(0.001, 0.000, 0.014),
                Vec3::new(0.087, 0.045, 0.225),
                Vec3::new(0.258, 0.039, 0.406),
                Vec3::new(0.416, 0.090, 0.433),
                Vec3::new(0.578, 0.148, 0.404),
                Vec3::new(0.735, 0.216, 0.330),
                Vec3::new(0.865, 0.317, 0.226),
                Vec3::new(0.954, 0.469, 0.098),
                Vec3::new(0.988, 0.645, 0.040),
                Vec3::new(0.964, 0.837, 0.269),
                Vec3::new(0.988, 0.998, 0.645),
            ],
        ));

        // Reds color map
        self.register(ColorMap::new(
            "reds",
            vec![
                Vec3::new(1.000, 0.961, 0.941),
                Vec3::new(0.996, 0.878, 0.824),
                Vec3::new(0.988, 0.733, 0.631),
                Vec3::new(0.988, 0.573, 0.447),
                Vec3::new(0.984, 0.416, 0.290),
                Vec3::new(0.937, 0.231, 0.173),
                Vec3::new(0.796, 0.094, 0.114),
                Vec3::new(0.647, 0.059, 0.082),
                Vec3::new(0.404, 0.000, 0.051),
            ],
        ));
    }

    /// Registers a color map, replacing any map with the same name.
    ///
    /// Maps without stops are ignored.
    pub fn register(&mut self, color_map: ColorMap) {
        if color_map.colors.is_empty() {
            log::warn!("ignoring color map '{}' with no stops", color_map.name);
            return;
        }
        self.color_maps.insert(color_map.name.clone(), color_map);
    }

    /// Gets a color map by name.
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.get(name)
    }

    /// Gets a color map by name, failing with `InvalidParameter` if absent.
    pub fn require(&self, name: &str) -> Result<&ColorMap> {
        self.get(name).ok_or_else(|| {
            NeuroCanvasError::invalid("colormap", format!("no color map named '{name}'"))
        })
    }

    /// Returns all color map names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.color_maps.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// The perceptually uniform Viridis ramp.
pub fn viridis() -> ColorMap {
    ColorMap::new(
        "viridis",
        vec![
            Vec3::new(0.267, 0.004, 0.329),
            Vec3::new(0.282, 0.140, 0.457),
            Vec3::new(0.253, 0.265, 0.529),
            Vec3::new(0.206, 0.371, 0.553),
            Vec3::new(0.163, 0.471, 0.558),
            Vec3::new(0.127, 0.566, 0.550),
            Vec3::new(0.134, 0.658, 0.517),
            Vec3::new(0.266, 0.749, 0.440),
            Vec3::new(0.477, 0.821, 0.318),
            Vec3::new(0.741, 0.873, 0.150),
            Vec3::new(0.993, 0.906, 0.144),
        ],
    )
}
