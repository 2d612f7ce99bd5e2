//! Configuration options for neurocanvas.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{NeuroCanvasError, Result};
use crate::severity::SeverityPolicy;

/// Named colors used by the default configuration.
pub mod colors {
    use glam::Vec3;

    /// Healthy tissue tone used at severity 0.
    pub const HEALTHY_TISSUE: Vec3 = Vec3::new(0.93, 0.78, 0.73);
    /// Blood red, reached at the lesion breakpoint.
    pub const BLOOD_RED: Vec3 = Vec3::new(0.541, 0.012, 0.012);
    /// Necrotic black, reached at severity 1.
    pub const NECROTIC_BLACK: Vec3 = Vec3::ZERO;
    /// CSS `lightgrey`.
    pub const LIGHT_GREY: Vec3 = Vec3::new(0.827, 0.827, 0.827);
    /// CSS `blue`.
    pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    /// CSS `crimson`.
    pub const CRIMSON: Vec3 = Vec3::new(0.863, 0.078, 0.235);
    /// CSS `mediumseagreen`.
    pub const MEDIUM_SEA_GREEN: Vec3 = Vec3::new(0.235, 0.702, 0.443);
}

/// Stops of the lesion severity gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LesionOptions {
    /// Color at severity 0.
    pub healthy_color: Vec3,
    /// Color at the breakpoint.
    pub blood_color: Vec3,
    /// Color at severity 1.
    pub necrotic_color: Vec3,
    /// Severity at which the gradient switches from the first to the second segment.
    pub breakpoint: f32,
}

impl Default for LesionOptions {
    fn default() -> Self {
        Self {
            healthy_color: colors::HEALTHY_TISSUE,
            blood_color: colors::BLOOD_RED,
            necrotic_color: colors::NECROTIC_BLACK,
            breakpoint: 0.5,
        }
    }
}

/// Global configuration options for neurocanvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Lesion gradient stops.
    pub lesion: LesionOptions,

    /// Handling of out-of-range severity values.
    pub severity_policy: SeverityPolicy,

    /// Name of the colormap used for density heatmaps.
    pub density_colormap: String,

    /// Voxel edge length used when voxelization is switched on without an explicit value.
    pub default_voxel_resolution: f32,

    /// Color of the whole-brain context mesh.
    pub context_color: Vec3,

    /// Opacity of the whole-brain context mesh.
    pub context_opacity: f32,

    /// Colors cycled through for plain highlighted regions.
    pub highlight_palette: Vec<Vec3>,

    /// Opacity of highlighted and pathology-colored regions.
    pub highlight_opacity: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            lesion: LesionOptions::default(),
            severity_policy: SeverityPolicy::Clamp,
            density_colormap: "viridis".to_string(),
            default_voxel_resolution: 0.1,
            context_color: colors::LIGHT_GREY,
            context_opacity: 0.1,
            highlight_palette: vec![colors::BLUE, colors::CRIMSON, colors::MEDIUM_SEA_GREEN],
            highlight_opacity: 1.0,
        }
    }
}

impl Options {
    /// Parses options from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every option is in its legal range.
    pub fn validate(&self) -> Result<()> {
        let t = self.lesion.breakpoint;
        if !(t > 0.0 && t < 1.0) {
            return Err(NeuroCanvasError::invalid(
                "lesion.breakpoint",
                format!("{t} is outside (0, 1)"),
            ));
        }
        let r = self.default_voxel_resolution;
        if !(r.is_finite() && r > 0.0) {
            return Err(NeuroCanvasError::invalid(
                "default_voxel_resolution",
                format!("{r} is not a positive length"),
            ));
        }
        for (name, opacity) in [
            ("context_opacity", self.context_opacity),
            ("highlight_opacity", self.highlight_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(NeuroCanvasError::invalid(
                    name,
                    format!("{opacity} is outside [0, 1]"),
                ));
            }
        }
        if self.highlight_palette.is_empty() {
            return Err(NeuroCanvasError::invalid(
                "highlight_palette",
                "palette has no colors",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Options::default().validate().unwrap();
    }

    #[test]
    fn test_json_partial_override() {
        let options = Options::from_json(r#"{ "lesion": { "breakpoint": 0.3 }, "context_opacity": 0.2 }"#)
            .unwrap();
        assert_eq!(options.lesion.breakpoint, 0.3);
        assert_eq!(options.lesion.blood_color, colors::BLOOD_RED);
        assert_eq!(options.context_opacity, 0.2);
        assert_eq!(options.density_colormap, "viridis");
    }

    #[test]
    fn test_json_roundtrip() {
        let options = Options::default();
        let parsed = Options::from_json(&options.to_json().unwrap()).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_rejects_bad_breakpoint() {
        let err = Options::from_json(r#"{ "lesion": { "breakpoint": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, NeuroCanvasError::InvalidParameter { .. }));
    }

    #[test]
    fn test_rejects_empty_palette() {
        let options = Options {
            highlight_palette: Vec::new(),
            ..Options::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = Options::from_json("{ not json").unwrap_err();
        assert!(matches!(err, NeuroCanvasError::JsonError(_)));
    }
}
