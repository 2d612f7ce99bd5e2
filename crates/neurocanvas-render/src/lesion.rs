//! Lesion severity coloring.
//!
//! Severity drives a three-stop RGB gradient: healthy tissue at 0, blood red at
//! the breakpoint, necrotic black at 1. Every vertex of a lesioned region gets
//! the same color, since severity applies uniformly to the region.

use glam::Vec3;
use neurocanvas_core::{LesionOptions, NeuroCanvasError, Result, Severity};

use crate::color_field::ColorField;

/// A validated lesion gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LesionGradient {
    healthy: Vec3,
    blood: Vec3,
    necrotic: Vec3,
    breakpoint: f32,
}

impl Default for LesionGradient {
    fn default() -> Self {
        let options = LesionOptions::default();
        Self {
            healthy: options.healthy_color,
            blood: options.blood_color,
            necrotic: options.necrotic_color,
            breakpoint: options.breakpoint,
        }
    }
}

impl LesionGradient {
    /// Builds a gradient from configuration.
    ///
    /// The breakpoint must lie strictly inside `(0, 1)` and every stop channel
    /// inside `[0, 1]`.
    pub fn new(options: &LesionOptions) -> Result<Self> {
        let t = options.breakpoint;
        if !(t > 0.0 && t < 1.0) {
            return Err(NeuroCanvasError::invalid(
                "lesion.breakpoint",
                format!("{t} is outside (0, 1)"),
            ));
        }
        for (name, color) in [
            ("lesion.healthy_color", options.healthy_color),
            ("lesion.blood_color", options.blood_color),
            ("lesion.necrotic_color", options.necrotic_color),
        ] {
            if !is_valid_color(color) {
                return Err(NeuroCanvasError::invalid(
                    name,
                    format!("{color} has a channel outside [0, 1]"),
                ));
            }
        }
        Ok(Self {
            healthy: options.healthy_color,
            blood: options.blood_color,
            necrotic: options.necrotic_color,
            breakpoint: t,
        })
    }

    /// Color at severity 0.
    pub fn healthy(&self) -> Vec3 {
        self.healthy
    }

    /// Color at severity 1.
    pub fn necrotic(&self) -> Vec3 {
        self.necrotic
    }

    /// Severity separating the two gradient segments.
    pub fn breakpoint(&self) -> f32 {
        self.breakpoint
    }

    /// Interpolated tissue color for a severity.
    pub fn color_at(&self, severity: Severity) -> Vec3 {
        let s = severity.value();
        let t = self.breakpoint;
        if s <= 0.0 {
            self.healthy
        } else if s >= 1.0 {
            self.necrotic
        } else if s <= t {
            self.healthy.lerp(self.blood, s / t)
        } else {
            self.blood.lerp(self.necrotic, (s - t) / (1.0 - t))
        }
    }
}

/// Colors every vertex of a lesioned region for the given severity.
pub fn color_lesion(vertices: &[Vec3], severity: Severity, gradient: &LesionGradient) -> ColorField {
    let color = gradient.color_at(severity);
    log::debug!(
        "lesion coloring: {} vertices at severity {:.3}",
        vertices.len(),
        severity.value()
    );
    ColorField::uniform(vertices.len(), color)
}

fn is_valid_color(color: Vec3) -> bool {
    color.is_finite() && color.min_element() >= 0.0 && color.max_element() <= 1.0
}
