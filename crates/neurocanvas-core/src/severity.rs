//! Lesion severity parameter.

use serde::{Deserialize, Serialize};

use crate::error::{NeuroCanvasError, Result};

/// How out-of-range severity values are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SeverityPolicy {
    /// Clamp into `[0, 1]` and log a warning.
    #[default]
    Clamp,
    /// Fail with [`NeuroCanvasError::InvalidParameter`].
    Reject,
}

/// A lesion severity in `[0, 1]`.
///
/// `0.0` is healthy tissue and `1.0` is fully necrotic. A `Severity` can only be
/// built through [`Severity::new`], so every value in circulation is in range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Severity(f32);

impl Severity {
    /// Healthy tissue.
    pub const NONE: Self = Self(0.0);
    /// Fully necrotic tissue.
    pub const FULL: Self = Self(1.0);

    /// Validates a raw slider value according to `policy`.
    ///
    /// NaN is rejected under every policy.
    pub fn new(value: f32, policy: SeverityPolicy) -> Result<Self> {
        if value.is_nan() {
            return Err(NeuroCanvasError::invalid("severity", "value is NaN"));
        }
        if (0.0..=1.0).contains(&value) {
            return Ok(Self(value));
        }
        match policy {
            SeverityPolicy::Clamp => {
                let clamped = value.clamp(0.0, 1.0);
                log::warn!("severity {value} outside [0, 1], clamped to {clamped}");
                Ok(Self(clamped))
            }
            SeverityPolicy::Reject => Err(NeuroCanvasError::invalid(
                "severity",
                format!("{value} is outside [0, 1]"),
            )),
        }
    }

    /// Returns the severity as a float in `[0, 1]`.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Severity {
    type Error = NeuroCanvasError;

    fn try_from(value: f32) -> Result<Self> {
        Self::new(value, SeverityPolicy::Reject)
    }
}

impl From<Severity> for f32 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}
