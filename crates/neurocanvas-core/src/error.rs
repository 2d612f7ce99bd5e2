//! Error types for neurocanvas.

use thiserror::Error;

/// The main error type for neurocanvas operations.
#[derive(Error, Debug)]
pub enum NeuroCanvasError {
    /// A parameter was outside its legal range (severity, resolution, breakpoint, ...).
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A mesh or voxel grid required by a computation was absent.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// No atlas region with the given acronym.
    #[error("region '{0}' not found")]
    RegionNotFound(String),

    /// No pathology preset with the given identifier.
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    /// A mesh file could not be parsed.
    #[error("mesh load error: {0}")]
    MeshLoadError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl NeuroCanvasError {
    /// Shorthand for building an [`NeuroCanvasError::InvalidParameter`].
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for neurocanvas operations.
pub type Result<T> = std::result::Result<T, NeuroCanvasError>;
