//! Pathology presets: named clinical scenarios mapped to atlas regions.
//!
//! The built-in table is static configuration. It is built once on first use and
//! is read-only afterwards, so it is shared between sessions without locking.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{NeuroCanvasError, Result};

/// Qualitative spread of a pathology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LesionExtent {
    /// Confined to one small structure or nucleus.
    Focal,
    /// A contiguous territory spanning several neighbouring structures.
    Regional,
    /// Spread across distant structures.
    Diffuse,
}

/// A named clinical scenario and the regions it affects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathologyPreset {
    id: String,
    acronyms: Vec<String>,
    extent: LesionExtent,
}

impl PathologyPreset {
    /// Creates a preset. The acronym order is kept as given.
    pub fn new<I, S>(id: impl Into<String>, acronyms: I, extent: LesionExtent) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            acronyms: acronyms.into_iter().map(Into::into).collect(),
            extent,
        }
    }

    /// Returns the preset identifier, which is also its display label.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the affected region acronyms in display order.
    #[must_use]
    pub fn acronyms(&self) -> &[String] {
        &self.acronyms
    }

    /// Returns the qualitative extent.
    #[must_use]
    pub fn extent(&self) -> LesionExtent {
        self.extent
    }
}

/// Ordered table of pathology presets.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: Vec<PathologyPreset>,
}

impl PresetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in presets.
    pub fn with_builtin() -> Self {
        Self {
            presets: builtin_table(),
        }
    }

    /// Registers a preset.
    ///
    /// Returns an error if the id is taken, or if the preset names no regions or
    /// repeats one.
    pub fn register(&mut self, preset: PathologyPreset) -> Result<()> {
        if self.get(preset.id()).is_some() {
            return Err(NeuroCanvasError::invalid(
                "preset",
                format!("'{}' already exists", preset.id()),
            ));
        }
        if preset.acronyms.is_empty() {
            return Err(NeuroCanvasError::invalid(
                "preset",
                format!("'{}' names no regions", preset.id()),
            ));
        }
        for (i, acronym) in preset.acronyms.iter().enumerate() {
            if preset.acronyms[..i].contains(acronym) {
                return Err(NeuroCanvasError::invalid(
                    "preset",
                    format!("'{}' lists region '{acronym}' twice", preset.id()),
                ));
            }
        }
        self.presets.push(preset);
        Ok(())
    }

    /// Gets a preset by id.
    pub fn get(&self, id: &str) -> Option<&PathologyPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Returns the ordered acronym set a preset implies.
    pub fn resolve(&self, id: &str) -> Result<&[String]> {
        self.get(id)
            .map(PathologyPreset::acronyms)
            .ok_or_else(|| NeuroCanvasError::UnknownPreset(id.to_string()))
    }

    /// Returns all preset ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.id.as_str())
    }

    /// Returns the number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Returns true if no presets are registered.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

static BUILTIN: OnceLock<PresetRegistry> = OnceLock::new();

/// The shared, read-only built-in preset table.
pub fn builtin_presets() -> &'static PresetRegistry {
    BUILTIN.get_or_init(PresetRegistry::with_builtin)
}

/// Resolves a built-in preset id to its ordered region acronyms.
pub fn resolve_preset(id: &str) -> Result<&'static [String]> {
    builtin_presets().resolve(id)
}

// Allen mouse brain acronyms.
fn builtin_table() -> Vec<PathologyPreset> {
    vec![
        PathologyPreset::new(
            "Ischemic Stroke (MCA)",
            ["MOp", "MOs", "SSp", "SSs", "CP"],
            LesionExtent::Regional,
        ),
        PathologyPreset::new(
            "Hippocampal Sclerosis",
            ["CA1", "CA3", "DG"],
            LesionExtent::Focal,
        ),
        PathologyPreset::new(
            "Parkinson's Disease",
            ["SNc", "CP", "ACB"],
            LesionExtent::Focal,
        ),
        PathologyPreset::new(
            "Alzheimer's Disease",
            ["ENTl", "ENTm", "CA1", "SUB", "ACA"],
            LesionExtent::Diffuse,
        ),
        PathologyPreset::new(
            "Traumatic Brain Injury",
            ["MOp", "SSp", "VISp"],
            LesionExtent::Regional,
        ),
    ]
}
