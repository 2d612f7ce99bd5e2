//! Per-session working set.
//!
//! Everything a recomputation pass needs from the user's controls lives in a
//! [`Session`] value that is passed explicitly to the pipeline. Nothing here is
//! process-global; two sessions never observe each other's selections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{NeuroCanvasError, Result};
use crate::preset::PresetRegistry;
use crate::severity::{Severity, SeverityPolicy};

/// How a selected region is colored in a render pass.
///
/// Lesion and density coloring are mutually exclusive for one region in one
/// pass, but each region chooses its mode independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ColorMode {
    /// Uniform color from the highlight palette.
    #[default]
    Highlight,
    /// Severity-driven lesion gradient.
    Lesion,
    /// Centroid-distance density heatmap.
    Density,
}

/// The user's current selections and parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    selected: Vec<String>,
    modes: HashMap<String, ColorMode>,
    default_mode: ColorMode,
    severity: Severity,
    voxel_resolution: Option<f32>,
    active_preset: Option<String>,
    preset_regions: Vec<String>,
}

impl Session {
    /// Creates an empty session: nothing selected, severity 0, voxelization off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selected region acronyms in selection order.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Adds a region to the selection. Re-selecting a region keeps its position.
    pub fn select_region(&mut self, acronym: impl Into<String>) {
        let acronym = acronym.into();
        if !self.selected.contains(&acronym) {
            self.selected.push(acronym);
        }
    }

    /// Removes a region from the selection and forgets its color mode.
    pub fn deselect_region(&mut self, acronym: &str) {
        self.selected.retain(|a| a != acronym);
        self.modes.remove(acronym);
    }

    /// Replaces the whole selection, dropping duplicates.
    pub fn set_selected<I, S>(&mut self, acronyms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        for acronym in acronyms {
            self.select_region(acronym);
        }
        let selected = &self.selected;
        self.modes.retain(|a, _| selected.contains(a));
    }

    /// Populates the selection from a preset and switches its regions to lesion mode.
    pub fn apply_preset(&mut self, registry: &PresetRegistry, id: &str) -> Result<()> {
        let acronyms = registry.resolve(id)?.to_vec();
        self.set_selected(acronyms.iter().cloned());
        for acronym in &acronyms {
            self.modes.insert(acronym.clone(), ColorMode::Lesion);
        }
        log::debug!("applied preset '{id}' ({} regions)", acronyms.len());
        self.active_preset = Some(id.to_string());
        self.preset_regions = acronyms;
        Ok(())
    }

    /// Leaves preset mode. The current selection is kept.
    pub fn clear_preset(&mut self) {
        self.active_preset = None;
        self.preset_regions.clear();
    }

    /// Returns the active preset id, if any.
    #[must_use]
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    /// Regions whose volume counts as pathological.
    ///
    /// With a preset active these are the preset's regions; otherwise the
    /// selected regions in lesion mode.
    #[must_use]
    pub fn pathology_regions(&self) -> Vec<&str> {
        if self.active_preset.is_some() {
            self.preset_regions.iter().map(String::as_str).collect()
        } else {
            self.selected
                .iter()
                .filter(|a| self.mode_for(a) == ColorMode::Lesion)
                .map(String::as_str)
                .collect()
        }
    }

    /// Sets the color mode of one region.
    pub fn set_mode(&mut self, acronym: impl Into<String>, mode: ColorMode) {
        self.modes.insert(acronym.into(), mode);
    }

    /// Sets the mode used by regions without an explicit one.
    pub fn set_default_mode(&mut self, mode: ColorMode) {
        self.default_mode = mode;
    }

    /// Returns the color mode of a region.
    #[must_use]
    pub fn mode_for(&self, acronym: &str) -> ColorMode {
        self.modes.get(acronym).copied().unwrap_or(self.default_mode)
    }

    /// Returns the lesion severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Sets the lesion severity from a raw slider value.
    pub fn set_severity(&mut self, value: f32, policy: SeverityPolicy) -> Result<()> {
        self.severity = Severity::new(value, policy)?;
        Ok(())
    }

    /// Returns the voxel edge length, or `None` if voxelization is off.
    #[must_use]
    pub fn voxel_resolution(&self) -> Option<f32> {
        self.voxel_resolution
    }

    /// Turns voxelization on at the given edge length.
    pub fn enable_voxelization(&mut self, resolution: f32) -> Result<()> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(NeuroCanvasError::invalid(
                "voxel_resolution",
                format!("{resolution} is not a positive length"),
            ));
        }
        self.voxel_resolution = Some(resolution);
        Ok(())
    }

    /// Turns voxelization off.
    pub fn disable_voxelization(&mut self) {
        self.voxel_resolution = None;
    }
}
