//! The recomputation pass.
//!
//! Every user interaction runs one synchronous pass over the current
//! [`Session`]: fetch meshes, voxelize if enabled, color each region, estimate
//! volumes, assemble the scene. Region meshes and voxel grids are memoised per
//! pipeline, so a pass only hits the collaborators for data it has not seen.
//! A failure for one region is recorded and the pass carries on.

use std::collections::HashMap;
use std::sync::Arc;

use neurocanvas_core::{
    ColorMode, MeshProvider, NeuroCanvasError, Options, Region, Result, Session, Voxelizer,
    VoxelGrid,
};
use neurocanvas_metrics::{region_volume, summarize_volumes, VolumeEstimate, VolumeInput};
use neurocanvas_render::{
    color_density, color_lesion, ColorMap, ColorMapRegistry, LesionGradient,
};

use crate::scene::{Frame, LayerColor, Renderer, Scene, SceneLayer};

/// Legend label of the whole-brain context layer.
pub const CONTEXT_LAYER_NAME: &str = "Whole Brain";

/// A region that could not be drawn in a pass.
#[derive(Debug)]
pub struct RegionFailure {
    /// Acronym of the region that failed.
    pub acronym: String,
    /// Why it could not be drawn.
    pub error: NeuroCanvasError,
}

/// Runs recomputation passes against a mesh provider and a voxelizer.
pub struct Pipeline<P, V> {
    provider: P,
    voxelizer: V,
    options: Options,
    gradient: LesionGradient,
    colormap: ColorMap,
    regions: HashMap<String, Arc<Region>>,
    root: Option<Arc<Region>>,
    voxel_grids: HashMap<(String, u32), VoxelGrid>,
}

impl<P: MeshProvider, V: Voxelizer> Pipeline<P, V> {
    /// Creates a pipeline. The options are validated and the density colormap
    /// is looked up by name in the default registry.
    pub fn new(provider: P, voxelizer: V, options: Options) -> Result<Self> {
        options.validate()?;
        let gradient = LesionGradient::new(&options.lesion)?;
        let colormap = ColorMapRegistry::new()
            .require(&options.density_colormap)?
            .clone();
        Ok(Self {
            provider,
            voxelizer,
            options,
            gradient,
            colormap,
            regions: HashMap::new(),
            root: None,
            voxel_grids: HashMap::new(),
        })
    }

    /// Replaces the density colormap.
    #[must_use]
    pub fn with_colormap(mut self, colormap: ColorMap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Returns the options in use.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the mesh provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the voxelizer.
    pub fn voxelizer(&self) -> &V {
        &self.voxelizer
    }

    /// Every region acronym the atlas offers for selection.
    pub fn region_catalogue(&self) -> Result<Vec<String>> {
        let mut acronyms = self.provider.region_acronyms()?;
        acronyms.sort_unstable();
        acronyms.dedup();
        Ok(acronyms)
    }

    /// Drops all memoised meshes and voxel grids.
    pub fn clear_cache(&mut self) {
        self.regions.clear();
        self.root = None;
        self.voxel_grids.clear();
    }

    /// Runs one pass and hands the frame to `renderer`.
    pub fn render_with<R: Renderer>(&mut self, session: &Session, renderer: &mut R) -> Result<Frame> {
        let frame = self.run(session)?;
        renderer.render(&frame)?;
        Ok(frame)
    }

    /// Runs one recomputation pass.
    ///
    /// Fails only if the whole-brain context mesh cannot be loaded. Per-region
    /// failures are reported in [`Frame::failures`], and volume failures in
    /// [`Frame::volumes`].
    pub fn run(&mut self, session: &Session) -> Result<Frame> {
        let root = self.root()?;
        let mut scene = Scene::new();
        scene.push(SceneLayer {
            name: CONTEXT_LAYER_NAME.to_string(),
            region: root,
            color: LayerColor::Uniform {
                color: self.options.context_color,
                opacity: self.options.context_opacity,
            },
            mode: None,
            voxels: None,
            hoverable: false,
        });

        let mut failures = Vec::new();
        for (i, acronym) in session.selected().iter().enumerate() {
            match self.build_layer(session, i, acronym) {
                Ok(layer) => scene.push(layer),
                Err(error) => {
                    log::warn!("error loading {acronym}: {error}");
                    failures.push(RegionFailure {
                        acronym: acronym.clone(),
                        error,
                    });
                }
            }
        }

        let volumes = self.estimate(session);
        if let Err(e) = &volumes {
            log::warn!("volumes not computed: {e}");
        }

        log::debug!(
            "pass complete: {} layers, {} failures",
            scene.len(),
            failures.len()
        );
        Ok(Frame {
            scene,
            volumes,
            failures,
        })
    }

    fn build_layer(&mut self, session: &Session, index: usize, acronym: &str) -> Result<SceneLayer> {
        let region = self.region(acronym)?;
        let voxels = match session.voxel_resolution() {
            Some(resolution) => Some(self.voxelize(&region, resolution)?),
            None => None,
        };

        let mode = session.mode_for(acronym);
        let vertices = region.mesh().vertices();
        let color = match mode {
            ColorMode::Highlight => {
                let palette = &self.options.highlight_palette;
                LayerColor::Uniform {
                    color: palette[index % palette.len()],
                    opacity: self.options.highlight_opacity,
                }
            }
            ColorMode::Lesion => LayerColor::PerVertex(
                color_lesion(vertices, session.severity(), &self.gradient)
                    .with_alpha(self.options.highlight_opacity),
            ),
            ColorMode::Density => LayerColor::PerVertex(
                color_density(vertices, &self.colormap)?
                    .with_alpha(self.options.highlight_opacity),
            ),
        };

        Ok(SceneLayer {
            name: acronym.to_string(),
            region,
            color,
            mode: Some(mode),
            voxels,
            hoverable: true,
        })
    }

    fn estimate(&mut self, session: &Session) -> Result<VolumeEstimate> {
        let pathology = session.pathology_regions();
        let mut acronyms: Vec<&str> = session.selected().iter().map(String::as_str).collect();
        for acronym in &pathology {
            if !acronyms.contains(acronym) {
                acronyms.push(*acronym);
            }
        }

        let mut regions = Vec::with_capacity(acronyms.len());
        for acronym in acronyms {
            let pathological = pathology.contains(&acronym);
            let measured = self.region(acronym).and_then(|region| {
                let voxels = match session.voxel_resolution() {
                    Some(resolution) => Some(self.voxelize(&region, resolution)?),
                    None => None,
                };
                region_volume(&VolumeInput {
                    acronym,
                    voxels,
                    mesh: Some(region.mesh()),
                    pathological,
                })
            });
            match measured {
                Ok(volume) => regions.push(volume),
                // Only pathology volumes depend on it.
                Err(error) if !pathological => {
                    log::debug!("{acronym} left out of volume totals: {error}");
                }
                Err(error) => return Err(error),
            }
        }
        summarize_volumes(regions, session.severity())
    }

    fn root(&mut self) -> Result<Arc<Region>> {
        if let Some(root) = &self.root {
            return Ok(Arc::clone(root));
        }
        let root = Arc::new(self.provider.root_mesh()?);
        log::info!(
            "loaded whole-brain mesh: {} vertices, {} faces",
            root.mesh().num_vertices(),
            root.mesh().num_faces()
        );
        self.root = Some(Arc::clone(&root));
        Ok(root)
    }

    fn region(&mut self, acronym: &str) -> Result<Arc<Region>> {
        if let Some(region) = self.regions.get(acronym) {
            return Ok(Arc::clone(region));
        }
        let region = Arc::new(self.provider.get_mesh(acronym)?);
        log::debug!(
            "loaded region {acronym}: {} vertices",
            region.mesh().num_vertices()
        );
        self.regions
            .insert(acronym.to_string(), Arc::clone(&region));
        Ok(region)
    }

    fn voxelize(&mut self, region: &Region, resolution: f32) -> Result<VoxelGrid> {
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(NeuroCanvasError::invalid(
                "voxel_resolution",
                format!("{resolution} is not a positive length"),
            ));
        }
        let key = (region.acronym().to_string(), resolution.to_bits());
        if let Some(grid) = self.voxel_grids.get(&key) {
            return Ok(*grid);
        }
        let grid = self.voxelizer.voxelize(region.mesh(), resolution)?;
        log::debug!(
            "voxelized {} at {resolution}: {} voxels",
            region.acronym(),
            grid.occupied_count()
        );
        self.voxel_grids.insert(key, grid);
        Ok(grid)
    }
}
