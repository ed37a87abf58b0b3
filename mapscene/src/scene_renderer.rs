//! Composition of the scene from all visible layers.

use std::sync::Arc;

use ahash::HashMap;
use mapscene_types::Size;
use web_time::Instant;

use crate::error::MapsceneError;
use crate::feature::Feature;
use crate::layer::renderer::{render_layer, FeatureUsage};
use crate::layer::Layer;
use crate::options::{CacheEviction, RenderOptions};
use crate::render::dispatch::RenderContext;
use crate::render::{GeometryRenderer, LabelRenderer, SceneExporter};
use crate::scene::{LayerGroup, Scene};
use crate::viewport::Viewport;
use crate::visibility::Visibility;

/// Builds the [`Scene`] for a viewport from a list of layers.
///
/// The renderer owns the scene it produces and reuses it between frames: every call to
/// [`SceneRenderer::render`] replaces the content of the scene with the groups for the new
/// viewport.
pub struct SceneRenderer {
    geometry_renderer: Box<dyn GeometryRenderer>,
    label_renderer: Box<dyn LabelRenderer>,
    options: RenderOptions,
    scene: Scene,
}

impl SceneRenderer {
    /// Creates a new renderer with default options.
    pub fn new(
        geometry_renderer: impl GeometryRenderer + 'static,
        label_renderer: impl LabelRenderer + 'static,
    ) -> Self {
        Self {
            geometry_renderer: Box::new(geometry_renderer),
            label_renderer: Box::new(label_renderer),
            options: RenderOptions::default(),
            scene: Scene::default(),
        }
    }

    /// Sets the options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Replaces the options. Takes effect on the next render.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// The scene produced by the last render.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Renders the layers for the viewport. Layers are given bottom first.
    ///
    /// Layers that are disabled or not visible at the viewport resolution get no group. A layer
    /// that fails to render gets an empty [degraded](LayerGroup::is_degraded) group, and the
    /// rest of the layers are rendered normally.
    pub fn render<'a>(
        &mut self,
        viewport: &Viewport,
        layers: impl IntoIterator<Item = &'a Layer>,
    ) -> &Scene {
        let start = Instant::now();
        let ctx = self.context(viewport);
        let resolution = viewport.resolution();

        let mut groups = vec![];
        let mut usage = vec![];
        for layer in layers {
            if !layer.is_visible_at(resolution) {
                log::trace!("Layer {} is not visible at resolution {resolution}", layer.name());
                continue;
            }

            let rendered = render_layer(&ctx, layer);
            groups.push(rendered.group);
            usage.extend(rendered.usage);
        }

        if self.options.cache_eviction == CacheEviction::Unused {
            evict_unused(usage);
        }

        self.scene.clear();
        for group in groups {
            self.scene.push(group);
        }
        self.scene.set_size(viewport.size());

        log::debug!(
            "Scene rendered: {} groups, {} visuals in {:?}",
            self.scene.groups().len(),
            self.scene.visual_count(),
            start.elapsed()
        );

        &self.scene
    }

    /// Renders one layer into a group without touching the scene. Visibility of the layer is not
    /// checked, but a disabled layer produces an empty group.
    ///
    /// Cached visuals of the layer features are not evicted, and the styles drawn here do not
    /// count as used by the next [`SceneRenderer::render`].
    pub fn render_layer(&self, viewport: &Viewport, layer: &Layer) -> LayerGroup {
        render_layer(&self.context(viewport), layer).group
    }

    /// Resizes the scene to `width`x`height` pixels and encodes it with the exporter.
    ///
    /// The scene is not re-rendered. Render it for a viewport of the same size first, so that
    /// visual positions match the image.
    pub fn export(
        &mut self,
        width: u32,
        height: u32,
        exporter: &dyn SceneExporter,
    ) -> Result<Vec<u8>, MapsceneError> {
        if width == 0 || height == 0 {
            return Err(MapsceneError::Export(format!(
                "invalid image size {width}x{height}"
            )));
        }

        self.scene
            .set_size(Size::new(f64::from(width), f64::from(height)));
        exporter.export(&self.scene)
    }

    fn context<'a>(&'a self, viewport: &'a Viewport) -> RenderContext<'a> {
        RenderContext {
            viewport,
            geometry: &*self.geometry_renderer,
            labels: &*self.label_renderer,
        }
    }
}

impl std::fmt::Debug for SceneRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneRenderer")
            .field("options", &self.options)
            .field("scene", &self.scene)
            .finish_non_exhaustive()
    }
}

/// Drops cached visuals of the fetched features that were not drawn during the pass.
///
/// A feature may be returned by several layers, so the styles it was drawn with are merged
/// before its cache is evicted.
fn evict_unused(usage: Vec<FeatureUsage>) {
    let mut merged: HashMap<*const Feature, FeatureUsage> = HashMap::default();
    for entry in usage {
        merged
            .entry(Arc::as_ptr(&entry.feature))
            .and_modify(|existing| existing.styles.extend_from_slice(&entry.styles))
            .or_insert(entry);
    }

    let evicted: usize = merged
        .into_values()
        .map(|entry| entry.feature.render_cache().evict_unused(&entry.styles))
        .sum();

    if evicted > 0 {
        log::trace!("Evicted {evicted} unused cached visuals");
    }
}
