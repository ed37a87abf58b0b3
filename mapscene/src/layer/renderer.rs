//! Rendering of one layer into a [`LayerGroup`].

use std::sync::Arc;

use web_time::Instant;

use crate::error::MapsceneError;
use crate::feature::Feature;
use crate::layer::{Layer, LayerKind};
use crate::render::dispatch::RenderContext;
use crate::render::Visual;
use crate::scene::LayerGroup;
use crate::style::{resolve_applicable, StyleId};

/// Feature fetched for a layer, with the styles whose cached visuals were drawn for it.
pub(crate) struct FeatureUsage {
    pub feature: Arc<Feature>,
    pub styles: Vec<StyleId>,
}

/// Group of a rendered layer together with the features that were fetched for it.
///
/// A layer that failed or was disabled reports no features, so it does not take part in cache
/// eviction.
pub(crate) struct RenderedLayer {
    pub group: LayerGroup,
    pub usage: Vec<FeatureUsage>,
}

/// Renders the layer into a group. Never fails: if anything goes wrong while rendering, the
/// layer gets an empty degraded group and the error is logged.
pub(crate) fn render_layer(ctx: &RenderContext, layer: &Layer) -> RenderedLayer {
    if !layer.is_enabled() {
        return RenderedLayer {
            group: LayerGroup::new(layer.name(), layer.opacity(), vec![]),
            usage: vec![],
        };
    }

    let start = Instant::now();
    match try_render_layer(ctx, layer) {
        Ok((visuals, usage)) => {
            log::debug!(
                "Layer {} rendered: {} visuals from {} features in {:?}",
                layer.name(),
                visuals.len(),
                usage.len(),
                start.elapsed()
            );

            RenderedLayer {
                group: LayerGroup::new(layer.name(), layer.opacity(), visuals),
                usage,
            }
        }
        Err(err) => {
            log::warn!("Layer {} is skipped for this frame: {err}", layer.name());
            RenderedLayer {
                group: LayerGroup::degraded(layer.name(), layer.opacity(), &err),
                usage: vec![],
            }
        }
    }
}

fn try_render_layer(
    ctx: &RenderContext,
    layer: &Layer,
) -> Result<(Vec<Visual>, Vec<FeatureUsage>), MapsceneError> {
    let viewport = ctx.viewport;

    // Materialized once: the provider is not guaranteed to return the same sequence twice.
    let features = layer
        .features_in_view(&viewport.extent(), viewport.resolution())
        .collect::<Result<Vec<_>, _>>()?;
    let mut used = vec![vec![]; features.len()];

    let visuals = match layer.kind() {
        LayerKind::Vector => render_features(ctx, layer, &features, &mut used)?,
        LayerKind::Label { stacking: false } => {
            ctx.labels.render_label_layer(viewport, layer, &features)?
        }
        LayerKind::Label { stacking: true } => {
            ctx.labels
                .render_stacked_label_layer(viewport, layer, &features)?
        }
    };

    let usage = features
        .into_iter()
        .zip(used)
        .map(|(feature, styles)| FeatureUsage { feature, styles })
        .collect();

    Ok((visuals, usage))
}

fn render_features(
    ctx: &RenderContext,
    layer: &Layer,
    features: &[Arc<Feature>],
    used: &mut [Vec<StyleId>],
) -> Result<Vec<Visual>, MapsceneError> {
    let resolution = ctx.viewport.resolution();
    let mut visuals = vec![];

    for layer_style in layer.styles() {
        for (feature, used) in features.iter().zip(used.iter_mut()) {
            if let Some(style) = resolve_applicable(layer_style, feature, resolution)? {
                used.extend(ctx.render_feature(&mut visuals, &style, feature));
            }
        }
    }

    // Feature styles are drawn on top of all layer styles.
    for (feature, used) in features.iter().zip(used.iter_mut()) {
        for style in feature.styles() {
            if style.is_enabled() {
                used.extend(ctx.render_feature(&mut visuals, style, feature));
            }
        }
    }

    Ok(visuals)
}
