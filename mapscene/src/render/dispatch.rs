//! Rendering of a single feature with a single style, including the cache lookup.

use std::sync::Arc;

use mapscene_types::Geom;

use crate::error::MapsceneError;
use crate::feature::Feature;
use crate::layer::Layer;
use crate::render::{GeometryRenderer, LabelRenderer, Visual};
use crate::render_cache::is_cacheable;
use crate::style::{resolve_applicable, LabelStyle, Style, StyleId};
use crate::viewport::Viewport;

/// Collaborators and the viewport used during one render pass.
#[derive(Clone, Copy)]
pub(crate) struct RenderContext<'a> {
    pub viewport: &'a Viewport,
    pub geometry: &'a dyn GeometryRenderer,
    pub labels: &'a dyn LabelRenderer,
}

impl RenderContext<'_> {
    /// Renders the feature with the style and appends the resulting visual to `visuals`.
    ///
    /// Labels are built every time. For other styles a cached visual is repositioned if present,
    /// otherwise a new one is built and, for point and raster geometries, stored in the cache.
    ///
    /// Returns the style id if the drawn visual is stored in the feature cache.
    pub fn render_feature(
        &self,
        visuals: &mut Vec<Visual>,
        style: &Style,
        feature: &Feature,
    ) -> Option<StyleId> {
        if let Some(label) = style.as_label() {
            if let Some(visual) = label_visual(self.labels, self.viewport, label, feature) {
                visuals.push(visual);
            }

            return None;
        }

        let geometry = feature.geometry();
        let cached = feature.render_cache().get(style.id()).cloned();

        let visual = match cached {
            Some(visual) => {
                reposition(self.geometry, &visual, geometry, style, self.viewport);
                visual
            }
            None => {
                let Some(visual) = build_visual(self.geometry, geometry, style, self.viewport)
                else {
                    log::trace!(
                        "Renderer produced no visual for {} geometry with style {:?}",
                        geometry.kind(),
                        style.id()
                    );
                    return None;
                };

                if !is_cacheable(geometry.kind()) {
                    visuals.push(visual);
                    return None;
                }

                feature.render_cache().insert(style.id(), visual.clone());
                visual
            }
        };

        visuals.push(visual);
        Some(style.id())
    }
}

fn build_visual(
    renderer: &dyn GeometryRenderer,
    geometry: &Geom,
    style: &Style,
    viewport: &Viewport,
) -> Option<Visual> {
    match geometry {
        Geom::Point(v) => renderer.render_point(v, style, viewport),
        Geom::MultiPoint(v) => renderer.render_multi_point(v, style, viewport),
        Geom::LineString(v) => renderer.render_line_string(v, style, viewport),
        Geom::MultiLineString(v) => renderer.render_multi_line_string(v, style, viewport),
        Geom::Polygon(v) => renderer.render_polygon(v, style, viewport),
        Geom::MultiPolygon(v) => renderer.render_multi_polygon(v, style, viewport),
        Geom::Raster(v) => renderer.render_raster(v, style, viewport),
    }
}

fn reposition(
    renderer: &dyn GeometryRenderer,
    visual: &Visual,
    geometry: &Geom,
    style: &Style,
    viewport: &Viewport,
) {
    match geometry {
        Geom::Point(point) => renderer.position_point(visual, point, style, viewport),
        Geom::Raster(raster) => renderer.position_raster(visual, &raster.bbox(), viewport),
        // never cached
        Geom::MultiPoint(_)
        | Geom::LineString(_)
        | Geom::MultiLineString(_)
        | Geom::Polygon(_)
        | Geom::MultiPolygon(_) => {}
    }
}

fn label_visual<L: LabelRenderer + ?Sized>(
    labels: &L,
    viewport: &Viewport,
    style: &LabelStyle,
    feature: &Feature,
) -> Option<Visual> {
    let anchor = feature.geometry().bounding_rect()?.center();
    let text = style.text_for(feature)?;
    labels.render_label(anchor, style.offset, &text, style, viewport)
}

pub(crate) fn label_layer_visuals<L: LabelRenderer + ?Sized>(
    labels: &L,
    viewport: &Viewport,
    layer: &Layer,
    features: &[Arc<Feature>],
) -> Result<Vec<Visual>, MapsceneError> {
    let mut visuals = vec![];
    for layer_style in layer.styles() {
        for feature in features {
            let Some(style) = resolve_applicable(layer_style, feature, viewport.resolution())?
            else {
                continue;
            };

            let Some(label) = style.as_label() else {
                log::trace!(
                    "Non-label style {:?} in label layer {} is ignored",
                    style.id(),
                    layer.name()
                );
                continue;
            };

            if let Some(visual) = label_visual(labels, viewport, label, feature) {
                visuals.push(visual);
            }
        }
    }

    Ok(visuals)
}
