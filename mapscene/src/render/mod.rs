//! Interfaces of the host collaborators that create the actual drawable objects.
//!
//! The pipeline never draws anything itself. It calls a [`GeometryRenderer`] to build a
//! [`Visual`] for a geometry, a [`LabelRenderer`] for labels and a [`SceneExporter`] to encode the
//! finished scene into an image.

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use mapscene_types::{
    LineString, MultiLineString, MultiPoint, MultiPolygon, Point2d, Polygon, Raster, Rect,
};
use maybe_sync::{MaybeSend, MaybeSync};

use crate::error::MapsceneError;
use crate::feature::Feature;
use crate::layer::Layer;
use crate::scene::Scene;
use crate::style::{LabelStyle, Offset, Style};
use crate::viewport::Viewport;

pub(crate) mod dispatch;

/// Native drawable object created by the host.
///
/// Repositioning functions of [`GeometryRenderer`] receive visuals by shared reference, so
/// elements that can be moved should use interior mutability for their position.
pub trait VisualElement: Debug + MaybeSend + MaybeSync {
    /// Used to convert the visual into its concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// Opaque handle to a [`VisualElement`].
///
/// Cloning the handle does not clone the element, and [`Visual::ptr_eq`] tells whether two
/// handles point to the same element.
#[derive(Debug, Clone)]
pub struct Visual(Arc<dyn VisualElement>);

impl Visual {
    /// Wraps the element into a handle.
    pub fn new(element: impl VisualElement + 'static) -> Self {
        Self(Arc::new(element))
    }

    /// Returns true if both handles point to the same element.
    pub fn ptr_eq(&self, other: &Visual) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the element as its concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref()
    }
}

/// Builds visuals for geometries.
///
/// Every constructor may return `None` if the renderer does not support the combination of the
/// geometry and style. The feature is then skipped for this style.
pub trait GeometryRenderer: MaybeSend + MaybeSync {
    /// Builds a point symbol.
    fn render_point(&self, point: &Point2d, style: &Style, viewport: &Viewport) -> Option<Visual>;
    /// Builds a set of point symbols.
    fn render_multi_point(
        &self,
        points: &MultiPoint,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual>;
    /// Builds a line.
    fn render_line_string(
        &self,
        line: &LineString,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual>;
    /// Builds a set of lines.
    fn render_multi_line_string(
        &self,
        lines: &MultiLineString,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual>;
    /// Builds a polygon.
    fn render_polygon(&self, polygon: &Polygon, style: &Style, viewport: &Viewport)
        -> Option<Visual>;
    /// Builds a set of polygons.
    fn render_multi_polygon(
        &self,
        polygons: &MultiPolygon,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual>;
    /// Builds an image.
    fn render_raster(&self, raster: &Raster, style: &Style, viewport: &Viewport)
        -> Option<Visual>;

    /// Moves a visual built by [`GeometryRenderer::render_point`] to the current screen position
    /// of the point.
    fn position_point(&self, visual: &Visual, point: &Point2d, style: &Style, viewport: &Viewport);
    /// Moves and scales a visual built by [`GeometryRenderer::render_raster`] to cover the
    /// current screen area of `bbox`.
    fn position_raster(&self, visual: &Visual, bbox: &Rect, viewport: &Viewport);
}

/// Builds text labels.
pub trait LabelRenderer: MaybeSend + MaybeSync {
    /// Builds a label with the given text anchored at the world point `anchor`.
    fn render_label(
        &self,
        anchor: Point2d,
        offset: Offset,
        text: &str,
        style: &LabelStyle,
        viewport: &Viewport,
    ) -> Option<Visual>;

    /// Builds all labels of a [label layer](crate::LayerKind::Label).
    ///
    /// The default implementation places a label for every feature and every label style of the
    /// layer, without any collision handling.
    fn render_label_layer(
        &self,
        viewport: &Viewport,
        layer: &Layer,
        features: &[Arc<Feature>],
    ) -> Result<Vec<Visual>, MapsceneError> {
        dispatch::label_layer_visuals(self, viewport, layer, features)
    }

    /// Builds labels of a label layer that has stacking enabled: overlapping labels are expected
    /// to be grouped or decluttered.
    ///
    /// The default implementation does no stacking and falls back to
    /// [`LabelRenderer::render_label_layer`].
    fn render_stacked_label_layer(
        &self,
        viewport: &Viewport,
        layer: &Layer,
        features: &[Arc<Feature>],
    ) -> Result<Vec<Visual>, MapsceneError> {
        log::debug!(
            "Label renderer does not support stacking, layer {} is rendered without it",
            layer.name()
        );
        self.render_label_layer(viewport, layer, features)
    }
}

/// Encodes a scene into an image. Implemented by the host, which knows how to draw its visuals.
pub trait SceneExporter {
    /// Encodes the scene. The scene is already sized to the requested image dimensions.
    fn export(&self, scene: &Scene) -> Result<Vec<u8>, MapsceneError>;
}
