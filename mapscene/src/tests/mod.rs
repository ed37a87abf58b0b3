//! Collaborators and helpers shared by unit tests.

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mapscene_types::{
    CartesianPoint2d, GeometryKind, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point2d, Polygon, Raster, Rect,
};
use parking_lot::Mutex;

use crate::error::MapsceneError;
use crate::feature::Feature;
use crate::layer::{FeatureIter, FeatureProvider};
use crate::render::{GeometryRenderer, LabelRenderer, Visual, VisualElement};
use crate::scene::LayerGroup;
use crate::style::{LabelStyle, Offset, Style, StyleId, ThemeStyle};
use crate::viewport::Viewport;

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug)]
pub(crate) struct TestVisual {
    pub kind: Option<GeometryKind>,
    pub style: Option<StyleId>,
    pub text: Option<String>,
    position: Mutex<Point2d>,
    repositions: AtomicUsize,
}

impl TestVisual {
    pub fn visual(kind: GeometryKind, style: StyleId) -> Visual {
        Self::geometry(kind, style, Point2d::new(0.0, 0.0))
    }

    fn geometry(kind: GeometryKind, style: StyleId, position: Point2d) -> Visual {
        Visual::new(Self {
            kind: Some(kind),
            style: Some(style),
            text: None,
            position: Mutex::new(position),
            repositions: AtomicUsize::new(0),
        })
    }

    fn label(text: &str, position: Point2d) -> Visual {
        Visual::new(Self {
            kind: None,
            style: None,
            text: Some(text.to_string()),
            position: Mutex::new(position),
            repositions: AtomicUsize::new(0),
        })
    }

    pub fn position(&self) -> Point2d {
        *self.position.lock()
    }

    pub fn repositions(&self) -> usize {
        self.repositions.load(Ordering::Relaxed)
    }

    fn move_to(&self, position: Point2d) {
        *self.position.lock() = position;
        self.repositions.fetch_add(1, Ordering::Relaxed);
    }
}

impl VisualElement for TestVisual {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RenderCall {
    Build { kind: GeometryKind, style: StyleId },
    Position { kind: GeometryKind, style: StyleId },
    Label { text: String },
}

/// Geometry and label renderer that records every call.
#[derive(Debug, Clone, Default)]
pub(crate) struct Recorder {
    calls: Arc<Mutex<Vec<RenderCall>>>,
    unsupported: Vec<GeometryKind>,
}

impl Recorder {
    /// Recorder that returns no visual for the given geometry kind.
    pub fn without(kind: GeometryKind) -> Self {
        Self {
            unsupported: vec![kind],
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    pub fn builds(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::Build { .. }))
    }

    pub fn positions(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::Position { .. }))
    }

    pub fn labels(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::Label { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    fn build(
        &self,
        kind: GeometryKind,
        anchor: Point2d,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual> {
        if self.unsupported.contains(&kind) {
            return None;
        }

        self.calls.lock().push(RenderCall::Build {
            kind,
            style: style.id(),
        });
        Some(TestVisual::geometry(
            kind,
            style.id(),
            viewport.map_to_screen(&anchor),
        ))
    }

    fn moved(&self, visual: &Visual, position: Point2d) {
        let Some(element) = visual.downcast_ref::<TestVisual>() else {
            panic!("foreign visual repositioned");
        };

        if let (Some(kind), Some(style)) = (element.kind, element.style) {
            self.calls.lock().push(RenderCall::Position { kind, style });
        }
        element.move_to(position);
    }
}

fn first_point<'a>(mut points: impl Iterator<Item = &'a Point2d>) -> Point2d {
    points.next().copied().unwrap_or_else(|| Point2d::new(0.0, 0.0))
}

impl GeometryRenderer for Recorder {
    fn render_point(&self, point: &Point2d, style: &Style, viewport: &Viewport) -> Option<Visual> {
        self.build(GeometryKind::Point, *point, style, viewport)
    }

    fn render_multi_point(
        &self,
        points: &MultiPoint,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual> {
        let anchor = first_point(points.iter_points());
        self.build(GeometryKind::MultiPoint, anchor, style, viewport)
    }

    fn render_line_string(
        &self,
        line: &LineString,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual> {
        let anchor = first_point(line.iter_points());
        self.build(GeometryKind::LineString, anchor, style, viewport)
    }

    fn render_multi_line_string(
        &self,
        lines: &MultiLineString,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual> {
        let anchor = first_point(lines.lines().flat_map(|l| l.iter_points()));
        self.build(GeometryKind::MultiLineString, anchor, style, viewport)
    }

    fn render_polygon(
        &self,
        polygon: &Polygon,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual> {
        let anchor = first_point(polygon.outer().iter_points());
        self.build(GeometryKind::Polygon, anchor, style, viewport)
    }

    fn render_multi_polygon(
        &self,
        polygons: &MultiPolygon,
        style: &Style,
        viewport: &Viewport,
    ) -> Option<Visual> {
        let anchor = first_point(
            polygons
                .polygons()
                .flat_map(|p| p.outer().iter_points()),
        );
        self.build(GeometryKind::MultiPolygon, anchor, style, viewport)
    }

    fn render_raster(&self, raster: &Raster, style: &Style, viewport: &Viewport) -> Option<Visual> {
        let bbox = raster.bbox();
        let anchor = Point2d::new(bbox.x_min, bbox.y_max);
        self.build(GeometryKind::Raster, anchor, style, viewport)
    }

    fn position_point(
        &self,
        visual: &Visual,
        point: &Point2d,
        _style: &Style,
        viewport: &Viewport,
    ) {
        self.moved(visual, viewport.map_to_screen(point));
    }

    fn position_raster(&self, visual: &Visual, bbox: &Rect, viewport: &Viewport) {
        let screen = viewport.map_to_screen_rect(bbox);
        self.moved(visual, Point2d::new(screen.x_min, screen.y_min));
    }
}

impl LabelRenderer for Recorder {
    fn render_label(
        &self,
        anchor: Point2d,
        offset: Offset,
        text: &str,
        _style: &LabelStyle,
        viewport: &Viewport,
    ) -> Option<Visual> {
        self.calls.lock().push(RenderCall::Label {
            text: text.to_string(),
        });
        let position = viewport.map_to_screen(&anchor);
        Some(TestVisual::label(
            text,
            Point2d::new(position.x() + offset.x, position.y() + offset.y),
        ))
    }
}

/// Style ids of the visuals in the group, `None` for labels.
pub(crate) fn drawn_styles(group: &LayerGroup) -> Vec<Option<StyleId>> {
    group
        .visuals()
        .iter()
        .map(|visual| {
            visual
                .downcast_ref::<TestVisual>()
                .and_then(|element| element.style)
        })
        .collect()
}

/// Provider that yields one feature and then fails, like a data source modified during
/// enumeration.
pub(crate) struct FailingProvider;

impl FeatureProvider for FailingProvider {
    fn features_in_view(&self, _extent: &Rect, _resolution: f64) -> FeatureIter<'_> {
        Box::new(
            [
                Ok(Arc::new(Feature::new(Point2d::new(0.0, 0.0)))),
                Err(MapsceneError::Provider(
                    "collection was modified during enumeration".into(),
                )),
            ]
            .into_iter(),
        )
    }
}

pub(crate) struct FailingTheme;

impl ThemeStyle for FailingTheme {
    fn get_style(&self, _feature: &Feature) -> Result<Option<Arc<Style>>, MapsceneError> {
        Err(MapsceneError::StyleResolution("unknown category".into()))
    }
}
