//! The [`Geom`] tagged union over the seven geometry kinds a feature can have.

use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::point::Point2d;
use crate::raster::Raster;
use crate::rect::Rect;

/// Set of points.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiPoint {
    points: Vec<Point2d>,
}

impl MultiPoint {
    /// Creates a new multipoint.
    pub fn new(points: Vec<Point2d>) -> Self {
        Self { points }
    }

    /// Iterates over the points.
    pub fn iter_points(&self) -> impl Iterator<Item = &Point2d> {
        self.points.iter()
    }
}

/// Sequence of points connected with straight segments.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineString {
    points: Vec<Point2d>,
}

impl LineString {
    /// Creates a new line string.
    pub fn new(points: Vec<Point2d>) -> Self {
        Self { points }
    }

    /// Iterates over the vertices.
    pub fn iter_points(&self) -> impl Iterator<Item = &Point2d> {
        self.points.iter()
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the line has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn bounding_rect(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter())
    }
}

/// Set of line strings.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiLineString {
    lines: Vec<LineString>,
}

impl MultiLineString {
    /// Creates a new multi line string.
    pub fn new(lines: Vec<LineString>) -> Self {
        Self { lines }
    }

    /// Iterates over the lines.
    pub fn lines(&self) -> impl Iterator<Item = &LineString> {
        self.lines.iter()
    }
}

/// Polygon with an outer ring and zero or more holes. Rings are implicitly closed.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    outer: LineString,
    inner: Vec<LineString>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(outer: LineString, inner: Vec<LineString>) -> Self {
        Self { outer, inner }
    }

    /// Outer ring.
    pub fn outer(&self) -> &LineString {
        &self.outer
    }

    /// Holes.
    pub fn inner(&self) -> impl Iterator<Item = &LineString> {
        self.inner.iter()
    }
}

/// Set of polygons.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MultiPolygon {
    parts: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a new multipolygon.
    pub fn new(parts: Vec<Polygon>) -> Self {
        Self { parts }
    }

    /// Iterates over the polygons.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.parts.iter()
    }
}

/// Geometry of a feature.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Geom {
    /// Single point.
    Point(Point2d),
    /// Set of points.
    MultiPoint(MultiPoint),
    /// Line string.
    LineString(LineString),
    /// Set of line strings.
    MultiLineString(MultiLineString),
    /// Polygon.
    Polygon(Polygon),
    /// Set of polygons.
    MultiPolygon(MultiPolygon),
    /// Georeferenced image.
    Raster(Raster),
}

/// Kind of a [`Geom`], without the data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GeometryKind {
    /// [`Geom::Point`]
    Point,
    /// [`Geom::MultiPoint`]
    MultiPoint,
    /// [`Geom::LineString`]
    LineString,
    /// [`Geom::MultiLineString`]
    MultiLineString,
    /// [`Geom::Polygon`]
    Polygon,
    /// [`Geom::MultiPolygon`]
    MultiPolygon,
    /// [`Geom::Raster`]
    Raster,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryKind::Point => "point",
            GeometryKind::MultiPoint => "multipoint",
            GeometryKind::LineString => "linestring",
            GeometryKind::MultiLineString => "multilinestring",
            GeometryKind::Polygon => "polygon",
            GeometryKind::MultiPolygon => "multipolygon",
            GeometryKind::Raster => "raster",
        };
        f.write_str(name)
    }
}

impl Geom {
    /// Kind of the geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geom::Point(_) => GeometryKind::Point,
            Geom::MultiPoint(_) => GeometryKind::MultiPoint,
            Geom::LineString(_) => GeometryKind::LineString,
            Geom::MultiLineString(_) => GeometryKind::MultiLineString,
            Geom::Polygon(_) => GeometryKind::Polygon,
            Geom::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geom::Raster(_) => GeometryKind::Raster,
        }
    }

    /// Bounding rectangle of the geometry. Returns `None` if the geometry contains no points.
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Geom::Point(p) => Some(Rect::from_point(p)),
            Geom::MultiPoint(v) => Rect::from_points(v.iter_points()),
            Geom::LineString(v) => v.bounding_rect(),
            Geom::MultiLineString(v) => {
                Rect::merge_all(v.lines().filter_map(|l| l.bounding_rect()))
            }
            Geom::Polygon(v) => v.outer().bounding_rect(),
            Geom::MultiPolygon(v) => {
                Rect::merge_all(v.polygons().filter_map(|p| p.outer().bounding_rect()))
            }
            Geom::Raster(v) => Some(v.bbox()),
        }
    }
}

impl From<Point2d> for Geom {
    fn from(value: Point2d) -> Self {
        Self::Point(value)
    }
}

impl From<MultiPoint> for Geom {
    fn from(value: MultiPoint) -> Self {
        Self::MultiPoint(value)
    }
}

impl From<LineString> for Geom {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<MultiLineString> for Geom {
    fn from(value: MultiLineString) -> Self {
        Self::MultiLineString(value)
    }
}

impl From<Polygon> for Geom {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPolygon> for Geom {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

impl From<Raster> for Geom {
    fn from(value: Raster) -> Self {
        Self::Raster(value)
    }
}
