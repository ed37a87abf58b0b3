//! Geometry types used by the `mapscene` rendering pipeline.
//!
//! A feature carries exactly one [`Geom`]: one of seven kinds, from a single point up to a
//! georeferenced raster image. All coordinates are cartesian world coordinates in the units of the
//! map (projection is the job of the data provider).

pub mod error;
pub mod geometry;
mod point;
pub mod raster;
mod rect;
mod size;

pub use geometry::{
    Geom, GeometryKind, LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon,
};
pub use point::{CartesianPoint2d, Point2d};
pub use raster::{Raster, RasterImage};
pub use rect::Rect;
pub use size::Size;
