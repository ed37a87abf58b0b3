//! Map viewport: visible area and world-to-screen transformation.

use mapscene_types::{CartesianPoint2d, Point2d, Rect, Size};
use nalgebra::{Matrix3, Vector2};

/// Snapshot of the visible part of the map: what point of the world is in the center of the
/// screen, at what resolution, and how large the screen is.
///
/// Resolution is the number of map units in one pixel, so smaller resolution means the map is
/// zoomed in. Screen coordinates have their origin in the top-left corner with the y axis pointing
/// down, while world y axis points up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    position: Point2d,
    resolution: f64,
    size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            position: Point2d::origin(),
            resolution: 1.0,
            size: Size::new(0.0, 0.0),
        }
    }
}

impl Viewport {
    /// Creates a new viewport centered at `position`.
    pub fn new(position: impl CartesianPoint2d<Num = f64>, resolution: f64, size: Size) -> Self {
        Self {
            position: Point2d::new(position.x(), position.y()),
            resolution,
            size,
        }
    }

    /// World coordinates of the center of the screen.
    pub fn position(&self) -> Point2d {
        self.position
    }

    /// Map units per pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Size of the screen in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Width of the screen in pixels.
    pub fn width(&self) -> f64 {
        self.size.width()
    }

    /// Height of the screen in pixels.
    pub fn height(&self) -> f64 {
        self.size.height()
    }

    /// Returns a copy of the viewport with a different resolution.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self {
            resolution,
            ..*self
        }
    }

    /// Returns a copy of the viewport with a different screen size.
    pub fn with_size(&self, size: Size) -> Self {
        Self { size, ..*self }
    }

    /// Returns a copy of the viewport centered at a different point.
    pub fn with_position(&self, position: impl CartesianPoint2d<Num = f64>) -> Self {
        Self {
            position: Point2d::new(position.x(), position.y()),
            ..*self
        }
    }

    /// Area of the world visible on the screen.
    pub fn extent(&self) -> Rect {
        let half_width = self.size.half_width() * self.resolution;
        let half_height = self.size.half_height() * self.resolution;
        Rect::new(
            self.position.x - half_width,
            self.position.y - half_height,
            self.position.x + half_width,
            self.position.y + half_height,
        )
    }

    /// Affine transformation from world coordinates into screen pixels.
    pub fn map_to_screen_transform(&self) -> Matrix3<f64> {
        let to_center = Matrix3::new_translation(&Vector2::new(-self.position.x, -self.position.y));
        let scale = Matrix3::new_nonuniform_scaling(&Vector2::new(
            1.0 / self.resolution,
            -1.0 / self.resolution,
        ));
        let to_screen = Matrix3::new_translation(&Vector2::new(
            self.size.half_width(),
            self.size.half_height(),
        ));

        to_screen * scale * to_center
    }

    /// Converts a world point into screen pixels.
    pub fn map_to_screen(&self, point: &impl CartesianPoint2d<Num = f64>) -> Point2d {
        self.map_to_screen_transform()
            .transform_point(&Point2d::new(point.x(), point.y()))
    }

    /// Converts a world rectangle into screen pixels. The result is normalized, so `y_min` is the
    /// top edge of the rectangle on the screen.
    pub fn map_to_screen_rect(&self, rect: &Rect) -> Rect {
        let corner_a = self.map_to_screen(&Point2d::new(rect.x_min, rect.y_min));
        let corner_b = self.map_to_screen(&Point2d::new(rect.x_max, rect.y_max));
        Rect::new(corner_a.x, corner_b.y, corner_b.x, corner_a.y)
    }

    /// Converts a screen pixel position into world coordinates.
    ///
    /// Returns `None` if the transformation is degenerate (zero or non-finite resolution).
    pub fn screen_to_map(&self, px_position: Point2d) -> Option<Point2d> {
        let inverse = self.map_to_screen_transform().try_inverse()?;
        let projected = inverse.transform_point(&px_position);

        if projected.x.is_finite() && projected.y.is_finite() {
            Some(projected)
        } else {
            None
        }
    }

    /// Moves the viewport so that the world point under `from` pixel ends up under `to` pixel.
    pub fn translate_by_pixels(&self, from: Point2d, to: Point2d) -> Self {
        let delta = Vector2::new(
            (to.x - from.x) * self.resolution,
            (from.y - to.y) * self.resolution,
        );
        Self {
            position: self.position - delta,
            ..*self
        }
    }

    /// Changes resolution by `zoom` times, keeping the world point under `base_point` pixel in
    /// place.
    pub fn zoom(&self, zoom: f64, base_point: Point2d) -> Self {
        let Some(base_point) = self.screen_to_map(base_point) else {
            return self.with_resolution(self.resolution * zoom);
        };

        let new_position = base_point + (self.position - base_point) * zoom;
        Self {
            position: new_position,
            resolution: self.resolution * zoom,
            ..*self
        }
    }
}
