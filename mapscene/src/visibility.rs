//! Enabled flag and resolution range checks shared by layers and styles.

use crate::layer::Layer;
use crate::style::Style;

/// Something that is drawn only when enabled and within a range of resolutions.
pub trait Visibility {
    /// Returns true if the object is enabled.
    fn is_enabled(&self) -> bool;
    /// Minimum resolution (inclusive).
    fn min_visible(&self) -> f64;
    /// Maximum resolution (inclusive).
    fn max_visible(&self) -> f64;

    /// Returns true if the object is enabled and `resolution` is within
    /// `min_visible..=max_visible`.
    fn is_visible_at(&self, resolution: f64) -> bool {
        self.is_enabled() && self.min_visible() <= resolution && self.max_visible() >= resolution
    }
}

impl Visibility for Style {
    fn is_enabled(&self) -> bool {
        Style::is_enabled(self)
    }

    fn min_visible(&self) -> f64 {
        Style::min_visible(self)
    }

    fn max_visible(&self) -> f64 {
        Style::max_visible(self)
    }
}

impl Visibility for Layer {
    fn is_enabled(&self) -> bool {
        Layer::is_enabled(self)
    }

    fn min_visible(&self) -> f64 {
        Layer::min_visible(self)
    }

    fn max_visible(&self) -> f64 {
        Layer::max_visible(self)
    }
}
