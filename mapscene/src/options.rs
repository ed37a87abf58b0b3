//! Configuration of the rendering pipeline.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do with cached visuals of styles that were not used in the last render.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CacheEviction {
    /// Keep everything until the feature itself is dropped.
    Never,
    /// After every render, every rendered feature drops visuals cached for styles it was not drawn
    /// with (e.g. a style removed from the layer, or a theme that now returns a different style).
    #[default]
    Unused,
}

/// Configuration of the [`SceneRenderer`](crate::SceneRenderer).
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Eviction policy for the per-feature render cache.
    pub cache_eviction: CacheEviction,
}
