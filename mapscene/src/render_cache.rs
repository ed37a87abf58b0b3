//! Per-feature cache of visuals produced on previous frames.
//!
//! The cache is keyed by [`StyleId`], so it is the *same style instance* that gets a cache hit,
//! not an equal one. Only visuals that can be moved into a new position without being rebuilt are
//! stored: points (fixed-size symbols) and rasters (re-anchored by their bounding box). Lines and
//! polygons change their on-screen shape with every zoom change, so they are rebuilt every frame
//! and never reach the cache.

use ahash::{HashMap, HashMapExt};
use mapscene_types::GeometryKind;

use crate::render::Visual;
use crate::style::StyleId;

/// Returns true if visuals of the given geometry kind can be reused on the next frames.
pub fn is_cacheable(kind: GeometryKind) -> bool {
    matches!(kind, GeometryKind::Point | GeometryKind::Raster)
}

/// Mapping from style identity to the visual rendered for this style.
#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<StyleId, Visual>,
}

impl RenderCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the visual stored for the style.
    pub fn get(&self, style_id: StyleId) -> Option<&Visual> {
        self.entries.get(&style_id)
    }

    /// Stores the visual for the style, replacing the previous one.
    pub fn insert(&mut self, style_id: StyleId, visual: Visual) {
        self.entries.insert(style_id, visual);
    }

    /// Removes all entries except the ones for the `used` styles. Returns the number of removed
    /// entries.
    pub fn evict_unused(&mut self, used: &[StyleId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, _| used.contains(id));

        before - self.entries.len()
    }

    /// Number of stored visuals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no visuals are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
