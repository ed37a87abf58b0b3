//! Output of the rendering pipeline: ordered groups of visuals, one group per layer.

use mapscene_types::Size;

use crate::error::MapsceneError;
use crate::render::Visual;

/// Whether a layer group contains everything the layer has to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupStatus {
    /// The layer was rendered completely.
    Rendered,
    /// Rendering of the layer failed and the group is empty. Contains the error description.
    Degraded(String),
}

/// Visuals of one layer. The host is expected to draw them in order, applying the group opacity
/// to the group as a whole.
#[derive(Debug, Clone)]
pub struct LayerGroup {
    layer_name: String,
    opacity: f32,
    visuals: Vec<Visual>,
    status: GroupStatus,
}

impl LayerGroup {
    /// Creates a group with the given visuals.
    pub fn new(layer_name: impl Into<String>, opacity: f32, visuals: Vec<Visual>) -> Self {
        Self {
            layer_name: layer_name.into(),
            opacity,
            visuals,
            status: GroupStatus::Rendered,
        }
    }

    /// Creates an empty group for the layer that failed to render.
    pub fn degraded(layer_name: impl Into<String>, opacity: f32, error: &MapsceneError) -> Self {
        Self {
            layer_name: layer_name.into(),
            opacity,
            visuals: vec![],
            status: GroupStatus::Degraded(error.to_string()),
        }
    }

    /// Name of the layer the group was created for.
    pub fn layer_name(&self) -> &str {
        &self.layer_name
    }

    /// Opacity of the group.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Visuals in drawing order.
    pub fn visuals(&self) -> &[Visual] {
        &self.visuals
    }

    /// Result of rendering the layer.
    pub fn status(&self) -> &GroupStatus {
        &self.status
    }

    /// Returns true if rendering of the layer failed.
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, GroupStatus::Degraded(_))
    }

    /// Number of visuals.
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    /// Returns true if the group has no visuals.
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }
}

/// Visual tree of the whole map: layer groups in z-order, the last one on top.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    size: Size,
    groups: Vec<LayerGroup>,
}

impl Scene {
    /// Size of the scene in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Sets the size of the scene.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Layer groups, bottom first.
    pub fn groups(&self) -> &[LayerGroup] {
        &self.groups
    }

    /// Returns the group of the layer with the given name.
    pub fn group(&self, layer_name: &str) -> Option<&LayerGroup> {
        self.groups.iter().find(|g| g.layer_name() == layer_name)
    }

    /// Adds a group on top of the existing ones.
    pub fn push(&mut self, group: LayerGroup) {
        self.groups.push(group);
    }

    /// Removes all groups.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Total number of visuals in all groups.
    pub fn visual_count(&self) -> usize {
        self.groups.iter().map(LayerGroup::len).sum()
    }

    /// Returns true if the scene has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
