//! [Layers](Layer) specify a data source and the way the data should be rendered to the map.

use mapscene_types::Rect;

use crate::style::LayerStyle;

mod provider;
pub(crate) mod renderer;

pub use provider::{FeatureIter, FeatureProvider, MemoryProvider};

/// How a layer is turned into visuals.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LayerKind {
    /// Every feature is drawn with every applicable layer style, then with its own styles.
    #[default]
    Vector,
    /// The layer contains only labels and is rendered by the
    /// [`LabelRenderer`](crate::render::LabelRenderer) as a whole.
    Label {
        /// Group overlapping labels instead of drawing all of them.
        stacking: bool,
    },
}

/// A set of features from one [`FeatureProvider`] together with the styles to draw them.
///
/// A layer is drawn only if it is enabled and the map resolution is within
/// `min_visible..=max_visible`. All visuals of a layer are put into one group that has the
/// layer's opacity.
pub struct Layer {
    name: String,
    enabled: bool,
    min_visible: f64,
    max_visible: f64,
    opacity: f32,
    styles: Vec<LayerStyle>,
    kind: LayerKind,
    provider: Box<dyn FeatureProvider>,
}

impl Layer {
    /// Creates a new enabled, opaque vector layer without styles, visible at any resolution.
    pub fn new(name: impl Into<String>, provider: impl FeatureProvider + 'static) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            min_visible: 0.0,
            max_visible: f64::MAX,
            opacity: 1.0,
            styles: vec![],
            kind: LayerKind::Vector,
            provider: Box::new(provider),
        }
    }

    /// Creates a new label layer.
    pub fn labels(
        name: impl Into<String>,
        provider: impl FeatureProvider + 'static,
        stacking: bool,
    ) -> Self {
        Self {
            kind: LayerKind::Label { stacking },
            ..Self::new(name, provider)
        }
    }

    /// Adds a style to the end of the style list.
    pub fn with_style(mut self, style: impl Into<LayerStyle>) -> Self {
        self.styles.push(style.into());
        self
    }

    /// Limits the resolutions at which the layer is visible. Both ends are inclusive.
    pub fn with_visible_range(mut self, min_visible: f64, max_visible: f64) -> Self {
        self.min_visible = min_visible;
        self.max_visible = max_visible;
        self
    }

    /// Sets layer opacity. The value is clamped into `0.0..=1.0`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Name of the layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the layer is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the layer.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Minimum resolution at which the layer is visible.
    pub fn min_visible(&self) -> f64 {
        self.min_visible
    }

    /// Maximum resolution at which the layer is visible.
    pub fn max_visible(&self) -> f64 {
        self.max_visible
    }

    /// Opacity of the layer.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Sets layer opacity. The value is clamped into `0.0..=1.0`.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Layer styles in render order.
    pub fn styles(&self) -> &[LayerStyle] {
        &self.styles
    }

    /// Mutable access to the layer styles.
    pub fn styles_mut(&mut self) -> &mut Vec<LayerStyle> {
        &mut self.styles
    }

    /// Kind of the layer.
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Features of the layer visible in the given extent.
    pub fn features_in_view(&self, extent: &Rect, resolution: f64) -> FeatureIter<'_> {
        self.provider.features_in_view(extent, resolution)
    }
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("min_visible", &self.min_visible)
            .field("max_visible", &self.max_visible)
            .field("opacity", &self.opacity)
            .field("styles", &self.styles)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
