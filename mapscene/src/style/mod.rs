//! Styles define how features are drawn and at which resolutions.
//!
//! Every [`Style`] gets a unique [`StyleId`] when it is created. The id is what the
//! [render cache](crate::render_cache) uses as a key, so styles should be created once and shared
//! (as `Arc<Style>`) between frames. A style re-created on every frame would never get a cache
//! hit.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::feature::Feature;
use crate::Color;

mod resolver;
mod theme;

pub use resolver::{resolve, resolve_applicable};
pub use theme::{CategoryTheme, CustomTheme, ThemeStyle};

/// Identity of a [`Style`] instance.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StyleId(u64);

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

impl StyleId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Offset in pixels from the anchor point of a symbol or a label.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset {
    /// Horizontal offset, positive to the right.
    pub x: f64,
    /// Vertical offset, positive downwards.
    pub y: f64,
}

/// Line paint.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stroke {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
}

/// Style for points, lines and polygons.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VectorStyle {
    /// Fill of polygons and point symbols.
    pub fill: Option<Color>,
    /// Outline of polygons and point symbols.
    pub outline: Option<Stroke>,
    /// Paint of line strings.
    pub line: Option<Stroke>,
    /// Size of point symbols in pixels.
    pub symbol_size: f64,
    /// Offset of point symbols from the point position.
    pub symbol_offset: Offset,
}

impl Default for VectorStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            outline: Some(Stroke {
                color: Color::GRAY,
                width: 1.0,
            }),
            line: Some(Stroke {
                color: Color::GRAY,
                width: 1.0,
            }),
            symbol_size: 16.0,
            symbol_offset: Offset::default(),
        }
    }
}

/// Source of the text of a label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LabelText {
    /// Same text for every feature.
    Fixed(String),
    /// Value of the given feature attribute.
    Field(String),
}

/// Style of a text label placed at the center of the feature.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelStyle {
    /// Label text.
    pub text: LabelText,
    /// Font size in pixels.
    #[cfg_attr(feature = "serde", serde(default = "default_font_size"))]
    pub font_size: f64,
    /// Text color.
    #[cfg_attr(feature = "serde", serde(default = "default_label_color"))]
    pub color: Color,
    /// Halo drawn around the glyphs.
    #[cfg_attr(feature = "serde", serde(default))]
    pub halo: Option<Stroke>,
    /// Offset of the label from the anchor point.
    #[cfg_attr(feature = "serde", serde(default))]
    pub offset: Offset,
}

fn default_font_size() -> f64 {
    12.0
}

fn default_label_color() -> Color {
    Color::BLACK
}

impl LabelStyle {
    /// Creates a label style showing the value of the `field` attribute.
    pub fn field(field: impl Into<String>) -> Self {
        Self {
            text: LabelText::Field(field.into()),
            font_size: default_font_size(),
            color: default_label_color(),
            halo: None,
            offset: Offset::default(),
        }
    }

    /// Text to display for the feature. Returns `None` if the attribute is missing or empty.
    pub fn text_for(&self, feature: &Feature) -> Option<String> {
        match &self.text {
            LabelText::Fixed(text) => Some(text.clone()),
            LabelText::Field(name) => {
                let value = feature.field(name)?;
                if value.is_null() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
        }
    }
}

/// Style of raster features.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RasterStyle {
    /// Opacity of the image, `0.0..=1.0`.
    pub opacity: f32,
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self { opacity: 1.0 }
    }
}

/// What a style draws.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum StyleKind {
    /// Point, line and polygon symbology.
    Vector(VectorStyle),
    /// Text label.
    Label(LabelStyle),
    /// Raster image.
    Raster(RasterStyle),
}

impl From<VectorStyle> for StyleKind {
    fn from(value: VectorStyle) -> Self {
        Self::Vector(value)
    }
}

impl From<LabelStyle> for StyleKind {
    fn from(value: LabelStyle) -> Self {
        Self::Label(value)
    }
}

impl From<RasterStyle> for StyleKind {
    fn from(value: RasterStyle) -> Self {
        Self::Raster(value)
    }
}

/// Concrete style applied to a feature.
///
/// The style is visible only if it is enabled and the map resolution is within the
/// `min_visible..=max_visible` range.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StyleConfig"))]
pub struct Style {
    id: StyleId,
    enabled: AtomicBool,
    min_visible: f64,
    max_visible: f64,
    kind: StyleKind,
}

impl Style {
    /// Creates a new enabled style visible at any resolution.
    pub fn new(kind: impl Into<StyleKind>) -> Self {
        Self {
            id: StyleId::next(),
            enabled: AtomicBool::new(true),
            min_visible: 0.0,
            max_visible: f64::MAX,
            kind: kind.into(),
        }
    }

    /// Shortcut for `Style::new(StyleKind::Vector(style))`.
    pub fn vector(style: VectorStyle) -> Self {
        Self::new(style)
    }

    /// Shortcut for `Style::new(StyleKind::Label(style))`.
    pub fn label(style: LabelStyle) -> Self {
        Self::new(style)
    }

    /// Shortcut for `Style::new(StyleKind::Raster(style))`.
    pub fn raster(style: RasterStyle) -> Self {
        Self::new(style)
    }

    /// Limits the resolutions at which the style is visible. Both ends are inclusive.
    pub fn with_visible_range(mut self, min_visible: f64, max_visible: f64) -> Self {
        self.min_visible = min_visible;
        self.max_visible = max_visible;
        self
    }

    /// Sets the enabled flag.
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    /// Creates a copy of the style with a new identity. Visuals cached for `self` will not be
    /// reused for the copy.
    pub fn duplicate(&self) -> Self {
        Self {
            id: StyleId::next(),
            enabled: AtomicBool::new(self.is_enabled()),
            min_visible: self.min_visible,
            max_visible: self.max_visible,
            kind: self.kind.clone(),
        }
    }

    /// Identity of the style.
    pub fn id(&self) -> StyleId {
        self.id
    }

    /// Returns true if the style is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enables or disables the style. The style keeps its identity, so cached visuals stay valid.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Minimum resolution at which the style is visible.
    pub fn min_visible(&self) -> f64 {
        self.min_visible
    }

    /// Maximum resolution at which the style is visible.
    pub fn max_visible(&self) -> f64 {
        self.max_visible
    }

    /// What the style draws.
    pub fn kind(&self) -> &StyleKind {
        &self.kind
    }

    /// Returns the label style if this is a label.
    pub fn as_label(&self) -> Option<&LabelStyle> {
        match &self.kind {
            StyleKind::Label(label) => Some(label),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct StyleConfig {
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    min_visible: f64,
    #[serde(default = "default_max_visible")]
    max_visible: f64,
    kind: StyleKind,
}

#[cfg(feature = "serde")]
fn default_enabled() -> bool {
    true
}

#[cfg(feature = "serde")]
fn default_max_visible() -> f64 {
    f64::MAX
}

#[cfg(feature = "serde")]
impl From<StyleConfig> for Style {
    fn from(value: StyleConfig) -> Self {
        Style::new(value.kind)
            .with_visible_range(value.min_visible, value.max_visible)
            .with_enabled(value.enabled)
    }
}

/// Style assigned to a layer: either a concrete style or a theme computing a style for every
/// feature.
#[derive(Clone)]
pub enum LayerStyle {
    /// The same style for every feature.
    Plain(Arc<Style>),
    /// Data-driven style.
    Theme(Arc<dyn ThemeStyle>),
}

impl LayerStyle {
    /// Creates a theme layer style.
    pub fn theme(theme: impl ThemeStyle + 'static) -> Self {
        Self::Theme(Arc::new(theme))
    }
}

impl std::fmt::Debug for LayerStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerStyle::Plain(style) => f.debug_tuple("Plain").field(style).finish(),
            LayerStyle::Theme(_) => f.write_str("Theme"),
        }
    }
}

impl From<Style> for LayerStyle {
    fn from(value: Style) -> Self {
        Self::Plain(Arc::new(value))
    }
}

impl From<Arc<Style>> for LayerStyle {
    fn from(value: Arc<Style>) -> Self {
        Self::Plain(value)
    }
}
