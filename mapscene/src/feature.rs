//! Geographic features: a geometry, its own styles and a set of attributes.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use ahash::HashMap;
use mapscene_types::Geom;
use parking_lot::{Mutex, MutexGuard};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::render_cache::RenderCache;
use crate::style::Style;

/// Value of a feature attribute.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// No value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// String value.
    Text(String),
}

impl FieldValue {
    /// Returns the string if the value is [`FieldValue::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the number if the value is [`FieldValue::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns true if the value is [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A geographic object.
///
/// Features are created by [data providers](crate::layer::FeatureProvider) and shared with the
/// rendering pipeline as `Arc<Feature>`. The geometry, the styles and the attributes are read-only
/// from the pipeline's point of view. The only thing the pipeline changes is the feature's
/// [render cache](crate::render_cache), which lives as long as the feature does.
#[derive(Debug)]
pub struct Feature {
    geometry: Geom,
    styles: Vec<Arc<Style>>,
    fields: HashMap<String, FieldValue>,
    rendered: Mutex<RenderCache>,
}

impl Feature {
    /// Creates a new feature without styles and attributes.
    pub fn new(geometry: impl Into<Geom>) -> Self {
        Self {
            geometry: geometry.into(),
            styles: vec![],
            fields: HashMap::default(),
            rendered: Mutex::new(RenderCache::new()),
        }
    }

    /// Adds a feature-level style. Feature styles are drawn on top of all the layer styles.
    pub fn with_style(mut self, style: impl Into<Arc<Style>>) -> Self {
        self.styles.push(style.into());
        self
    }

    /// Sets an attribute value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Geometry of the feature.
    pub fn geometry(&self) -> &Geom {
        &self.geometry
    }

    /// Feature-level styles in render order.
    pub fn styles(&self) -> &[Arc<Style>] {
        &self.styles
    }

    /// Adds a feature-level style.
    pub fn add_style(&mut self, style: impl Into<Arc<Style>>) {
        self.styles.push(style.into());
    }

    /// Value of the attribute. Returns `None` if the feature has no such attribute.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Sets an attribute value, replacing the previous one.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Names of all attributes of the feature.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|name| name.as_str())
    }

    /// Number of visuals currently cached for this feature.
    pub fn rendered_count(&self) -> usize {
        self.rendered.lock().len()
    }

    /// Drops all cached visuals of this feature, forcing them to be rebuilt on the next render.
    pub fn clear_rendered(&self) {
        self.rendered.lock().clear();
    }

    pub(crate) fn render_cache(&self) -> MutexGuard<'_, RenderCache> {
        self.rendered.lock()
    }
}
