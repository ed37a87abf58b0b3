use std::sync::Arc;

use ahash::HashMap;
use maybe_sync::{MaybeSend, MaybeSync};

use crate::error::MapsceneError;
use crate::feature::{Feature, FieldValue};
use crate::style::Style;

/// Data-driven style: computes the style of every feature from its attributes.
///
/// The theme is asked again on every frame, since feature attributes may change between frames.
/// Returned styles should be long-living shared instances (e.g. created when the theme is built),
/// otherwise the cached visuals of the feature are never reused.
pub trait ThemeStyle: MaybeSend + MaybeSync {
    /// Returns the style for the feature, or `None` if the feature should not be drawn with this
    /// theme.
    ///
    /// An error aborts rendering of the whole layer for the current frame.
    fn get_style(&self, feature: &Feature) -> Result<Option<Arc<Style>>, MapsceneError>;
}

/// Theme defined by a closure.
pub struct CustomTheme<F> {
    style_fn: F,
}

impl<F> CustomTheme<F>
where
    F: Fn(&Feature) -> Option<Arc<Style>>,
{
    /// Creates a new theme.
    pub fn new(style_fn: F) -> Self {
        Self { style_fn }
    }
}

impl<F> ThemeStyle for CustomTheme<F>
where
    F: Fn(&Feature) -> Option<Arc<Style>> + MaybeSend + MaybeSync,
{
    fn get_style(&self, feature: &Feature) -> Result<Option<Arc<Style>>, MapsceneError> {
        Ok((self.style_fn)(feature))
    }
}

/// Theme that picks a style by the value of one attribute.
///
/// Values are compared by their string representation, so a numeric attribute `3` matches the
/// category `"3"`. Features with no value for the attribute, or with a value that has no category,
/// get the default style.
pub struct CategoryTheme {
    field: String,
    categories: HashMap<String, Arc<Style>>,
    default: Option<Arc<Style>>,
}

impl CategoryTheme {
    /// Creates a theme classifying features by the `field` attribute.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            categories: HashMap::default(),
            default: None,
        }
    }

    /// Adds a category.
    pub fn with_category(mut self, value: impl Into<String>, style: impl Into<Arc<Style>>) -> Self {
        self.categories.insert(value.into(), style.into());
        self
    }

    /// Sets the style for features that do not fall into any category.
    pub fn with_default(mut self, style: impl Into<Arc<Style>>) -> Self {
        self.default = Some(style.into());
        self
    }
}

impl ThemeStyle for CategoryTheme {
    fn get_style(&self, feature: &Feature) -> Result<Option<Arc<Style>>, MapsceneError> {
        let category = match feature.field(&self.field) {
            None | Some(FieldValue::Null) => None,
            Some(value) => self.categories.get(&value.to_string()),
        };

        Ok(category.or(self.default.as_ref()).cloned())
    }
}
