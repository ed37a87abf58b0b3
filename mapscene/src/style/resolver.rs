use std::sync::Arc;

use crate::error::MapsceneError;
use crate::feature::Feature;
use crate::style::{LayerStyle, Style};
use crate::visibility::Visibility;

/// Returns the concrete style the layer style has for the feature.
///
/// Plain styles are returned as is. Themes are evaluated every time this function is called, the
/// result is not cached.
pub fn resolve(
    layer_style: &LayerStyle,
    feature: &Feature,
) -> Result<Option<Arc<Style>>, MapsceneError> {
    match layer_style {
        LayerStyle::Plain(style) => Ok(Some(style.clone())),
        LayerStyle::Theme(theme) => theme.get_style(feature),
    }
}

/// Same as [`resolve`], but also filters out styles that should not be drawn at the given
/// resolution (disabled or out of their visibility range).
pub fn resolve_applicable(
    layer_style: &LayerStyle,
    feature: &Feature,
    resolution: f64,
) -> Result<Option<Arc<Style>>, MapsceneError> {
    let resolved = resolve(layer_style, feature)?;
    Ok(resolved.filter(|style| {
        let visible = style.is_visible_at(resolution);
        if !visible {
            log::trace!("Style {:?} is not visible at resolution {resolution}", style.id());
        }

        visible
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{CustomTheme, VectorStyle};
    use mapscene_types::Point2d;

    fn feature() -> Feature {
        Feature::new(Point2d::new(0.0, 0.0))
    }

    #[test]
    fn plain_style_resolves_to_itself() {
        let style = Arc::new(Style::vector(VectorStyle::default()));
        let resolved = resolve(&LayerStyle::Plain(style.clone()), &feature()).expect("no error");
        assert!(resolved.is_some_and(|s| Arc::ptr_eq(&s, &style)));
    }

    #[test]
    fn theme_returning_none() {
        let theme = LayerStyle::theme(CustomTheme::new(|_: &Feature| None));
        assert!(resolve(&theme, &feature()).expect("no error").is_none());
    }

    #[test]
    fn applicable_filters_by_range_and_flag() {
        let style: LayerStyle = Style::vector(VectorStyle::default())
            .with_visible_range(5.0, 20.0)
            .into();

        assert!(resolve_applicable(&style, &feature(), 5.0).expect("no error").is_some());
        assert!(resolve_applicable(&style, &feature(), 20.0).expect("no error").is_some());
        assert!(resolve_applicable(&style, &feature(), 4.9).expect("no error").is_none());
        assert!(resolve_applicable(&style, &feature(), 20.1).expect("no error").is_none());

        let disabled: LayerStyle = Style::vector(VectorStyle::default()).with_enabled(false).into();
        assert!(resolve_applicable(&disabled, &feature(), 10.0).expect("no error").is_none());
    }

    #[test]
    fn theme_result_is_filtered_too() {
        let hidden = Arc::new(Style::vector(VectorStyle::default()).with_visible_range(0.0, 1.0));
        let theme = LayerStyle::theme(CustomTheme::new(move |_: &Feature| Some(hidden.clone())));
        assert!(resolve_applicable(&theme, &feature(), 10.0).expect("no error").is_none());
    }
}
