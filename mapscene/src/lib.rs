//! Mapscene turns a set of map layers into an ordered scene of visuals for the current viewport.
//!
//! The crate does not draw anything by itself. Concrete drawing is done by the application's
//! [`GeometryRenderer`](render::GeometryRenderer) and [`LabelRenderer`](render::LabelRenderer),
//! which produce opaque [`Visual`](render::Visual) handles. What the crate does is decide *what*
//! is drawn, in *which order* and *whether a visual from the previous frame can be reused*:
//!
//! * [`SceneRenderer`] iterates visible [`layers`](layer) in z-order and collects one
//!   [`LayerGroup`](scene::LayerGroup) per layer into a [`Scene`](scene::Scene).
//! * For every layer [`style`] and every feature in view, the effective style is resolved (theme
//!   styles compute it from feature attributes) and filtered by the
//!   [visibility rules](visibility::Visibility).
//! * Point and raster visuals are kept in the per-feature [render cache](render_cache) and only
//!   repositioned on the following frames. All other geometry kinds are rebuilt every time.
//! * A layer that fails (e.g. its data provider reports an error) results in an empty, degraded
//!   group. Other layers are not affected.
//!
//! ```ignore
//! let mut renderer = SceneRenderer::new(MyGeometryRenderer::new(), MyLabelRenderer::new());
//! let scene = renderer.render(&viewport, &layers);
//! host.mount(scene);
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
#[cfg(feature = "image")]
pub mod decoded_image;
pub mod error;
pub mod feature;
pub mod layer;
mod options;
pub mod render;
pub mod render_cache;
pub mod scene;
mod scene_renderer;
pub mod style;
mod viewport;
pub mod visibility;

#[cfg(test)]
pub(crate) mod tests;

pub use color::Color;
pub use error::MapsceneError;
pub use feature::{Feature, FieldValue};
pub use layer::{Layer, LayerKind};
pub use options::{CacheEviction, RenderOptions};
pub use scene_renderer::SceneRenderer;
pub use viewport::Viewport;

// Reexport mapscene_types
pub use mapscene_types;
