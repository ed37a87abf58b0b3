//! Error types used by the crate.

use mapscene_types::error::MapsceneTypesError;
use thiserror::Error;

#[cfg(feature = "image")]
use image::ImageError;

/// Mapscene error type.
#[derive(Debug, Error)]
pub enum MapsceneError {
    /// Feature provider failed to enumerate features, e.g. because the feature set was modified
    /// during enumeration.
    #[error("feature provider failed: {0}")]
    Provider(String),
    /// Theme style could not compute a style for a feature.
    #[error("failed to resolve style: {0}")]
    StyleResolution(String),
    /// Host failed to export the scene.
    #[error("failed to export scene: {0}")]
    Export(String),
    /// Image decoding error.
    #[cfg(feature = "image")]
    #[error("image decode error: {0:?}")]
    ImageDecode(#[from] ImageError),
    /// Invalid geometry data.
    #[error(transparent)]
    Types(#[from] MapsceneTypesError),
    /// Generic error - details are inside.
    #[error("{0}")]
    Generic(String),
}
