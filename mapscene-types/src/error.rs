//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum MapsceneTypesError {
    /// Raster pixel buffer does not match the declared dimensions.
    #[error("invalid raster buffer: expected {expected} bytes, got {actual}")]
    InvalidRaster {
        /// Number of bytes required by the dimensions (`width * height * 4`).
        expected: usize,
        /// Number of bytes provided.
        actual: usize,
    },
}
