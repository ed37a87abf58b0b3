//! Georeferenced raster images.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MapsceneTypesError;
use crate::rect::Rect;

/// Decoded image with RGBA pixel data.
///
/// The pixel buffer is shared, so cloning the image (and a feature holding it) is cheap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RasterImage {
    bytes: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl RasterImage {
    /// Creates a new image from raw RGBA bytes.
    ///
    /// Returns an error if the length of `bytes` is not `width * height * 4`.
    pub fn new(bytes: Vec<u8>, width: u32, height: u32) -> Result<Self, MapsceneTypesError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(MapsceneTypesError::InvalidRaster {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            bytes: bytes.into(),
            width,
            height,
        })
    }

    /// RGBA pixel data.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Image placed on the map by its bounding box.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Raster {
    image: RasterImage,
    bbox: Rect,
}

impl Raster {
    /// Creates a new raster covering `bbox` in world coordinates.
    pub fn new(image: RasterImage, bbox: Rect) -> Self {
        Self { image, bbox }
    }

    /// The image.
    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    /// Area of the map covered by the image.
    pub fn bbox(&self) -> Rect {
        self.bbox
    }
}
