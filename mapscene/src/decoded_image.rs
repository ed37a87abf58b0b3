//! Decoding of encoded images (PNG, JPEG) into raster features.

use image::GenericImageView;
use mapscene_types::{Raster, RasterImage, Rect};

use crate::error::MapsceneError;

/// An image decoded into RGBA pixels.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    bytes: Vec<u8>,
    dimensions: (u32, u32),
}

impl DecodedImage {
    /// Decodes an image from a byte slice.
    ///
    /// The format is guessed from the data. Non-RGBA images are converted to RGBA.
    pub fn new(bytes: &[u8]) -> Result<Self, MapsceneError> {
        let decoded = image::load_from_memory(bytes)?;
        let dimensions = decoded.dimensions();

        Ok(Self {
            bytes: decoded.to_rgba8().into_vec(),
            dimensions,
        })
    }

    /// Width and height in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.dimensions
    }

    /// RGBA pixel data.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Converts into the pixel buffer of a raster geometry.
    pub fn into_raster_image(self) -> Result<RasterImage, MapsceneError> {
        let (width, height) = self.dimensions;
        Ok(RasterImage::new(self.bytes, width, height)?)
    }
}

/// Decodes the image and places it over `bbox` in world coordinates.
pub fn raster_from_encoded(bytes: &[u8], bbox: Rect) -> Result<Raster, MapsceneError> {
    let image = DecodedImage::new(bytes)?.into_raster_image()?;
    Ok(Raster::new(image, bbox))
}
