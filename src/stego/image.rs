//! Still-image carrier for LSB steganography.
//!
//! Decodes the carrier to an RGB8 pixel grid and applies the bit
//! embedder to its flat sample buffer. Output is always PNG: a lossy
//! re-encode would destroy the least significant bits, so the encoded
//! file is written lossless regardless of the input format.

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::bits::{self, EmbedError};

/// Errors that can occur during image carrier operations.
#[derive(Error, Debug)]
pub enum ImageCarrierError {
    #[error("Cannot decode carrier image: {0}")]
    CarrierRead(String),

    #[error("Cannot write carrier image: {0}")]
    CarrierWrite(String),

    #[error("{0}")]
    Embed(#[from] EmbedError),
}

/// A still-image carrier.
pub struct ImageCarrier {
    image: RgbImage,
}

impl ImageCarrier {
    /// Loads a carrier from an image file (any format the `image` crate
    /// decodes, e.g. PNG or JPEG).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImageCarrierError> {
        let image =
            image::open(path).map_err(|e| ImageCarrierError::CarrierRead(e.to_string()))?;
        Ok(Self::from_image(image))
    }

    /// Loads a carrier from encoded image bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageCarrierError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ImageCarrierError::CarrierRead(e.to_string()))?;
        Ok(Self::from_image(image))
    }

    /// Wraps a decoded image, flattening it to RGB8.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgb8(),
        }
    }

    /// Wraps an RGB8 pixel buffer directly.
    pub fn from_rgb(image: RgbImage) -> Self {
        Self { image }
    }

    /// Carrier dimensions in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Maximum payload length in bytes, terminator accounted for.
    pub fn capacity_bytes(&self) -> usize {
        (bits::capacity_bits(self.image.as_raw()) / 8).saturating_sub(1)
    }

    /// Embeds a payload into a copy of the carrier.
    ///
    /// The source pixels are never mutated; dimensions and pixel order
    /// are preserved, only least significant bits change.
    pub fn hide(&self, payload: &str) -> Result<ImageCarrier, ImageCarrierError> {
        let mut output = self.image.clone();
        bits::embed(&mut output, payload)?;
        Ok(ImageCarrier { image: output })
    }

    /// Extracts a hidden payload, if any.
    pub fn reveal(&self) -> Option<String> {
        bits::extract(&self.image)
    }

    /// Writes the carrier as PNG.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageCarrierError> {
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| ImageCarrierError::CarrierWrite(e.to_string()))
    }

    /// Returns the carrier as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ImageCarrierError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| ImageCarrierError::CarrierWrite(e.to_string()))?;
        Ok(bytes)
    }

    /// Returns a reference to the underlying pixel buffer.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Consumes self and returns the underlying pixel buffer.
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Output path for an encoded image: `<stem>_encoded.png` next to the
/// input.
pub fn encoded_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("carrier");
    input.with_file_name(format!("{}_encoded.png", stem))
}

/// Hides a payload in an image file and writes the result next to it.
///
/// Returns the output path. The source file is never modified.
pub fn hide_in_file<P: AsRef<Path>>(path: P, payload: &str) -> Result<PathBuf, ImageCarrierError> {
    let path = path.as_ref();
    let carrier = ImageCarrier::from_file(path)?;
    let output = encoded_output_path(path);
    carrier.hide(payload)?.save(&output)?;
    Ok(output)
}

/// Reveals a hidden payload from an image file.
pub fn reveal_from_file<P: AsRef<Path>>(path: P) -> Result<Option<String>, ImageCarrierError> {
    Ok(ImageCarrier::from_file(path)?.reveal())
}
