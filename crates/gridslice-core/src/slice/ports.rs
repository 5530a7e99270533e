//! Ports to the external detection and enhancement services.
//!
//! The core knows nothing about request or response schemas. Closures
//! implement both traits, which is enough for tests and simple hosts.

use thiserror::Error;

use crate::decode::DecodedImage;
use crate::geometry::BoundingBox;

/// Failure reported by a detector.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The service could not be reached or refused the request.
    #[error("Detection service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with something that isn't a box list.
    #[error("Invalid detection response: {0}")]
    InvalidResponse(String),
}

/// Failure reported by an enhancer. Always recovered by using the raw crop.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("Enhancement service unavailable: {0}")]
    Unavailable(String),

    /// The enhancer explicitly asked for the original crop to be kept.
    #[error("Enhancement declined")]
    Declined,

    /// The enhancer returned data that could not be used as an image.
    #[error("Invalid enhancement output: {0}")]
    InvalidOutput(String),
}

/// Proposes tile boxes for a whole source image.
///
/// Output is treated as untrusted: any count, shape or order is accepted and
/// repaired downstream.
pub trait DetectBoxes {
    fn detect(&mut self, image: &[u8], mime_type: &str) -> Result<Vec<BoundingBox>, DetectError>;
}

/// What an enhancer hands back for one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancedTile {
    /// The enhanced pixels. May have any dimensions.
    pub image: DecodedImage,
    /// The same image as encoded by the enhancer, if it has it. Stored as
    /// the tile blob as-is when it is in the run's output format, so the
    /// tile is not compressed twice. Must depict `image`.
    pub encoded: Option<Vec<u8>>,
}

impl EnhancedTile {
    pub fn with_encoded(image: DecodedImage, encoded: Vec<u8>) -> Self {
        Self {
            image,
            encoded: Some(encoded),
        }
    }
}

impl From<DecodedImage> for EnhancedTile {
    fn from(image: DecodedImage) -> Self {
        Self {
            image,
            encoded: None,
        }
    }
}

/// Improves a single cropped tile.
pub trait EnhanceTile {
    fn enhance(&mut self, tile: &DecodedImage, mime_type: &str)
        -> Result<EnhancedTile, EnhanceError>;
}

impl<F> DetectBoxes for F
where
    F: FnMut(&[u8], &str) -> Result<Vec<BoundingBox>, DetectError>,
{
    fn detect(&mut self, image: &[u8], mime_type: &str) -> Result<Vec<BoundingBox>, DetectError> {
        self(image, mime_type)
    }
}

impl<F> EnhanceTile for F
where
    F: FnMut(&DecodedImage, &str) -> Result<DecodedImage, EnhanceError>,
{
    fn enhance(
        &mut self,
        tile: &DecodedImage,
        mime_type: &str,
    ) -> Result<EnhancedTile, EnhanceError> {
        self(tile, mime_type).map(EnhancedTile::from)
    }
}
