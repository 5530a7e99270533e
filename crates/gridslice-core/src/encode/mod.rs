//! Tile encoding.
//!
//! Each finished tile is encoded once, right after cropping and enhancement,
//! so the result set holds blobs ready for download or archiving.
//!
//! - JPEG with configurable quality (default for photo grids)
//! - PNG for lossless output

mod format;
mod jpeg;
mod png;

pub use format::{encode_tile, OutputFormat};
pub use jpeg::encode_jpeg;
pub use png::encode_png;

use thiserror::Error;

/// Errors that can occur while encoding a tile.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Check an RGB buffer against its dimensions before handing it to an encoder.
fn validate_rgb(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
