//! Slicing configuration.

use serde::{Deserialize, Serialize};

use crate::encode::OutputFormat;

/// Options for a slicing run. Missing fields take their defaults when
/// deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    /// Encoding of the produced tiles.
    pub output_format: OutputFormat,
    /// JPEG quality, 1-100. Ignored for PNG.
    pub jpeg_quality: u8,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Jpeg,
            jpeg_quality: 92,
        }
    }
}
