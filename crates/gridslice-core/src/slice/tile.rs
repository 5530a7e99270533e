//! Final tiles and the result set.

use serde::{Deserialize, Serialize};

use crate::encode::OutputFormat;
use crate::geometry::BoundingBox;

/// One cropped, possibly enhanced, encoded grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTile {
    /// Row-major position in the grid, from zero.
    pub sequence: usize,
    pub row: usize,
    pub col: usize,
    /// Pixel size of the encoded tile. Differs from the crop when the
    /// enhancer resized it.
    pub width: u32,
    pub height: u32,
    /// Encoded image bytes.
    pub blob: Vec<u8>,
    pub format: OutputFormat,
    /// `false` when the enhancer failed and the raw crop was kept.
    pub enhanced: bool,
    /// The box the tile was cut from.
    pub bbox: BoundingBox,
}

impl ImageTile {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// File name for downloads and archives, numbered from 1:
    /// `"{prefix}_{nn}.{ext}"`.
    pub fn file_name(&self, prefix: &str) -> String {
        format!(
            "{}_{:02}.{}",
            prefix,
            self.sequence + 1,
            self.format.extension()
        )
    }
}

/// All tiles of one run, in sequence order, with the grid shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliceResult {
    pub tiles: Vec<ImageTile>,
    pub rows: usize,
    pub cols: usize,
}

impl SliceResult {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Ordered `(file name, blob)` pairs for the archive collaborator.
    pub fn archive_entries(&self, prefix: &str) -> Vec<(String, &[u8])> {
        self.tiles
            .iter()
            .map(|t| (t.file_name(prefix), t.blob.as_slice()))
            .collect()
    }
}
