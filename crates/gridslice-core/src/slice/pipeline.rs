//! Analysis and slicing entry points.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::decode::{decode_image, sniff_mime_type, DecodeError, DecodedImage};
use crate::editor::EditSession;
use crate::encode::encode_tile;
use crate::error::SliceError;
use crate::geometry::BoundingBox;
use crate::grid::organize;
use crate::transform::crop_box;

use super::{DetectBoxes, EnhanceTile, ImageTile, SliceConfig, SliceResult};

/// Cooperative cancellation for a slicing run.
///
/// Clones share the flag, so a host can keep one and hand the other to the
/// pipeline. Checked before each tile.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Run detection on a source image and open an editing session over the
/// result.
///
/// # Errors
///
/// Returns `SliceError::DetectionFailure` if the detector fails or proposes
/// no usable box. No session is created in that case.
pub fn analyze<D>(detector: &mut D, source: &[u8], mime_type: &str) -> Result<EditSession, SliceError>
where
    D: DetectBoxes + ?Sized,
{
    let raw = detector
        .detect(source, mime_type)
        .map_err(|e| SliceError::DetectionFailure(e.to_string()))?;

    info!(boxes = raw.len(), mime_type, "detection finished");
    EditSession::from_detection(raw)
}

/// Decode `source` and cut it into tiles along `boxes`.
///
/// # Errors
///
/// - `SliceError::NoBoxes` if `boxes` is empty (checked before decoding)
/// - `SliceError::Decode` if the source can't be decoded
/// - `SliceError::Encode` if a tile can't be encoded
/// - `SliceError::Cancelled` if `cancel` is raised mid-run
pub fn generate_slices<E>(
    source: &[u8],
    boxes: &[BoundingBox],
    enhancer: &mut E,
    config: &SliceConfig,
    cancel: &CancelFlag,
) -> Result<SliceResult, SliceError>
where
    E: EnhanceTile + ?Sized,
{
    if boxes.is_empty() {
        return Err(SliceError::NoBoxes);
    }

    let image = decode_image(source)?;
    generate_slices_from_image(&image, boxes, enhancer, config, cancel)
}

/// Cut an already decoded image into tiles along `boxes`.
///
/// The grid order is fixed before the first tile is cropped. Tiles are then
/// cropped, enhanced and encoded one at a time in that order. An enhancement
/// failure, or enhancer output that isn't a well-formed image, only affects
/// its own tile, which keeps the raw crop.
pub fn generate_slices_from_image<E>(
    image: &DecodedImage,
    boxes: &[BoundingBox],
    enhancer: &mut E,
    config: &SliceConfig,
    cancel: &CancelFlag,
) -> Result<SliceResult, SliceError>
where
    E: EnhanceTile + ?Sized,
{
    if boxes.is_empty() {
        return Err(SliceError::NoBoxes);
    }
    if image.is_empty() {
        return Err(DecodeError::EmptyImage.into());
    }

    let layout = organize(boxes, image.width, image.height);
    let mime_type = config.output_format.mime_type();

    info!(
        tiles = layout.len(),
        rows = layout.rows,
        cols = layout.cols,
        "slicing started"
    );

    let mut tiles = Vec::with_capacity(layout.len());

    for assignment in &layout.order {
        if cancel.is_cancelled() {
            info!(done = tiles.len(), "slicing cancelled");
            return Err(SliceError::Cancelled);
        }

        let crop = crop_box(image, &assignment.bbox);

        let (pixels, encoded, enhanced) = match enhancer.enhance(&crop, mime_type) {
            Ok(out) if out.image.is_well_formed() => {
                let encoded = out
                    .encoded
                    .filter(|bytes| sniff_mime_type(bytes) == Some(mime_type));
                (out.image, encoded, true)
            }
            Ok(out) => {
                warn!(
                    sequence = assignment.sequence,
                    width = out.image.width,
                    height = out.image.height,
                    bytes = out.image.pixels.len(),
                    "enhancer returned an unusable image, keeping original crop"
                );
                (crop, None, false)
            }
            Err(e) => {
                warn!(
                    sequence = assignment.sequence,
                    error = %e,
                    "enhancement failed, keeping original crop"
                );
                (crop, None, false)
            }
        };

        let blob = match encoded {
            Some(bytes) => bytes,
            None => encode_tile(&pixels, config.output_format, config.jpeg_quality)?,
        };

        debug!(
            sequence = assignment.sequence,
            row = assignment.row,
            col = assignment.col,
            width = pixels.width,
            height = pixels.height,
            enhanced,
            "tile done"
        );

        tiles.push(ImageTile {
            sequence: assignment.sequence,
            row: assignment.row,
            col: assignment.col,
            width: pixels.width,
            height: pixels.height,
            blob,
            format: config.output_format,
            enhanced,
            bbox: assignment.bbox,
        });
    }

    info!(tiles = tiles.len(), "slicing finished");

    Ok(SliceResult {
        tiles,
        rows: layout.rows,
        cols: layout.cols,
    })
}
