//! Slicing pipeline WASM bindings.
//!
//! JS callbacks are adapted into the core's detection and enhancement
//! ports. Callbacks are synchronous; a host with an async service resolves
//! it before calling in, or passes detected boxes straight to
//! `JsEditSession`.
//!
//! # Example
//!
//! ```typescript
//! import { generate_slices } from '@gridslice/wasm';
//!
//! const result = generate_slices(bytes, session.confirm(), upscaleOnCanvas, {
//!   output_format: 'png',
//! });
//! for (let i = 0; i < result.length; i++) {
//!   zip.file(result.tile_file_name(i, 'grid')!, result.tile_blob(i)!);
//! }
//! ```

use crate::editor::JsEditSession;
use crate::types::{boxes_from_flat, config_from_js};
use gridslice_core::decode::{decode_image, DecodedImage};
use gridslice_core::encode::encode_tile;
use gridslice_core::slice::{
    self, CancelFlag, DetectBoxes, DetectError, EnhanceError, EnhanceTile, EnhancedTile,
    PassthroughEnhancer, SliceConfig, SliceResult, UpscaleEnhancer,
};
use gridslice_core::BoundingBox;
use wasm_bindgen::prelude::*;

/// Tiles produced by a slicing run, in reading order.
#[wasm_bindgen]
pub struct JsSliceResult {
    inner: SliceResult,
}

#[wasm_bindgen]
impl JsSliceResult {
    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> usize {
        self.inner.rows
    }

    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> usize {
        self.inner.cols
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Encoded bytes of the tile at `sequence`. Makes a copy.
    pub fn tile_blob(&self, sequence: usize) -> Option<Vec<u8>> {
        self.inner.tiles.get(sequence).map(|t| t.blob.clone())
    }

    pub fn tile_width(&self, sequence: usize) -> Option<u32> {
        self.inner.tiles.get(sequence).map(|t| t.width)
    }

    pub fn tile_height(&self, sequence: usize) -> Option<u32> {
        self.inner.tiles.get(sequence).map(|t| t.height)
    }

    pub fn tile_row(&self, sequence: usize) -> Option<usize> {
        self.inner.tiles.get(sequence).map(|t| t.row)
    }

    pub fn tile_col(&self, sequence: usize) -> Option<usize> {
        self.inner.tiles.get(sequence).map(|t| t.col)
    }

    /// Whether the enhancer's output was used for this tile.
    pub fn tile_enhanced(&self, sequence: usize) -> Option<bool> {
        self.inner.tiles.get(sequence).map(|t| t.enhanced)
    }

    pub fn tile_mime_type(&self, sequence: usize) -> Option<String> {
        self.inner
            .tiles
            .get(sequence)
            .map(|t| t.mime_type().to_string())
    }

    /// Archive entry name, e.g. `grid_01.jpg`.
    pub fn tile_file_name(&self, sequence: usize, prefix: &str) -> Option<String> {
        self.inner.tiles.get(sequence).map(|t| t.file_name(prefix))
    }
}

/// Detection port backed by a JS function `(bytes, mimeType) => number[]`
/// returning flat boxes.
struct JsFunctionDetector {
    callback: js_sys::Function,
}

impl DetectBoxes for JsFunctionDetector {
    fn detect(&mut self, image: &[u8], mime_type: &str) -> Result<Vec<BoundingBox>, DetectError> {
        let bytes = js_sys::Uint8Array::from(image);
        let response = self
            .callback
            .call2(&JsValue::NULL, &bytes.into(), &JsValue::from_str(mime_type))
            .map_err(|err| DetectError::Unavailable(js_error_message(&err)))?;

        let flat: Vec<f64> = serde_wasm_bindgen::from_value(response)
            .map_err(|e| DetectError::InvalidResponse(e.to_string()))?;
        boxes_from_flat(&flat).map_err(DetectError::InvalidResponse)
    }
}

/// Enhancement port backed by a JS function
/// `(tileBytes, mimeType) => Uint8Array | null`.
///
/// The tile is handed over encoded in the run's output format. `null` or
/// `undefined` declines the tile. Returned bytes in the output format become
/// the tile blob unchanged.
struct JsFunctionEnhancer {
    callback: js_sys::Function,
    config: SliceConfig,
}

impl EnhanceTile for JsFunctionEnhancer {
    fn enhance(&mut self, tile: &DecodedImage, mime_type: &str) -> Result<EnhancedTile, EnhanceError> {
        let encoded = encode_tile(tile, self.config.output_format, self.config.jpeg_quality)
            .map_err(|e| EnhanceError::InvalidOutput(e.to_string()))?;
        let bytes = js_sys::Uint8Array::from(encoded.as_slice());

        let response = self
            .callback
            .call2(&JsValue::NULL, &bytes.into(), &JsValue::from_str(mime_type))
            .map_err(|err| {
                web_sys::console::warn_1(&err);
                EnhanceError::Unavailable(js_error_message(&err))
            })?;

        if response.is_null() || response.is_undefined() {
            return Err(EnhanceError::Declined);
        }

        decode_enhanced(js_sys::Uint8Array::new(&response).to_vec())
    }
}

fn decode_enhanced(bytes: Vec<u8>) -> Result<EnhancedTile, EnhanceError> {
    let image = decode_image(&bytes).map_err(|e| EnhanceError::InvalidOutput(e.to_string()))?;
    Ok(EnhancedTile::with_encoded(image, bytes))
}

fn js_error_message(err: &JsValue) -> String {
    err.as_string()
        .unwrap_or_else(|| "JavaScript callback threw".to_string())
}

/// Run a JS detector over the source and open an editing session.
///
/// # Errors
///
/// Returns an error if the detector throws, returns something other than
/// a flat number array, or proposes no usable box.
#[wasm_bindgen]
pub fn analyze(
    bytes: &[u8],
    mime_type: &str,
    detector: js_sys::Function,
) -> Result<JsEditSession, JsValue> {
    let mut detector = JsFunctionDetector { callback: detector };
    slice::analyze(&mut detector, bytes, mime_type)
        .map(JsEditSession::from_session)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Cut the source into tiles along flat boxes.
///
/// `enhancer` is optional; without one every tile keeps its raw crop.
/// `config` is a plain object like `{ output_format: 'png', jpeg_quality: 90 }`
/// and may be omitted.
#[wasm_bindgen]
pub fn generate_slices(
    bytes: &[u8],
    boxes: &[f64],
    enhancer: Option<js_sys::Function>,
    config: JsValue,
) -> Result<JsSliceResult, JsValue> {
    let config = config_from_js(config)?;
    let result = match enhancer {
        Some(callback) => slice_flat(
            bytes,
            boxes,
            &mut JsFunctionEnhancer { callback, config },
            &config,
        ),
        None => slice_flat(bytes, boxes, &mut PassthroughEnhancer, &config),
    };
    result.map_err(|e| JsValue::from_str(&e))
}

/// Cut the source into tiles and upscale each one locally.
#[wasm_bindgen]
pub fn generate_slices_upscaled(
    bytes: &[u8],
    boxes: &[f64],
    factor: u32,
    max_edge: u32,
    config: JsValue,
) -> Result<JsSliceResult, JsValue> {
    let config = config_from_js(config)?;
    let mut enhancer = UpscaleEnhancer {
        factor,
        max_edge,
        ..Default::default()
    };
    slice_flat(bytes, boxes, &mut enhancer, &config).map_err(|e| JsValue::from_str(&e))
}

fn slice_flat<E>(
    bytes: &[u8],
    boxes: &[f64],
    enhancer: &mut E,
    config: &SliceConfig,
) -> Result<JsSliceResult, String>
where
    E: EnhanceTile + ?Sized,
{
    let boxes = boxes_from_flat(boxes)?;
    slice::generate_slices(bytes, &boxes, enhancer, config, &CancelFlag::new())
        .map(|inner| JsSliceResult { inner })
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridslice_core::encode::{encode_png, OutputFormat};

    fn source_png(width: u32, height: u32) -> Vec<u8> {
        encode_png(&vec![120u8; (width * height * 3) as usize], width, height).unwrap()
    }

    fn png_config() -> SliceConfig {
        SliceConfig {
            output_format: OutputFormat::Png,
            ..Default::default()
        }
    }

    #[test]
    fn test_slice_flat_two_tiles() {
        let source = source_png(100, 50);
        let boxes = [500.0, 0.0, 1000.0, 1000.0, 0.0, 0.0, 500.0, 1000.0];

        let result = slice_flat(&source, &boxes, &mut PassthroughEnhancer, &png_config()).unwrap();

        assert_eq!((result.rows(), result.cols(), result.length()), (1, 2, 2));
        assert_eq!(result.tile_width(0), Some(50));
        assert_eq!(result.tile_height(0), Some(50));
        assert_eq!(result.tile_col(1), Some(1));
        assert_eq!(result.tile_row(1), Some(0));
        assert_eq!(result.tile_mime_type(0).as_deref(), Some("image/png"));
        assert_eq!(result.tile_file_name(1, "post").as_deref(), Some("post_02.png"));
        assert!(result.tile_blob(0).is_some());
        assert_eq!(result.tile_blob(2), None);
    }

    #[test]
    fn test_slice_flat_upscaled() {
        let source = source_png(40, 40);
        let mut enhancer = UpscaleEnhancer::default();
        let result = slice_flat(
            &source,
            &[0.0, 0.0, 1000.0, 1000.0],
            &mut enhancer,
            &SliceConfig::default(),
        )
        .unwrap();

        assert_eq!(result.tile_width(0), Some(80));
        assert_eq!(result.tile_enhanced(0), Some(true));
        assert_eq!(result.tile_file_name(0, "grid").as_deref(), Some("grid_01.jpg"));
    }

    #[test]
    fn test_slice_flat_errors() {
        let source = source_png(10, 10);
        let err = slice_flat(&source, &[], &mut PassthroughEnhancer, &SliceConfig::default())
            .err()
            .unwrap();
        assert_eq!(err, "No boxes to slice");

        assert!(slice_flat(&source, &[1.0], &mut PassthroughEnhancer, &SliceConfig::default()).is_err());
        assert!(slice_flat(
            &[1, 2, 3],
            &[0.0, 0.0, 1000.0, 1000.0],
            &mut PassthroughEnhancer,
            &SliceConfig::default()
        )
        .is_err());
    }

    #[test]
    fn test_decode_enhanced_rejects_garbage() {
        assert!(matches!(
            decode_enhanced(vec![9, 9, 9]),
            Err(EnhanceError::InvalidOutput(_))
        ));
    }

    #[test]
    fn test_decode_enhanced_keeps_encoded_bytes() {
        let png = source_png(3, 3);
        let out = decode_enhanced(png.clone()).unwrap();
        assert_eq!((out.image.width, out.image.height), (3, 3));
        assert_eq!(out.encoded, Some(png));
    }
}
