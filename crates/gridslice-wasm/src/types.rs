//! WASM-compatible wrapper types and conversions.
//!
//! Boxes cross the boundary as flat `Float64Array`s of
//! `[xmin, ymin, xmax, ymax, ...]` in normalized 0-1000 units.

use gridslice_core::decode::DecodedImage;
use gridslice_core::{BoundingBox, SliceConfig};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// The pixel data stays in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from RGB pixel data (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array. Makes a copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    #[allow(dead_code)] // Used by tests and hosts linking the rlib
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Parse a flat `[xmin, ymin, xmax, ymax, ...]` array into boxes.
///
/// Values are taken as given; sanitizing is left to the caller.
pub(crate) fn boxes_from_flat(values: &[f64]) -> Result<Vec<BoundingBox>, String> {
    if values.len() % 4 != 0 {
        return Err(format!(
            "Box array length must be a multiple of 4, got {}",
            values.len()
        ));
    }

    Ok(values
        .chunks_exact(4)
        .map(|c| BoundingBox::new(c[0], c[1], c[2], c[3]))
        .collect())
}

/// Flatten boxes into `[xmin, ymin, xmax, ymax, ...]`.
pub(crate) fn boxes_to_flat(boxes: &[BoundingBox]) -> Vec<f64> {
    boxes
        .iter()
        .flat_map(|b| [b.xmin, b.ymin, b.xmax, b.ymax])
        .collect()
}

/// Read a slicing config from a plain JS object. `null` or `undefined`
/// yields the defaults; missing fields take their defaults too.
pub(crate) fn config_from_js(value: JsValue) -> Result<SliceConfig, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(SliceConfig::default());
    }

    let mut config: SliceConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid slice config: {}", e)))?;
    config.jpeg_quality = config.jpeg_quality.clamp(1, 100);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_decoded_image_accessors() {
        let img = JsDecodedImage::new(2, 1, vec![255, 128, 64, 32, 16, 8]);
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 1);
        assert_eq!(img.byte_length(), 6);
        assert_eq!(img.pixels(), vec![255, 128, 64, 32, 16, 8]);
    }

    #[test]
    fn test_decoded_conversion() {
        let decoded = DecodedImage::new(20, 10, vec![7u8; 20 * 10 * 3]);
        let js_img = JsDecodedImage::from_decoded(decoded.clone());
        assert_eq!(js_img.byte_length(), 600);
        assert_eq!(js_img.to_decoded(), decoded);
    }

    #[test]
    fn test_boxes_from_flat() {
        let boxes = boxes_from_flat(&[0.0, 10.0, 500.0, 510.0, 500.0, 10.0, 1000.0, 510.0]).unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[1], BoundingBox::new(500.0, 10.0, 1000.0, 510.0));
        assert!(boxes_from_flat(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_boxes_from_flat_rejects_partial_box() {
        let err = boxes_from_flat(&[0.0, 0.0, 100.0]).unwrap_err();
        assert!(err.contains("multiple of 4"));
    }

    #[test]
    fn test_boxes_to_flat() {
        let boxes = vec![
            BoundingBox::new(1.0, 2.0, 3.0, 4.0),
            BoundingBox::new(5.0, 6.0, 7.0, 8.0),
        ];
        let flat = boxes_to_flat(&boxes);
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(boxes_from_flat(&flat).unwrap(), boxes);
    }
}
