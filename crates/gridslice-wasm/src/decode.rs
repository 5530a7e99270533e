//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, sniff_mime_type } from '@gridslice/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const mime = sniff_mime_type(bytes) ?? file.type;
//! const image = decode_image(bytes);
//! console.log(`${mime}: ${image.width}x${image.height}`);
//! ```

use crate::types::JsDecodedImage;
use gridslice_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a screenshot from bytes, with EXIF orientation applied.
///
/// # Errors
///
/// Returns an error if the bytes are empty, in an unsupported format or
/// corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation tag of the source (1-8), 1 when absent.
///
/// `decode_image` already applies it; hosts use it to rotate a native
/// `<img>` preview the same way.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

/// Guess the MIME type of encoded image bytes from their magic number.
#[wasm_bindgen]
pub fn sniff_mime_type(bytes: &[u8]) -> Option<String> {
    decode::sniff_mime_type(bytes).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridslice_core::encode::{encode_jpeg, encode_png};

    #[test]
    fn test_sniff_mime_type() {
        let png = encode_png(&[0u8; 4 * 4 * 3], 4, 4).unwrap();
        let jpeg = encode_jpeg(&[0u8; 4 * 4 * 3], 4, 4, 90).unwrap();
        assert_eq!(sniff_mime_type(&png).as_deref(), Some("image/png"));
        assert_eq!(sniff_mime_type(&jpeg).as_deref(), Some("image/jpeg"));
        assert_eq!(sniff_mime_type(&[0, 1, 2, 3]), None);
    }

    #[test]
    fn test_orientation_defaults_to_normal() {
        let png = encode_png(&[0u8; 4 * 4 * 3], 4, 4).unwrap();
        assert_eq!(get_orientation(&png), 1);
        assert_eq!(get_orientation(&[]), 1);
    }
}
