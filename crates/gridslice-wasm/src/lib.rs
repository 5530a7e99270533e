//! Gridslice WASM - WebAssembly bindings for Gridslice
//!
//! This crate exposes the gridslice-core slicing engine to JavaScript and
//! adapts JS callbacks into its detection and enhancement ports.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types and flat box conversions
//! - `decode` - Source image decoding
//! - `grid` - Row/column ordering of boxes
//! - `editor` - Interactive box editing session
//! - `slice` - Detection and tile generation
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession, generate_slices } from '@gridslice/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsEditSession(await detectBoxes(bytes));
//! // ... user edits ...
//! const result = generate_slices(bytes, session.confirm(), null, null);
//! console.log(`${result.rows}x${result.cols} grid, ${result.length} tiles`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod editor;
mod grid;
mod slice;
mod types;

// Re-export public types
pub use decode::{decode_image, get_orientation, sniff_mime_type};
pub use editor::JsEditSession;
pub use grid::{organize_boxes, JsGridLayout};
pub use slice::{analyze, generate_slices, generate_slices_upscaled, JsSliceResult};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Normalized coordinate range used by every box argument.
#[wasm_bindgen]
pub fn normalized_max() -> f64 {
    gridslice_core::NORMALIZED_MAX
}

/// Smallest width or height a resize can leave a box with.
#[wasm_bindgen]
pub fn min_box_size() -> f64 {
    gridslice_core::MIN_BOX_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_constants() {
        assert_eq!(normalized_max(), 1000.0);
        assert_eq!(min_box_size(), 20.0);
    }
}
