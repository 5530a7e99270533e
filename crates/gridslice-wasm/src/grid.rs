//! Grid ordering WASM bindings.

use crate::types::boxes_from_flat;
use gridslice_core::grid::{organize, GridLayout};
use wasm_bindgen::prelude::*;

/// Reading order of a set of boxes, as computed by the grid organizer.
///
/// Indexed by sequence number (0-based reading order).
#[wasm_bindgen]
pub struct JsGridLayout {
    inner: GridLayout,
}

#[wasm_bindgen]
impl JsGridLayout {
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

    /// Position in the input array of the box at `sequence`.
    pub fn index_at(&self, sequence: usize) -> Option<usize> {
        self.inner.order.get(sequence).map(|a| a.index)
    }

    pub fn row_at(&self, sequence: usize) -> Option<usize> {
        self.inner.order.get(sequence).map(|a| a.row)
    }

    pub fn col_at(&self, sequence: usize) -> Option<usize> {
        self.inner.order.get(sequence).map(|a| a.col)
    }

    /// Input indices in reading order.
    pub fn order(&self) -> Vec<u32> {
        self.inner.order.iter().map(|a| a.index as u32).collect()
    }
}

impl JsGridLayout {
    pub(crate) fn from_layout(inner: GridLayout) -> Self {
        Self { inner }
    }
}

/// Order flat boxes by row then column for an image of the given size.
///
/// # Errors
///
/// Returns an error if `boxes` doesn't hold whole boxes.
#[wasm_bindgen]
pub fn organize_boxes(
    boxes: &[f64],
    image_width: u32,
    image_height: u32,
) -> Result<JsGridLayout, JsValue> {
    organize_flat(boxes, image_width, image_height).map_err(|e| JsValue::from_str(&e))
}

fn organize_flat(boxes: &[f64], image_width: u32, image_height: u32) -> Result<JsGridLayout, String> {
    let boxes = boxes_from_flat(boxes)?;
    Ok(JsGridLayout::from_layout(organize(
        &boxes,
        image_width,
        image_height,
    )))
}
