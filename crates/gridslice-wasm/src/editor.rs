//! Interactive box editor WASM bindings.
//!
//! The host forwards pointer events as plain numbers: gesture starts and
//! moves in display pixels, hit tests in normalized units.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsEditSession(detectedBoxes);
//!
//! canvas.onpointerdown = (e) => {
//!   const hit = session.hit_gesture(nx, ny, 15);
//!   if (hit) session.gesture_start(session.hit_index(nx, ny, 15)!, hit, e.clientX, e.clientY);
//! };
//! canvas.onpointermove = (e) => {
//!   if (session.gesture_move(e.clientX, e.clientY, rect.width, rect.height)) redraw();
//! };
//! canvas.onpointerup = () => session.gesture_end();
//!
//! const confirmed = session.confirm();
//! ```

use crate::grid::JsGridLayout;
use crate::types::{boxes_from_flat, boxes_to_flat};
use gridslice_core::{EditSession, GestureKind, Point, ResizeHandle};
use wasm_bindgen::prelude::*;

/// An editing session over detected boxes.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Open a session over flat detector output.
    ///
    /// Boxes are sanitized first; degenerate ones are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error for a partial box or when no usable box remains.
    #[wasm_bindgen(constructor)]
    pub fn new(boxes: &[f64]) -> Result<JsEditSession, JsValue> {
        Self::from_flat(boxes).map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Current boxes as a flat array.
    pub fn boxes(&self) -> Vec<f64> {
        boxes_to_flat(self.inner.boxes())
    }

    /// `[left, top, width, height]` of a box in percent, for overlay
    /// positioning. Empty when out of range.
    pub fn percent_rect(&self, index: usize) -> Vec<f64> {
        self.inner
            .boxes()
            .get(index)
            .map(|b| {
                let r = b.to_percent();
                vec![r.left, r.top, r.width, r.height]
            })
            .unwrap_or_default()
    }

    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> Option<usize> {
        self.inner.selected()
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.inner.select(index);
    }

    #[wasm_bindgen(getter)]
    pub fn active_index(&self) -> Option<usize> {
        self.inner.active_index()
    }

    /// Begin a gesture. `gesture` is `"move"` or a handle name
    /// (`n s e w ne nw se sw`). Returns `false` if ignored.
    pub fn gesture_start(&mut self, index: usize, gesture: &str, x: f64, y: f64) -> bool {
        match parse_gesture(gesture) {
            Some(kind) => self.inner.on_gesture_start(index, kind, Point::new(x, y)),
            None => false,
        }
    }

    pub fn gesture_move(&mut self, x: f64, y: f64, display_width: f64, display_height: f64) -> bool {
        self.inner
            .on_gesture_move(Point::new(x, y), display_width, display_height)
    }

    pub fn gesture_end(&mut self) {
        self.inner.on_gesture_end();
    }

    /// Index of the box under a normalized point.
    pub fn hit_index(&self, x: f64, y: f64, handle_radius: f64) -> Option<usize> {
        self.inner
            .hit_test(Point::new(x, y), handle_radius)
            .map(|(index, _)| index)
    }

    /// Gesture name for the zone under a normalized point.
    pub fn hit_gesture(&self, x: f64, y: f64, handle_radius: f64) -> Option<String> {
        self.inner
            .hit_test(Point::new(x, y), handle_radius)
            .map(|(_, kind)| gesture_name(kind).to_string())
    }

    pub fn delete_box(&mut self, index: usize) -> bool {
        self.inner.delete(index).is_some()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Give every box the selected box's size.
    pub fn sync_dimensions(&mut self) -> bool {
        self.inner.sync_dimensions()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    pub fn zoom_in(&mut self) {
        self.inner.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.inner.zoom_out();
    }

    pub fn zoom_reset(&mut self) {
        self.inner.zoom_reset();
    }

    /// Returns `true` if the wheel event was consumed for zooming.
    pub fn zoom_by_wheel(&mut self, delta_y: f64, modifier_held: bool) -> bool {
        self.inner.zoom_by_wheel(delta_y, modifier_held)
    }

    /// Reading order of the current boxes.
    pub fn organize(&self, image_width: u32, image_height: u32) -> JsGridLayout {
        JsGridLayout::from_layout(self.inner.organize(image_width, image_height))
    }

    /// Close the session and return the final boxes as a flat array.
    pub fn confirm(self) -> Vec<f64> {
        boxes_to_flat(&self.inner.confirm())
    }
}

impl JsEditSession {
    pub(crate) fn from_session(inner: EditSession) -> Self {
        Self { inner }
    }

    fn from_flat(boxes: &[f64]) -> Result<Self, String> {
        let raw = boxes_from_flat(boxes)?;
        EditSession::from_detection(raw)
            .map(Self::from_session)
            .map_err(|e| e.to_string())
    }
}

fn parse_gesture(name: &str) -> Option<GestureKind> {
    match name {
        "move" => Some(GestureKind::Move),
        other => ResizeHandle::from_name(other).map(GestureKind::Resize),
    }
}

fn gesture_name(kind: GestureKind) -> &'static str {
    match kind {
        GestureKind::Move => "move",
        GestureKind::Resize(handle) => handle.name(),
    }
}
