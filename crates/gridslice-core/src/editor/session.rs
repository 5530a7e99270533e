//! The editing session: working box set, gesture state, selection and zoom.

use tracing::{debug, warn};

use crate::error::SliceError;
use crate::geometry::{pixel_delta_to_normalized, BoundingBox, Point, MIN_BOX_SIZE};
use crate::grid::{organize, GridLayout};

use super::gesture::{hit_test_box, GestureKind, Interaction};
use super::ops::{resize_box, sync_box_to, translate_box};
use super::zoom::Zoom;

/// State of one crop-refinement session.
///
/// Box indices are identities for the lifetime of the session and follow
/// the detection order, not the grid order. The session is consumed by
/// [`confirm`](EditSession::confirm) or [`cancel`](EditSession::cancel).
#[derive(Debug, Clone)]
pub struct EditSession {
    detected: Vec<BoundingBox>,
    boxes: Vec<BoundingBox>,
    interaction: Interaction,
    selected: Option<usize>,
    zoom: Zoom,
}

impl EditSession {
    /// Start a session over `detected`. The boxes are kept for [`reset`](Self::reset).
    pub fn new(detected: Vec<BoundingBox>) -> Self {
        Self {
            boxes: detected.clone(),
            detected,
            interaction: Interaction::Idle,
            selected: None,
            zoom: Zoom::default(),
        }
    }

    /// Start a session from raw detector output.
    ///
    /// Boxes are repaired with [`BoundingBox::sanitized`]; unusable ones are
    /// dropped. Survivors thinner than [`MIN_BOX_SIZE`] are grown to it. Fails with [`SliceError::DetectionFailure`] when nothing is
    /// left, in which case no session exists.
    pub fn from_detection(raw: Vec<BoundingBox>) -> Result<Self, SliceError> {
        let total = raw.len();
        let boxes: Vec<BoundingBox> = raw
            .into_iter()
            .filter_map(BoundingBox::sanitized)
            .map(|b| b.grown_to(MIN_BOX_SIZE))
            .collect();

        if boxes.len() < total {
            warn!(
                dropped = total - boxes.len(),
                kept = boxes.len(),
                "dropped degenerate boxes from detection"
            );
        }

        if boxes.is_empty() {
            return Err(SliceError::DetectionFailure(
                "no usable boxes detected".to_string(),
            ));
        }

        Ok(Self::new(boxes))
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Boxes as originally detected.
    pub fn detected(&self) -> &[BoundingBox] {
        &self.detected
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Index of the box being dragged or resized.
    pub fn active_index(&self) -> Option<usize> {
        self.interaction.active_index()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select a box, or clear the selection. Out-of-range indices clear it.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.boxes.len());
    }

    // Gestures

    /// Begin a move or resize on box `index`.
    ///
    /// `pointer` is in display pixels. Ignored (returns `false`) while another
    /// gesture is active or when `index` doesn't exist. The box also becomes
    /// the selection.
    pub fn on_gesture_start(&mut self, index: usize, kind: GestureKind, pointer: Point) -> bool {
        if !self.interaction.is_idle() {
            return false;
        }
        let Some(snapshot) = self.boxes.get(index).copied() else {
            return false;
        };

        self.interaction = match kind {
            GestureKind::Move => Interaction::Moving {
                index,
                start: pointer,
                snapshot,
            },
            GestureKind::Resize(handle) => Interaction::Resizing {
                index,
                handle,
                start: pointer,
                snapshot,
            },
        };
        self.selected = Some(index);
        true
    }

    /// Update the active gesture for a new pointer position.
    ///
    /// `display_width`/`display_height` are the on-screen size of the image,
    /// used to convert the pointer delta to normalized units. Returns `false`
    /// when idle.
    pub fn on_gesture_move(
        &mut self,
        pointer: Point,
        display_width: f64,
        display_height: f64,
    ) -> bool {
        let updated = match self.interaction {
            Interaction::Idle => return false,
            Interaction::Moving {
                index,
                start,
                snapshot,
            } => {
                let (dx, dy) = pixel_delta_to_normalized(
                    pointer.x - start.x,
                    pointer.y - start.y,
                    display_width,
                    display_height,
                );
                (index, translate_box(&snapshot, dx, dy))
            }
            Interaction::Resizing {
                index,
                handle,
                start,
                snapshot,
            } => {
                let (dx, dy) = pixel_delta_to_normalized(
                    pointer.x - start.x,
                    pointer.y - start.y,
                    display_width,
                    display_height,
                );
                (index, resize_box(&snapshot, handle, dx, dy))
            }
        };

        let (index, bbox) = updated;
        match self.boxes.get_mut(index) {
            Some(slot) => {
                *slot = bbox;
                true
            }
            None => {
                self.interaction = Interaction::Idle;
                false
            }
        }
    }

    /// End the active gesture. Selection is kept.
    pub fn on_gesture_end(&mut self) {
        self.interaction = Interaction::Idle;
    }

    /// Find the box and gesture zone under a normalized point.
    ///
    /// Handles of any box win over box bodies. Later boxes are drawn on top,
    /// so they are checked first.
    pub fn hit_test(&self, point: Point, handle_radius: f64) -> Option<(usize, GestureKind)> {
        let handle_hit = self.boxes.iter().enumerate().rev().find_map(|(i, b)| {
            match hit_test_box(b, point, handle_radius) {
                Some(kind @ GestureKind::Resize(_)) => Some((i, kind)),
                _ => None,
            }
        });

        handle_hit.or_else(|| {
            self.boxes
                .iter()
                .enumerate()
                .rev()
                .find(|(_, b)| b.contains(point))
                .map(|(i, _)| (i, GestureKind::Move))
        })
    }

    // Editing commands

    /// Remove box `index`.
    ///
    /// Selection and any active gesture follow the remaining boxes; they are
    /// cleared if they pointed at the removed box.
    pub fn delete(&mut self, index: usize) -> Option<BoundingBox> {
        if index >= self.boxes.len() {
            return None;
        }
        let removed = self.boxes.remove(index);

        self.selected = shift_after_removal(self.selected, index);
        self.interaction = match shift_after_removal(self.interaction.active_index(), index) {
            Some(new_index) => self.interaction.with_index(new_index),
            None => Interaction::Idle,
        };

        debug!(index, remaining = self.boxes.len(), "deleted box");
        Some(removed)
    }

    /// Throw away every edit and return to the detected boxes.
    pub fn reset(&mut self) {
        self.boxes = self.detected.clone();
        self.selected = None;
        self.interaction = Interaction::Idle;
        self.zoom.reset();
    }

    /// Give every other box the size of the selected box.
    ///
    /// Returns `false` when nothing is selected.
    pub fn sync_dimensions(&mut self) -> bool {
        match self.selected {
            Some(source) => self.sync_dimensions_from(source),
            None => false,
        }
    }

    /// Give every box other than `source` the width and height of `source`,
    /// each keeping its own center.
    ///
    /// Ends any active gesture, whose snapshot would no longer match.
    pub fn sync_dimensions_from(&mut self, source: usize) -> bool {
        let Some(src) = self.boxes.get(source).copied() else {
            return false;
        };
        let (width, height) = (src.width(), src.height());
        self.interaction = Interaction::Idle;

        for (i, bbox) in self.boxes.iter_mut().enumerate() {
            if i != source {
                *bbox = sync_box_to(bbox, width, height);
            }
        }

        debug!(source, width, height, "synced box dimensions");
        true
    }

    // Zoom

    pub fn zoom(&self) -> f64 {
        self.zoom.scale()
    }

    pub fn zoom_in(&mut self) {
        self.zoom.step_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.step_out();
    }

    pub fn zoom_reset(&mut self) {
        self.zoom.reset();
    }

    /// Wheel zoom, only while the modifier is held. Returns whether the
    /// event was consumed.
    pub fn zoom_by_wheel(&mut self, delta_y: f64, modifier_held: bool) -> bool {
        self.zoom.wheel(delta_y, modifier_held)
    }

    // Output

    /// Grid layout of the current boxes over an image of the given size.
    pub fn organize(&self, image_width: u32, image_height: u32) -> GridLayout {
        organize(&self.boxes, image_width, image_height)
    }

    /// Finish the session and hand over the confirmed boxes.
    pub fn confirm(self) -> Vec<BoundingBox> {
        self.boxes
    }

    /// Discard the session.
    pub fn cancel(self) {}
}

fn shift_after_removal(index: Option<usize>, removed: usize) -> Option<usize> {
    match index {
        Some(i) if i == removed => None,
        Some(i) if i > removed => Some(i - 1),
        other => other,
    }
}
