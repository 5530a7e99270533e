//! Clamped box arithmetic behind the editor gestures.
//!
//! None of these functions can fail. An edit that would leave the canvas or
//! shrink a box below [`MIN_BOX_SIZE`] is clamped to the nearest valid box.

use crate::geometry::{BoundingBox, MIN_BOX_SIZE, NORMALIZED_MAX};

use super::ResizeHandle;

/// Translate `snapshot` by a normalized delta, keeping it on the canvas.
///
/// The size of the box never changes; only its origin is clamped.
pub fn translate_box(snapshot: &BoundingBox, dx: f64, dy: f64) -> BoundingBox {
    let (xmin, xmax) = place_axis(snapshot.xmin + dx, snapshot.width());
    let (ymin, ymax) = place_axis(snapshot.ymin + dy, snapshot.height());
    BoundingBox::new(xmin, ymin, xmax, ymax)
}

/// Move the edges named by `handle` by a normalized delta.
///
/// Each moving edge is kept at least [`MIN_BOX_SIZE`] away from the opposite
/// edge, which stays where it was in `snapshot`, and inside the canvas.
/// When both can't hold, the canvas bound wins.
pub fn resize_box(snapshot: &BoundingBox, handle: ResizeHandle, dx: f64, dy: f64) -> BoundingBox {
    let mut b = *snapshot;

    if handle.moves_west() {
        b.xmin = (snapshot.xmin + dx)
            .min(snapshot.xmax - MIN_BOX_SIZE)
            .max(0.0);
    }
    if handle.moves_east() {
        b.xmax = (snapshot.xmax + dx)
            .max(snapshot.xmin + MIN_BOX_SIZE)
            .min(NORMALIZED_MAX);
    }
    if handle.moves_north() {
        b.ymin = (snapshot.ymin + dy)
            .min(snapshot.ymax - MIN_BOX_SIZE)
            .max(0.0);
    }
    if handle.moves_south() {
        b.ymax = (snapshot.ymax + dy)
            .max(snapshot.ymin + MIN_BOX_SIZE)
            .min(NORMALIZED_MAX);
    }

    b
}

/// Resize `target` to `width` x `height` around its own center.
///
/// A box pushed past the canvas is shifted back on that axis rather than
/// shrunk. Only a size larger than the canvas itself is cut at the far edge.
pub fn sync_box_to(target: &BoundingBox, width: f64, height: f64) -> BoundingBox {
    let center = target.center();
    let (xmin, xmax) = place_axis(center.x - width / 2.0, width);
    let (ymin, ymax) = place_axis(center.y - height / 2.0, height);
    BoundingBox::new(xmin, ymin, xmax, ymax)
}

/// Place a span of `size` starting at `start` inside `[0, NORMALIZED_MAX]`.
///
/// The start is pulled back so the span ends on the canvas, then floored at
/// zero. The end is capped at the canvas edge, which only bites when `size`
/// exceeds the canvas or on rounding at the boundary.
fn place_axis(start: f64, size: f64) -> (f64, f64) {
    let max_start = (NORMALIZED_MAX - size).max(0.0);
    let start = start.min(max_start).max(0.0);
    let end = (start + size).min(NORMALIZED_MAX);
    (start, end)
}
