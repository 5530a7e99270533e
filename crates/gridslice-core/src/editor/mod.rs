//! Interactive crop refinement.
//!
//! [`EditSession`] owns the working set of boxes while the user adjusts
//! them. Pointer input arrives through three toolkit-neutral calls:
//!
//! - [`EditSession::on_gesture_start`] on pointer-down over a box body or handle
//! - [`EditSession::on_gesture_move`] on pointer-move while captured
//! - [`EditSession::on_gesture_end`] on pointer-up or capture loss
//!
//! Only one box can be under a gesture at a time. All geometry is clamped
//! arithmetic in normalized space: an edit that would leave the canvas or go
//! below [`MIN_BOX_SIZE`](crate::geometry::MIN_BOX_SIZE) is clamped, never
//! rejected.

mod gesture;
mod ops;
mod session;
mod zoom;

pub use gesture::{hit_test_box, GestureKind, Interaction, ResizeHandle};
pub use ops::{resize_box, sync_box_to, translate_box};
pub use session::EditSession;
pub use zoom::{Zoom, WHEEL_ZOOM_FACTOR, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
