//! Gesture kinds and the per-session interaction state.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point};

/// One of the eight resize handles drawn on a selected box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    /// All handles, corners first so they win hit tests over edges.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::NE,
        ResizeHandle::SE,
        ResizeHandle::SW,
        ResizeHandle::N,
        ResizeHandle::E,
        ResizeHandle::S,
        ResizeHandle::W,
    ];

    #[inline]
    pub fn moves_north(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    #[inline]
    pub fn moves_south(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }

    #[inline]
    pub fn moves_east(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    #[inline]
    pub fn moves_west(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    /// Where the handle sits on `bbox`, in normalized units.
    pub fn position(self, bbox: &BoundingBox) -> Point {
        let center = bbox.center();
        let x = if self.moves_west() {
            bbox.xmin
        } else if self.moves_east() {
            bbox.xmax
        } else {
            center.x
        };
        let y = if self.moves_north() {
            bbox.ymin
        } else if self.moves_south() {
            bbox.ymax
        } else {
            center.y
        };
        Point::new(x, y)
    }

    /// Parse the lowercase compass name used by the presentation layer.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "n" => Some(ResizeHandle::N),
            "s" => Some(ResizeHandle::S),
            "e" => Some(ResizeHandle::E),
            "w" => Some(ResizeHandle::W),
            "ne" => Some(ResizeHandle::NE),
            "nw" => Some(ResizeHandle::NW),
            "se" => Some(ResizeHandle::SE),
            "sw" => Some(ResizeHandle::SW),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::NE => "ne",
            ResizeHandle::NW => "nw",
            ResizeHandle::SE => "se",
            ResizeHandle::SW => "sw",
        }
    }
}

/// What a pointer-down started: dragging the body or one of the handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureKind {
    Move,
    Resize(ResizeHandle),
}

/// Interaction state of an [`EditSession`](super::EditSession).
///
/// Holding the active index inside the gesture variants means a resize
/// without a box, or two boxes dragged at once, can't be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Moving {
        index: usize,
        /// Pointer position at gesture start, in display pixels.
        start: Point,
        /// The box as it was at gesture start.
        snapshot: BoundingBox,
    },
    Resizing {
        index: usize,
        handle: ResizeHandle,
        start: Point,
        snapshot: BoundingBox,
    },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Index of the box under an active gesture.
    pub fn active_index(&self) -> Option<usize> {
        match self {
            Interaction::Idle => None,
            Interaction::Moving { index, .. } | Interaction::Resizing { index, .. } => Some(*index),
        }
    }

    /// Handle being dragged, if resizing.
    pub fn handle(&self) -> Option<ResizeHandle> {
        match self {
            Interaction::Resizing { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Interaction::Idle => None,
            Interaction::Moving { .. } => Some(GestureKind::Move),
            Interaction::Resizing { handle, .. } => Some(GestureKind::Resize(*handle)),
        }
    }

    /// Same gesture, pointed at a different box index.
    pub(crate) fn with_index(self, new_index: usize) -> Self {
        match self {
            Interaction::Idle => Interaction::Idle,
            Interaction::Moving {
                start, snapshot, ..
            } => Interaction::Moving {
                index: new_index,
                start,
                snapshot,
            },
            Interaction::Resizing {
                handle,
                start,
                snapshot,
                ..
            } => Interaction::Resizing {
                index: new_index,
                handle,
                start,
                snapshot,
            },
        }
    }
}

/// Find which gesture zone of `bbox` a normalized point falls in.
///
/// Handles are checked before the body so a press on a handle never also
/// starts a move.
pub fn hit_test_box(bbox: &BoundingBox, point: Point, handle_radius: f64) -> Option<GestureKind> {
    for handle in ResizeHandle::ALL {
        let p = handle.position(bbox);
        if (p.x - point.x).abs() <= handle_radius && (p.y - point.y).abs() <= handle_radius {
            return Some(GestureKind::Resize(handle));
        }
    }

    bbox.contains(point).then_some(GestureKind::Move)
}
