//! Gridslice Core - grid-post slicing library
//!
//! This crate splits a screenshot of a social-media grid post into its
//! individual tiles. It covers the normalized box model, grid ordering,
//! the interactive box editor and the slicing pipeline. Detection and
//! enhancement are reached through the ports in [`slice`].

pub mod decode;
pub mod editor;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod slice;
pub mod transform;

pub use editor::{EditSession, GestureKind, Interaction, ResizeHandle};
pub use error::SliceError;
pub use geometry::{BoundingBox, Point, MIN_BOX_SIZE, NORMALIZED_MAX};
pub use grid::{organize, GridAssignment, GridLayout};
pub use slice::{
    analyze, generate_slices, CancelFlag, DetectBoxes, EnhanceTile, ImageTile, SliceConfig,
    SliceResult,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_reexports() {
        let bbox = BoundingBox::new(0.0, 0.0, NORMALIZED_MAX, NORMALIZED_MAX);
        let layout = organize(&[bbox], 100, 100);
        assert_eq!((layout.rows, layout.cols), (1, 1));
        assert!(MIN_BOX_SIZE < NORMALIZED_MAX);
    }
}
