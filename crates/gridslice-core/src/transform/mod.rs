//! Cropping of tiles out of the decoded source image.
//!
//! # Coordinate System
//!
//! - Boxes are given in normalized 0-1000 space (see [`crate::geometry`])
//! - They are projected onto the source's pixel grid right before cropping
//! - Origin is the top-left corner

mod crop;

pub use crop::{crop_box, crop_pixels};
