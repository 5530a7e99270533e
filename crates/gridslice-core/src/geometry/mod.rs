//! Coordinate model for grid boxes.
//!
//! Boxes are stored in a fixed normalized space so that the editing session
//! never depends on the resolution of the source image or the size of the
//! element it is displayed in.
//!
//! # Coordinate Spaces
//!
//! - **Normalized**: 0 to 1000 on both axes, origin top-left. The only form
//!   that is ever stored.
//! - **Pixel**: normalized value scaled by the image dimensions / 1000.
//! - **Percent**: normalized value / 10, used to position boxes over the
//!   displayed image.
//!
//! Pixel and percent forms are derived on demand and never cached, so a
//! mutation of the stored box can't leave a stale derivative behind.

mod bbox;
mod convert;

pub use bbox::{BoundingBox, PercentRect, PixelBox, MIN_BOX_SIZE, NORMALIZED_MAX};
pub use convert::{
    normalized_to_percent, normalized_to_pixel, pixel_delta_to_normalized, Point,
};
