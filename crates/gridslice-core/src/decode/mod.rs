//! Source image decoding.
//!
//! This module provides functionality for:
//! - Decoding the uploaded grid screenshot (JPEG, PNG or WebP) into RGB pixels
//! - Correcting EXIF orientation so boxes line up with what the user sees
//! - Rescaling decoded images, used by the local tile enhancer
//!
//! All operations are synchronous. The decoded source is read-only for the
//! rest of a slicing run.

mod resize;
mod source;
mod types;

pub use resize::{resize, scale_to_fit};
pub use source::{decode_image, get_orientation, sniff_mime_type};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
