//! Phase-level errors.
//!
//! Geometry and editor operations never fail: out-of-range edits are clamped.
//! The errors here end a whole phase (analysis or slicing) and hand control
//! back to the previous interactive step. Per-tile enhancement failures are
//! recovered inside the pipeline and never surface as a [`SliceError`].

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

#[derive(Debug, Error)]
pub enum SliceError {
    /// The detector failed, returned nothing, or returned nothing usable.
    #[error("Detection failed: {0}")]
    DetectionFailure(String),

    /// Slicing was started without any confirmed boxes.
    #[error("No boxes to slice")]
    NoBoxes,

    /// The source image could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A tile could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The run was cancelled between tiles.
    #[error("Slicing cancelled")]
    Cancelled,
}
