//! Slicing: from a source image and confirmed boxes to ordered tiles.
//!
//! # Phases
//!
//! 1. **Analysis** ([`analyze`]): the detection collaborator proposes boxes
//!    and an [`EditSession`](crate::editor::EditSession) is opened over them.
//! 2. **Refinement**: the user edits the boxes in the session.
//! 3. **Slicing** ([`generate_slices`]): the confirmed boxes are organized
//!    into a grid, then each tile is cropped, enhanced and encoded in
//!    sequence order.
//!
//! The detection and enhancement services are reached through the
//! [`DetectBoxes`] and [`EnhanceTile`] ports. Tiles are processed strictly one
//! after another, so at most one enhancement call is in flight.

mod config;
mod enhance;
mod pipeline;
mod ports;
mod tile;

pub use config::SliceConfig;
pub use enhance::{PassthroughEnhancer, UpscaleEnhancer};
pub use pipeline::{analyze, generate_slices, generate_slices_from_image, CancelFlag};
pub use ports::{DetectBoxes, DetectError, EnhanceError, EnhanceTile, EnhancedTile};
pub use tile::{ImageTile, SliceResult};
