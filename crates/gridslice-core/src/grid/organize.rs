//! Row/column clustering of boxes.
//!
//! # Algorithm
//!
//! 1. Project every box to pixel space and take its center and size.
//! 2. Sort by vertical center (stable, so ties keep input order).
//! 3. Walk the sorted boxes once. A box opens a new row when its center is
//!    at least half of its own pixel height away from the center of the
//!    first box in the current row; otherwise it joins that row.
//! 4. Sort each row by horizontal center.
//! 5. Number boxes row-major.
//!
//! Step 3 assumes rows are separated by a good fraction of a tile height,
//! which holds for uniform grid posts. Ragged grids or boxes straddling two
//! rows are not corrected.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{BoundingBox, PixelBox};

/// Position of one box in the reconstructed grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridAssignment {
    /// Index of the box in the input slice.
    pub index: usize,
    /// Row-major position, used for output naming.
    pub sequence: usize,
    /// Zero-based row, top to bottom.
    pub row: usize,
    /// Zero-based column within the row, left to right.
    pub col: usize,
    pub bbox: BoundingBox,
    pub pixel: PixelBox,
}

/// Result of [`organize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// Assignments in sequence order.
    pub order: Vec<GridAssignment>,
    /// Number of row clusters.
    pub rows: usize,
    /// Length of the longest row. Rows need not be equal length.
    pub cols: usize,
}

impl GridLayout {
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// The boxes in sequence order.
    pub fn boxes_in_order(&self) -> Vec<BoundingBox> {
        self.order.iter().map(|a| a.bbox).collect()
    }
}

struct Placed {
    index: usize,
    bbox: BoundingBox,
    pixel: PixelBox,
}

/// Cluster boxes into a row/column grid over an image of the given size.
///
/// An empty input yields an empty layout with zero rows and columns; callers
/// treat that as "nothing to slice".
pub fn organize(boxes: &[BoundingBox], image_width: u32, image_height: u32) -> GridLayout {
    if boxes.is_empty() {
        return GridLayout::default();
    }

    let mut placed: Vec<Placed> = boxes
        .iter()
        .enumerate()
        .map(|(index, bbox)| Placed {
            index,
            bbox: *bbox,
            pixel: bbox.to_pixels(image_width, image_height),
        })
        .collect();

    placed.sort_by(|a, b| a.pixel.cy.total_cmp(&b.pixel.cy));

    let mut rows: Vec<Vec<Placed>> = Vec::new();
    let mut anchor_cy = 0.0;

    for item in placed {
        match rows.last_mut() {
            Some(row) if (item.pixel.cy - anchor_cy).abs() < 0.5 * item.pixel.h => {
                row.push(item);
            }
            _ => {
                anchor_cy = item.pixel.cy;
                rows.push(vec![item]);
            }
        }
    }

    let row_count = rows.len();
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut order = Vec::with_capacity(boxes.len());

    for (row_idx, mut row) in rows.into_iter().enumerate() {
        row.sort_by(|a, b| a.pixel.cx.total_cmp(&b.pixel.cx));
        for (col_idx, item) in row.into_iter().enumerate() {
            order.push(GridAssignment {
                index: item.index,
                sequence: order.len(),
                row: row_idx,
                col: col_idx,
                bbox: item.bbox,
                pixel: item.pixel,
            });
        }
    }

    debug!(
        boxes = order.len(),
        rows = row_count,
        cols,
        "organized boxes into grid"
    );

    GridLayout {
        order,
        rows: row_count,
        cols,
    }
}



#[cfg(test)]
mod proptests {
    use super::test_support::uniform_grid;
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: A jittered, shuffled uniform grid is recovered exactly.
        #[test]
        fn prop_uniform_grid_recovered(
            rows in 1usize..=5,
            cols in 1usize..=5,
            gutter in 0.0f64..40.0,
            (width, height) in (200u32..=2000, 200u32..=2000),
            jitter in prop::collection::vec(-0.1f64..0.1, 25),
            keys in prop::collection::vec(any::<u32>(), 25),
        ) {
            let grid = uniform_grid(rows, cols, gutter);
            let tile_h = grid[0].height();

            let mut cells: Vec<usize> = (0..grid.len()).collect();
            cells.sort_by_key(|&i| (keys[i], i));

            let input: Vec<BoundingBox> = cells
                .iter()
                .map(|&i| {
                    let shift = jitter[i] * tile_h;
                    let b = grid[i];
                    BoundingBox::new(b.xmin, b.ymin + shift, b.xmax, b.ymax + shift)
                })
                .collect();

            let layout = organize(&input, width, height);

            prop_assert_eq!(layout.rows, rows);
            prop_assert_eq!(layout.cols, cols);
            for a in &layout.order {
                let cell = cells[a.index];
                prop_assert_eq!(a.row, cell / cols);
                prop_assert_eq!(a.col, cell % cols);
            }
        }

        /// Property: Every input box appears exactly once, rows and columns
        /// are contiguous from zero.
        #[test]
        fn prop_assignment_is_total_and_contiguous(
            boxes in prop::collection::vec(
                (0.0f64..900.0, 0.0f64..900.0, 20.0f64..100.0, 20.0f64..100.0),
                1..30,
            ),
        ) {
            let input: Vec<BoundingBox> = boxes
                .iter()
                .map(|&(x, y, w, h)| BoundingBox::new(x, y, x + w, y + h))
                .collect();
            let layout = organize(&input, 1000, 1000);

            let mut seen: Vec<usize> = layout.order.iter().map(|a| a.index).collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..input.len()).collect::<Vec<_>>());

            let mut expected_row = 0;
            let mut expected_col = 0;
            for a in &layout.order {
                if a.row != expected_row {
                    prop_assert_eq!(a.row, expected_row + 1);
                    expected_row = a.row;
                    expected_col = 0;
                }
                prop_assert_eq!(a.col, expected_col);
                expected_col += 1;
            }
            prop_assert_eq!(layout.rows, expected_row + 1);
        }
    }
}
