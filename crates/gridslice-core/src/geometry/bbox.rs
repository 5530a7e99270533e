//! Normalized bounding boxes and their derived pixel/percent forms.

use serde::{Deserialize, Serialize};

use super::convert::{normalized_to_percent, normalized_to_pixel, Point};

/// Upper bound of the normalized coordinate space on both axes.
pub const NORMALIZED_MAX: f64 = 1000.0;

/// Smallest width or height a resize may produce, in normalized units.
pub const MIN_BOX_SIZE: f64 = 20.0;

/// A box in normalized 0-1000 space.
///
/// A valid box satisfies `xmin < xmax` and `ymin < ymax` with every bound
/// inside `[0, 1000]`. Editor operations only ever produce valid boxes from
/// valid input; use [`BoundingBox::sanitized`] on untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Repair a box coming from an untrusted source.
    ///
    /// Swapped edges are reordered and every bound is clamped into the
    /// normalized range. Returns `None` if any bound is not finite or the
    /// repaired box has zero width or height.
    pub fn sanitized(self) -> Option<Self> {
        let bounds = [self.xmin, self.ymin, self.xmax, self.ymax];
        if bounds.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let [x0, y0, x1, y1] = bounds.map(|v| v.clamp(0.0, NORMALIZED_MAX));
        let sanitized = Self::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1));

        sanitized.is_valid().then_some(sanitized)
    }

    /// Widen or heighten a valid box to at least `min_size` on each axis,
    /// around its center and kept inside the canvas.
    pub fn grown_to(self, min_size: f64) -> Self {
        let (xmin, xmax) = grow_axis(self.xmin, self.xmax, min_size);
        let (ymin, ymax) = grow_axis(self.ymin, self.ymax, min_size);
        Self::new(xmin, ymin, xmax, ymax)
    }

    /// Width in normalized units.
    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// Height in normalized units.
    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Center point in normalized units.
    pub fn center(&self) -> Point {
        Point::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    /// Check the ordering and range invariants.
    pub fn is_valid(&self) -> bool {
        let in_range = |v: f64| (0.0..=NORMALIZED_MAX).contains(&v);
        in_range(self.xmin)
            && in_range(self.ymin)
            && in_range(self.xmax)
            && in_range(self.ymax)
            && self.xmin < self.xmax
            && self.ymin < self.ymax
    }

    /// Check whether a normalized point lies inside the box (edges included).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.xmin && point.x <= self.xmax && point.y >= self.ymin && point.y <= self.ymax
    }

    /// Scale the box onto an image of `image_width` x `image_height` pixels.
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> PixelBox {
        let x = normalized_to_pixel(self.xmin, image_width);
        let y = normalized_to_pixel(self.ymin, image_height);
        let w = normalized_to_pixel(self.width(), image_width);
        let h = normalized_to_pixel(self.height(), image_height);

        PixelBox {
            x,
            y,
            w,
            h,
            cx: x + w / 2.0,
            cy: y + h / 2.0,
        }
    }

    /// Position of the box as percentages of its container.
    pub fn to_percent(&self) -> PercentRect {
        PercentRect {
            left: normalized_to_percent(self.xmin),
            top: normalized_to_percent(self.ymin),
            width: normalized_to_percent(self.width()),
            height: normalized_to_percent(self.height()),
        }
    }
}

/// Pixel-space geometry of a box. Recomputed whenever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub cx: f64,
    pub cy: f64,
}

impl PixelBox {
    /// Whole-pixel crop rectangle `(x, y, width, height)` inside an image.
    ///
    /// The origin is floored, the far edge rounded, and the result clamped to
    /// the image. The rectangle is never smaller than 1x1 for a non-empty
    /// image.
    pub fn crop_rect(&self, image_width: u32, image_height: u32) -> (u32, u32, u32, u32) {
        let (x, w) = crop_axis(self.x, self.w, image_width);
        let (y, h) = crop_axis(self.y, self.h, image_height);
        (x, y, w, h)
    }
}

fn crop_axis(start: f64, extent: f64, limit: u32) -> (u32, u32) {
    let start_px = (start.max(0.0).floor() as u32).min(limit.saturating_sub(1));
    let end_px = ((start + extent).max(0.0).round() as u32).min(limit);
    let size = end_px.saturating_sub(start_px).max(1);
    (start_px, size)
}

fn grow_axis(start: f64, end: f64, min_size: f64) -> (f64, f64) {
    if end - start >= min_size {
        return (start, end);
    }
    let size = min_size.min(NORMALIZED_MAX);
    let start = ((start + end - size) / 2.0).clamp(0.0, NORMALIZED_MAX - size);
    (start, start + size)
}

/// Box position as 0-100 percentages of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_center() {
        let b = BoundingBox::new(100.0, 200.0, 400.0, 300.0);
        assert_eq!(b.width(), 300.0);
        assert_eq!(b.height(), 100.0);
        assert_eq!(b.center(), Point::new(250.0, 250.0));
    }

    #[test]
    fn test_is_valid() {
        assert!(BoundingBox::new(0.0, 0.0, 1000.0, 1000.0).is_valid());
        assert!(!BoundingBox::new(10.0, 0.0, 10.0, 100.0).is_valid());
        assert!(!BoundingBox::new(-1.0, 0.0, 10.0, 100.0).is_valid());
        assert!(!BoundingBox::new(0.0, 0.0, 10.0, 1000.5).is_valid());
    }

    #[test]
    fn test_sanitized_swaps_and_clamps() {
        let b = BoundingBox::new(600.0, 1200.0, 100.0, -50.0).sanitized().unwrap();
        assert_eq!(b, BoundingBox::new(100.0, 0.0, 600.0, 1000.0));
    }

    #[test]
    fn test_sanitized_rejects_degenerate() {
        assert!(BoundingBox::new(100.0, 100.0, 100.0, 300.0).sanitized().is_none());
        assert!(BoundingBox::new(1100.0, 0.0, 1200.0, 300.0).sanitized().is_none());
        assert!(BoundingBox::new(f64::NAN, 0.0, 100.0, 300.0).sanitized().is_none());
    }

    #[test]
    fn test_grown_to_min_size() {
        let thin = BoundingBox::new(990.0, 100.0, 1000.0, 400.0);
        assert_eq!(
            thin.grown_to(MIN_BOX_SIZE),
            BoundingBox::new(980.0, 100.0, 1000.0, 400.0)
        );

        let tiny = BoundingBox::new(495.0, 0.0, 505.0, 5.0);
        assert_eq!(
            tiny.grown_to(MIN_BOX_SIZE),
            BoundingBox::new(490.0, 0.0, 510.0, 20.0)
        );

        let big = BoundingBox::new(100.0, 100.0, 300.0, 300.0);
        assert_eq!(big.grown_to(MIN_BOX_SIZE), big);
    }

    #[test]
    fn test_to_pixels() {
        let b = BoundingBox::new(0.0, 500.0, 500.0, 1000.0);
        let p = b.to_pixels(1080, 1350);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 675.0);
        assert_eq!(p.w, 540.0);
        assert_eq!(p.h, 675.0);
        assert_eq!(p.cx, 270.0);
        assert_eq!(p.cy, 1012.5);
    }

    #[test]
    fn test_to_percent() {
        let r = BoundingBox::new(100.0, 250.0, 400.0, 750.0).to_percent();
        assert_eq!(r.left, 10.0);
        assert_eq!(r.top, 25.0);
        assert_eq!(r.width, 30.0);
        assert_eq!(r.height, 50.0);
    }

    #[test]
    fn test_contains() {
        let b = BoundingBox::new(100.0, 100.0, 200.0, 200.0);
        assert!(b.contains(Point::new(150.0, 150.0)));
        assert!(b.contains(Point::new(100.0, 200.0)));
        assert!(!b.contains(Point::new(99.0, 150.0)));
    }

    #[test]
    fn test_crop_rect_exact() {
        let p = BoundingBox::new(250.0, 250.0, 750.0, 750.0).to_pixels(100, 100);
        assert_eq!(p.crop_rect(100, 100), (25, 25, 50, 50));
    }

    #[test]
    fn test_crop_rect_clamps_to_image() {
        let p = PixelBox {
            x: 95.0,
            y: -3.0,
            w: 20.0,
            h: 10.0,
            cx: 105.0,
            cy: 2.0,
        };
        assert_eq!(p.crop_rect(100, 100), (95, 0, 5, 7));
    }

    #[test]
    fn test_crop_rect_minimum_size() {
        let p = BoundingBox::new(999.0, 999.0, 1000.0, 1000.0).to_pixels(10, 10);
        let (_, _, w, h) = p.crop_rect(10, 10);
        assert_eq!((w, h), (1, 1));
    }
}
