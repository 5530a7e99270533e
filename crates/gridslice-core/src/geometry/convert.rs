//! Scalar conversions between normalized, pixel and percent space.

use serde::{Deserialize, Serialize};

use super::NORMALIZED_MAX;

/// A point in whatever space the caller is working in (screen pixels for
/// pointer input, normalized units for hit testing).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scale a normalized coordinate to pixels along an axis of `dimension` pixels.
#[inline]
pub fn normalized_to_pixel(value: f64, dimension: u32) -> f64 {
    value / NORMALIZED_MAX * dimension as f64
}

/// Convert a normalized coordinate to a 0-100 percentage of its container.
#[inline]
pub fn normalized_to_percent(value: f64) -> f64 {
    value / 10.0
}

/// Convert a pointer delta measured in displayed pixels to normalized units.
///
/// `display_width` and `display_height` are the on-screen size of the image
/// element, zoom included. A non-positive or non-finite display size, or a
/// non-finite delta, yields a zero delta on that axis.
pub fn pixel_delta_to_normalized(
    dx: f64,
    dy: f64,
    display_width: f64,
    display_height: f64,
) -> (f64, f64) {
    (axis_delta(dx, display_width), axis_delta(dy, display_height))
}

fn axis_delta(delta: f64, extent: f64) -> f64 {
    if !delta.is_finite() || !extent.is_finite() || extent <= 0.0 {
        return 0.0;
    }
    delta / extent * NORMALIZED_MAX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_to_pixel() {
        assert_eq!(normalized_to_pixel(500.0, 1080), 540.0);
        assert_eq!(normalized_to_pixel(0.0, 1080), 0.0);
        assert_eq!(normalized_to_pixel(1000.0, 1350), 1350.0);
    }

    #[test]
    fn test_normalized_to_percent() {
        assert_eq!(normalized_to_percent(250.0), 25.0);
        assert_eq!(normalized_to_percent(1000.0), 100.0);
    }

    #[test]
    fn test_pixel_delta_scales_by_display_size() {
        let (dx, dy) = pixel_delta_to_normalized(50.0, -20.0, 500.0, 400.0);
        assert_eq!(dx, 100.0);
        assert_eq!(dy, -50.0);
    }

    #[test]
    fn test_pixel_delta_zero_display_is_zero() {
        assert_eq!(pixel_delta_to_normalized(10.0, 10.0, 0.0, -5.0), (0.0, 0.0));
    }

    #[test]
    fn test_pixel_delta_non_finite_is_zero() {
        assert_eq!(
            pixel_delta_to_normalized(f64::NAN, f64::INFINITY, 100.0, 100.0),
            (0.0, 0.0)
        );
    }
}
