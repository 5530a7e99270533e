//! Zoom level of the editing view.

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.5;
/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 4.0;
/// Increment used by the zoom buttons.
pub const ZOOM_STEP: f64 = 0.25;
/// Zoom change per unit of wheel delta.
pub const WHEEL_ZOOM_FACTOR: f64 = 0.001;

/// A zoom factor kept inside `[ZOOM_MIN, ZOOM_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Zoom {
    pub fn new(scale: f64) -> Self {
        let mut zoom = Self::default();
        zoom.set(scale);
        zoom
    }

    #[inline]
    pub fn scale(self) -> f64 {
        self.0
    }

    /// Set the scale, clamped. Non-finite input is ignored.
    pub fn set(&mut self, scale: f64) {
        if scale.is_finite() {
            self.0 = scale.clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    pub fn step_in(&mut self) {
        self.set(self.0 + ZOOM_STEP);
    }

    pub fn step_out(&mut self) {
        self.set(self.0 - ZOOM_STEP);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply a wheel gesture.
    ///
    /// Only zooms while the modifier key is held; otherwise the event is left
    /// for ordinary scrolling. Positive `delta_y` (scrolling down) zooms out.
    /// Returns whether the event was consumed.
    pub fn wheel(&mut self, delta_y: f64, modifier_held: bool) -> bool {
        if !modifier_held || !delta_y.is_finite() {
            return false;
        }
        self.set(self.0 - delta_y * WHEEL_ZOOM_FACTOR);
        true
    }
}
