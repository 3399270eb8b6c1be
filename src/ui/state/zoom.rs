// SPDX-License-Identifier: MPL-2.0
//! Zoom value types for the image viewer.
//!
//! - [`ZoomScale`]: current magnification, always within `MIN_ZOOM..=MAX_ZOOM`
//! - [`ZoomFactor`]: multiplier applied by one zoom step

pub use crate::config::{DEFAULT_ZOOM_FACTOR, MAX_ZOOM, MAX_ZOOM_FACTOR, MIN_ZOOM, MIN_ZOOM_FACTOR};

/// Viewer magnification, guaranteed to be within valid range (1×–8×).
///
/// This type ensures that scale values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomScale(f32);

impl ZoomScale {
    /// Creates a new scale, clamping the value to the valid range.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        Self(scale.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the scale is at the minimum value.
    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM
    }

    /// Returns whether the scale is at the maximum value.
    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM
    }

    /// Multiplies the scale by `factor`.
    #[must_use]
    pub fn zoom_in(self, factor: ZoomFactor) -> Self {
        Self::new(self.0 * factor.value())
    }

    /// Divides the scale by `factor`.
    #[must_use]
    pub fn zoom_out(self, factor: ZoomFactor) -> Self {
        Self::new(self.0 / factor.value())
    }
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self(MIN_ZOOM)
    }
}

/// Zoom step multiplier, guaranteed to be within valid range (1.05–4.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        Self(factor.clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(DEFAULT_ZOOM_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn default_scale_is_minimum() {
        let scale = ZoomScale::default();
        assert!(scale.is_min());
        assert_abs_diff_eq!(scale.value(), MIN_ZOOM);
    }

    #[test]
    fn new_clamps_to_range() {
        assert_abs_diff_eq!(ZoomScale::new(0.2).value(), MIN_ZOOM);
        assert_abs_diff_eq!(ZoomScale::new(99.0).value(), MAX_ZOOM);
        assert!(ZoomScale::new(99.0).is_max());
    }

    #[test]
    fn zoom_in_three_times_compounds() {
        let factor = ZoomFactor::default();
        let scale = ZoomScale::default()
            .zoom_in(factor)
            .zoom_in(factor)
            .zoom_in(factor);
        assert_abs_diff_eq!(scale.value(), 3.375);
    }

    #[test]
    fn zoom_out_stops_at_minimum() {
        let factor = ZoomFactor::default();
        let scale = ZoomScale::new(1.2).zoom_out(factor);
        assert!(scale.is_min());
    }

    #[test]
    fn factor_is_clamped() {
        assert_abs_diff_eq!(ZoomFactor::new(1.0).value(), MIN_ZOOM_FACTOR);
        assert_abs_diff_eq!(ZoomFactor::new(10.0).value(), MAX_ZOOM_FACTOR);
    }
}
