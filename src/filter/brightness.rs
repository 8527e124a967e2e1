//! Global brightness scaling
//!
//! Scales every channel of every pixel by the model brightness. Requests above
//! 1.0 are accepted by configuration but applied as 1.0: this stage can only
//! dim a frame, never amplify it.

use super::Filter;
use crate::color::{BLACK, Rgb, scale_rgb};

/// Brightness multiplier in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessFilter {
    factor: f32,
}

impl Default for BrightnessFilter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl BrightnessFilter {
    /// Create a filter from a requested brightness
    pub fn new(requested: f32) -> Self {
        let mut filter = Self { factor: 1.0 };
        filter.set(requested);
        filter
    }

    /// Update the requested brightness
    pub fn set(&mut self, requested: f32) {
        self.factor = if requested.is_nan() {
            0.0
        } else {
            requested.clamp(0.0, 1.0)
        };
    }

    /// Multiplier currently applied to pixels
    pub const fn factor(&self) -> f32 {
        self.factor
    }
}

impl Filter for BrightnessFilter {
    fn apply(&mut self, frame: &mut [Rgb]) {
        if self.factor >= 1.0 {
            return;
        }

        if self.factor <= 0.0 {
            frame.fill(BLACK);
            return;
        }

        for pixel in frame.iter_mut() {
            *pixel = scale_rgb(*pixel, self.factor);
        }
    }
}
