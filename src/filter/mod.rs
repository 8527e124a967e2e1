use crate::color::Rgb;

mod brightness;

pub use brightness::BrightnessFilter;

/// Post-processing step applied to a finished frame
pub trait Filter {
    /// Apply the filter to a frame
    fn apply(&mut self, frame: &mut [Rgb]);
}
