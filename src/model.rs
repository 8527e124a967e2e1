//! Animation data model
//!
//! One [`AnimationModel`] describes everything drawn on one strip: a fixed set
//! of channels, each with cyclic keyframes and a color-stop list, plus the
//! brightness and cycle timing shared by all channels.

use heapless::Vec;

use crate::color::Rgb;
use crate::error::{ConfigError, Field};
use crate::timeline::CycleTiming;

/// Maximum number of channels per strip
pub const MAX_CHANNELS: usize = 4;
/// Maximum number of keyframes per channel
pub const MAX_KEYFRAMES: usize = 16;
/// Maximum number of color stops per channel
pub const MAX_COLOR_STOPS: usize = 16;
/// Minimum number of keyframes a channel needs to animate
pub const MIN_KEYFRAMES: usize = 2;

/// Highest brightness accepted from configuration.
///
/// Rendering never applies more than 1.0, so values above it render the same
/// as 1.0.
pub const MAX_BRIGHTNESS: f32 = 3.0;

pub type Keyframes = Vec<Keyframe, MAX_KEYFRAMES>;
pub type ColorStops = Vec<Rgb, MAX_COLOR_STOPS>;
pub type Channels = Vec<Channel, MAX_CHANNELS>;

/// Spatial window of a channel at one point of the cycle
///
/// Both ends are fractions of the strip length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub start: f32,
    pub end: f32,
}

impl Keyframe {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Both ends are finite and within `[0, 1]`
    pub fn is_valid(self) -> bool {
        (0.0..=1.0).contains(&self.start) && (0.0..=1.0).contains(&self.end)
    }
}

/// One independently animated color band
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    keyframes: Keyframes,
    color_stops: ColorStops,
}

impl Channel {
    /// Build a channel from keyframes and color stops.
    ///
    /// Requires at least [`MIN_KEYFRAMES`] valid keyframes and one color stop,
    /// within the fixed capacities.
    pub fn new(keyframes: &[Keyframe], color_stops: &[Rgb]) -> Result<Self, ConfigError> {
        let keyframes = validate_keyframes(keyframes)?;
        if color_stops.is_empty() {
            return Err(ConfigError::MalformedField(Field::Color));
        }
        let color_stops = ColorStops::from_slice(color_stops)
            .map_err(|_| ConfigError::MalformedField(Field::Color))?;

        Ok(Self {
            keyframes,
            color_stops,
        })
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn color_stops(&self) -> &[Rgb] {
        &self.color_stops
    }

    /// Replace the whole keyframe sequence in one assignment
    pub(crate) fn replace_keyframes(&mut self, keyframes: Keyframes) {
        self.keyframes = keyframes;
    }

    /// Replace the whole color-stop sequence in one assignment
    pub(crate) fn replace_color_stops(&mut self, color_stops: ColorStops) {
        self.color_stops = color_stops;
    }
}

/// Check keyframe count, capacity and ranges, and copy them into owned storage
pub(crate) fn validate_keyframes(keyframes: &[Keyframe]) -> Result<Keyframes, ConfigError> {
    let malformed = ConfigError::MalformedField(Field::KeyFrame);
    if keyframes.len() < MIN_KEYFRAMES || !keyframes.iter().all(|frame| frame.is_valid()) {
        return Err(malformed);
    }
    Keyframes::from_slice(keyframes).map_err(|_| malformed)
}

/// Animation state of one rendering target
#[derive(Debug, Clone)]
pub struct AnimationModel {
    pub(crate) channels: Channels,
    pub(crate) brightness: f32,
    pub(crate) timing: CycleTiming,
    strip_length: usize,
}

impl AnimationModel {
    /// Create an empty model for a strip of `strip_length` pixels.
    ///
    /// Starts with no channels, full brightness and default cycle timing.
    pub fn new(strip_length: usize) -> Self {
        Self {
            channels: Channels::new(),
            brightness: 1.0,
            timing: CycleTiming::default(),
            strip_length,
        }
    }

    /// Append a channel
    ///
    /// Returns the channel back if all [`MAX_CHANNELS`] slots are taken.
    pub fn with_channel(mut self, channel: Channel) -> Result<Self, Channel> {
        self.push_channel(channel)?;
        Ok(self)
    }

    /// Append a channel in place
    ///
    /// Returns the channel back if all [`MAX_CHANNELS`] slots are taken.
    pub fn push_channel(&mut self, channel: Channel) -> Result<(), Channel> {
        self.channels.push(channel)
    }

    /// Set the brightness, clamped to `[0, MAX_BRIGHTNESS]`
    #[must_use]
    pub fn with_brightness(mut self, brightness: f32) -> Self {
        self.brightness = if brightness.is_nan() {
            0.0
        } else {
            brightness.clamp(0.0, MAX_BRIGHTNESS)
        };
        self
    }

    #[must_use]
    pub const fn with_timing(mut self, timing: CycleTiming) -> Self {
        self.timing = timing;
        self
    }

    pub const fn strip_length(&self) -> usize {
        self.strip_length
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Configured brightness, possibly above 1.0
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Multiplier actually applied to pixels.
    ///
    /// Configuration accepts up to [`MAX_BRIGHTNESS`], but output never
    /// exceeds the rendered colors, so anything above 1.0 is applied as 1.0.
    pub fn applied_brightness(&self) -> f32 {
        self.brightness.clamp(0.0, 1.0)
    }

    pub const fn timing(&self) -> CycleTiming {
        self.timing
    }

    pub const fn cycle_duration_ms(&self) -> u32 {
        self.timing.duration_ms
    }

    pub const fn cycle_hold_ms(&self) -> u32 {
        self.timing.hold_ms
    }

    /// Limit the strip length to the frame buffer capacity of a renderer
    pub(crate) fn limit_strip_length(&mut self, max: usize) {
        self.strip_length = self.strip_length.min(max);
    }
}
