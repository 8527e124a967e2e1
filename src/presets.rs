//! Boot-time animations
//!
//! The two animations the fan controller firmware starts with, before any
//! configuration arrives.

use crate::color::{Rgb, rgb_from_u32};
use crate::error::ConfigError;
use crate::model::{AnimationModel, Channel, Keyframe};
use crate::timeline::CycleTiming;

/// Brightness both presets start with
pub const PRESET_BRIGHTNESS: f32 = 0.2;

/// Cycle timing both presets start with
pub const PRESET_TIMING: CycleTiming = CycleTiming::new(300, 1000);

const SWEEP_KEYFRAMES: [Keyframe; 3] = [
    Keyframe::new(0.0, 0.0),
    Keyframe::new(0.25, 0.75),
    Keyframe::new(0.0, 1.0),
];

#[allow(clippy::unreadable_literal)]
const SWEEP_COLORS: [Rgb; 3] = [
    rgb_from_u32(0xFF0000),
    rgb_from_u32(0x00FF00),
    rgb_from_u32(0x0000FF),
];

const TEAL_BAR_KEYFRAMES: [Keyframe; 2] = [Keyframe::new(0.0, 0.1), Keyframe::new(0.9, 1.0)];

#[allow(clippy::unreadable_literal)]
const TEAL_BAR_COLORS: [Rgb; 1] = [rgb_from_u32(0x005050)];

/// Red-green-blue band growing out of the strip start and sweeping to full length
pub fn sweep(strip_length: usize) -> Result<AnimationModel, ConfigError> {
    preset(strip_length, &SWEEP_KEYFRAMES, &SWEEP_COLORS)
}

/// Narrow teal bar travelling from the start of the strip to the end
pub fn teal_bar(strip_length: usize) -> Result<AnimationModel, ConfigError> {
    preset(strip_length, &TEAL_BAR_KEYFRAMES, &TEAL_BAR_COLORS)
}

fn preset(
    strip_length: usize,
    keyframes: &[Keyframe],
    colors: &[Rgb],
) -> Result<AnimationModel, ConfigError> {
    let channel = Channel::new(keyframes, colors)?;
    AnimationModel::new(strip_length)
        .with_brightness(PRESET_BRIGHTNESS)
        .with_timing(PRESET_TIMING)
        .with_channel(channel)
        .map_err(|_| ConfigError::UnknownChannel)
}
