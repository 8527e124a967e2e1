//! Frame generation
//!
//! Turns an [`AnimationModel`] and a phase into pixels. Every channel is drawn
//! as a gradient between its color stops across the window interpolated from
//! its keyframes, with one segment of fade-to-black on either side. Channels
//! are composited with [`blend_additive_max`] so overlapping bands never erase
//! each other.
//!
//! The generator is deterministic, never blocks, and never indexes outside the
//! color stops or the frame: pixel positions wrap modulo the strip length.

use crate::color::{BLACK, Rgb, blend_additive_max, lerp, lerp_gamma};
use crate::model::{AnimationModel, Channel, Keyframe};

/// Window of a channel in pixel coordinates, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: f32,
    pub end: f32,
}

impl Window {
    pub fn width(self) -> f32 {
        self.end - self.start
    }
}

/// Fill `frame` with the picture of `model` at `phase`.
///
/// Only the first `strip_length` pixels are drawn; the rest of the slice is
/// cleared. Channels without color stops contribute nothing.
pub fn generate_frame(model: &AnimationModel, phase: f32, gamma: f32, frame: &mut [Rgb]) {
    frame.fill(BLACK);

    let len = frame.len().min(model.strip_length());
    let frame = &mut frame[..len];
    if frame.is_empty() {
        return;
    }

    for channel in model.channels() {
        render_channel(channel, phase, gamma, frame);
    }
}

/// Interpolate the active window of a keyframe sequence at `phase`.
///
/// The sequence is cyclic: the segment after the last keyframe leads back to
/// the first one, and phase 1.0 lands exactly on the last keyframe.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn active_window(keyframes: &[Keyframe], phase: f32, strip_length: usize) -> Option<Window> {
    let count = keyframes.len();
    if count == 0 {
        return None;
    }

    let phase = if phase.is_nan() {
        0.0
    } else {
        phase.clamp(0.0, 1.0)
    };
    let scaled = phase * (count - 1) as f32;
    let segment = libm::floorf(scaled);
    let fraction = scaled - segment;

    let index = (segment as usize) % count;
    let from = keyframes[index];
    let to = keyframes[(index + 1) % count];

    let length = strip_length as f32;
    let p1 = lerp(from.start, to.start, fraction) * length;
    let p2 = lerp(from.end, to.end, fraction) * length;

    Some(Window {
        start: p1.min(p2),
        end: p1.max(p2),
    })
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn render_channel(channel: &Channel, phase: f32, gamma: f32, frame: &mut [Rgb]) {
    let stops = channel.color_stops();
    let (Some(&first), Some(&last)) = (stops.first(), stops.last()) else {
        return;
    };
    let Some(window) = active_window(channel.keyframes(), phase, frame.len()) else {
        return;
    };

    let last_stop = stops.len() - 1;
    let segment_size = window.width() / stops.len() as f32;
    let interior = pixel_span(libm::ceilf(window.start), libm::floorf(window.end));

    if segment_size <= 0.0 {
        // Zero-width window: one flat pixel at most, no fades
        for pixel in interior.take(frame.len()) {
            blend_pixel(frame, pixel, first);
        }
        return;
    }

    for pixel in interior.take(frame.len() + 1) {
        let offset = (pixel as f32 - window.start) / segment_size;
        let stop = (libm::floorf(offset).max(0.0) as usize).min(last_stop);
        let fraction = offset - stop as f32;
        let next = stops[(stop + 1).min(last_stop)];
        blend_pixel(frame, pixel, lerp_gamma(stops[stop], next, fraction, gamma));
    }

    let trailing = pixel_span(
        libm::ceilf(window.end),
        libm::floorf(window.end + segment_size),
    );
    for pixel in trailing.take(frame.len()) {
        let fade = (pixel as f32 - window.end) / segment_size;
        blend_pixel(frame, pixel, lerp_gamma(last, BLACK, fade, gamma));
    }

    let leading = pixel_span(
        libm::floorf(window.start - segment_size),
        libm::floorf(window.start),
    );
    for pixel in leading.rev().take(frame.len()) {
        let fade = (pixel as f32 - window.start + segment_size) / segment_size;
        blend_pixel(frame, pixel, lerp_gamma(BLACK, first, fade, gamma));
    }
}

/// Inclusive range of integer pixel positions between two whole floats
#[allow(clippy::cast_possible_truncation)]
fn pixel_span(from: f32, to: f32) -> core::ops::RangeInclusive<i64> {
    (from as i64)..=(to as i64)
}

/// Composite `color` onto the pixel at `position`, wrapping around the strip
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
fn blend_pixel(frame: &mut [Rgb], position: i64, color: Rgb) {
    let len = frame.len() as i64;
    if len == 0 {
        return;
    }
    let index = position.rem_euclid(len) as usize;
    if let Some(pixel) = frame.get_mut(index) {
        *pixel = blend_additive_max(*pixel, color);
    }
}
