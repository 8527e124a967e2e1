//! Color interpolation and compositing
//!
//! All functions are pure and operate on single colors. Float math goes
//! through `libm` so the module stays usable on `no_std` targets without an FPU
//! runtime.

use crate::color::Rgb;

/// Gamma used by the renderer unless configured otherwise.
///
/// Calibrated against WS2812 strips; values between 0.2 and 1.2 all produce
/// usable gradients.
pub const DEFAULT_GAMMA: f32 = 1.2;

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Blend two colors channel by channel in sRGB space.
///
/// `t` is expected in `[0, 1]`; values outside are clamped.
#[inline]
pub fn lerp_linear(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    Rgb {
        r: lerp_channel_linear(a.r, b.r, t),
        g: lerp_channel_linear(a.g, b.g, t),
        b: lerp_channel_linear(a.b, b.b, t),
    }
}

/// Blend two colors in linear light.
///
/// Each channel is converted with `(v / 255) ^ gamma`, blended, converted back
/// with `^ (1 / gamma)` and rounded to the nearest 8-bit value.
/// A non-positive or non-finite `gamma` falls back to [`DEFAULT_GAMMA`].
#[inline]
pub fn lerp_gamma(a: Rgb, b: Rgb, t: f32, gamma: f32) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let gamma = if gamma.is_finite() && gamma > 0.0 {
        gamma
    } else {
        DEFAULT_GAMMA
    };
    Rgb {
        r: lerp_channel_gamma(a.r, b.r, t, gamma),
        g: lerp_channel_gamma(a.g, b.g, t, gamma),
        b: lerp_channel_gamma(a.b, b.b, t, gamma),
    }
}

/// Combine two colors by taking the brighter value of every channel.
///
/// Overlapping channels never erase each other, and black is the identity.
#[inline]
pub fn blend_additive_max(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.max(b.r),
        g: a.g.max(b.g),
        b: a.b.max(b.b),
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel_linear(a: u8, b: u8, t: f32) -> u8 {
    let value = lerp(f32::from(a), f32::from(b), t);
    (value + 0.5).clamp(0.0, 255.0) as u8
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel_gamma(a: u8, b: u8, t: f32, gamma: f32) -> u8 {
    if a == b {
        return a;
    }
    let linear_a = to_linear(a, gamma);
    let linear_b = to_linear(b, gamma);
    let blended = lerp(linear_a, linear_b, t).clamp(0.0, 1.0);

    let encoded = libm::powf(blended, 1.0 / gamma) * 255.0 + 0.5;
    encoded.clamp(0.0, 255.0) as u8
}

#[inline]
fn to_linear(value: u8, gamma: f32) -> f32 {
    let normalized = (f32::from(value) / 255.0).clamp(0.0, 1.0);
    libm::powf(normalized, gamma)
}
