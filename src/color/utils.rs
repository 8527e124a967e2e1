use core::fmt;

use crate::color::Rgb;

/// Error returned by [`parse_hex_rgb`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexColorError {
    /// The string is not exactly six characters long
    Length,
    /// The string contains a non-hex character
    Digit,
}

impl fmt::Display for HexColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => write!(f, "hex color must have exactly 6 digits"),
            Self::Digit => write!(f, "hex color contains a non-hex digit"),
        }
    }
}

impl core::error::Error for HexColorError {}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
#[allow(clippy::cast_lossless)]
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Parse a six digit hex triplet (`"ff8000"`) into a color.
///
/// Digits are case-insensitive and read big-endian (red first). Prefixes such
/// as `#` or `0x` are rejected.
pub fn parse_hex_rgb(input: &str) -> Result<Rgb, HexColorError> {
    let bytes = input.as_bytes();
    if bytes.len() != 6 {
        return Err(HexColorError::Length);
    }

    let mut packed: u32 = 0;
    for &byte in bytes {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            b'A'..=b'F' => byte - b'A' + 10,
            _ => return Err(HexColorError::Digit),
        };
        packed = (packed << 4) | u32::from(digit);
    }

    Ok(rgb_from_u32(packed))
}

/// Scale every channel of a color by `factor`, truncating toward zero.
///
/// `factor` is clamped to `[0, 1]`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_rgb(color: Rgb, factor: f32) -> Rgb {
    let factor = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
    let scale = |value: u8| (f32::from(value) * factor) as u8;
    Rgb {
        r: scale(color.r),
        g: scale(color.g),
        b: scale(color.b),
    }
}
