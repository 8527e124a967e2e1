mod interpolate;
mod utils;

pub use interpolate::{DEFAULT_GAMMA, blend_additive_max, lerp, lerp_gamma, lerp_linear};
use smart_leds::RGB8;
pub use utils::{HexColorError, parse_hex_rgb, rgb_from_u32, rgb_to_u32, scale_rgb};

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
