pub use smart_leds::hsv::hsv2rgb;

use crate::{color::Rgb, math8::scale8};

/// Mirror the first half of the array around the center
pub fn mirror_half(leds: &mut [Rgb]) {
    if leds.is_empty() {
        return;
    }
    let leds_len = leds.len();
    let center = crate::bounds::center_of(leds);
    for i in 0..center {
        let mirrored = leds_len - 1 - i;
        leds[mirrored] = leds[i];
    }
}

/// Scale every channel of a color by `scale` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Dim every pixel by `amount` (255 = straight to black)
pub fn fade_to_black_by(leds: &mut [Rgb], amount: u8) {
    let keep = 255 - amount;
    for led in leds {
        *led = scale_color(*led, keep);
    }
}

/// Saturating per-channel addition
#[inline]
pub const fn add_colors(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: a.r.saturating_add(b.r),
        g: a.g.saturating_add(b.g),
        b: a.b.saturating_add(b.b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
