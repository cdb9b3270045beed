use smart_leds::hsv::hsv2rgb;

use crate::color::{Hsv, Rgb};
use crate::math8::scale8;

/// Fill `leds[start..=end]` with an HSV gradient walking the hue wheel forward.
///
/// Uses 8.24 fixed-point accumulators so long strips get sub-step precision
/// for free.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn fill_gradient_fp(leds: &mut [Rgb], start: usize, from: Hsv, end: usize, to: Hsv) {
    if leds.is_empty() || end < start {
        return;
    }

    let steps = i32::try_from(end - start).unwrap_or(i32::MAX).max(1);

    let hue_distance = i32::from(to.hue.wrapping_sub(from.hue));
    let sat_distance = i32::from(to.sat) - i32::from(from.sat);
    let val_distance = i32::from(to.val) - i32::from(from.val);

    let hue_step = ((hue_distance << 16) / steps) << 8;
    let sat_step = ((sat_distance << 16) / steps) << 8;
    let val_step = ((val_distance << 16) / steps) << 8;

    let mut hue824 = u32::from(from.hue) << 24;
    let mut sat824 = u32::from(from.sat) << 24;
    let mut val824 = u32::from(from.val) << 24;

    let end = end.min(leds.len() - 1);
    for led in leds.iter_mut().take(end + 1).skip(start) {
        *led = hsv2rgb(Hsv {
            hue: (hue824 >> 24) as u8,
            sat: (sat824 >> 24) as u8,
            val: (val824 >> 24) as u8,
        });
        hue824 = hue824.wrapping_add(hue_step as u32);
        sat824 = sat824.wrapping_add(sat_step as u32);
        val824 = val824.wrapping_add(val_step as u32);
    }
}

/// Fill the whole slice with a three-stop gradient `c1 -> c2 -> c3`
pub fn fill_gradient_three_fp(leds: &mut [Rgb], c1: Hsv, c2: Hsv, c3: Hsv) {
    if leds.is_empty() {
        return;
    }

    let half = leds.len() / 2;
    let last = leds.len() - 1;

    fill_gradient_fp(leds, 0, c1, half, c2);
    if last > half {
        fill_gradient_fp(leds, half, c2, last, c3);
    }
}

/// Black body style gradient used by the fire effect.
///
/// 0 is black, rising through red and yellow up to white at 255.
pub const fn heat_color(temperature: u8) -> Rgb {
    // Scale to 0..191 so the ramp has three equal 64-step bands
    let t192 = scale8(temperature, 191);
    let ramp = (t192 & 0x3F) << 2;

    if t192 & 0x80 != 0 {
        Rgb {
            r: 255,
            g: 255,
            b: ramp,
        }
    } else if t192 & 0x40 != 0 {
        Rgb {
            r: 255,
            g: ramp,
            b: 0,
        }
    } else {
        Rgb { r: ramp, g: 0, b: 0 }
    }
}
