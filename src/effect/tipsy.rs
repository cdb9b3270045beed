//! Tipsy: two sine waves drifting against each other around the fan
//!
//! The base rate follows the speed value like [`super::BreathingEffect`]
//! does, then gets multiplied by `tipsy_scale / 128` so an external fan speed
//! reading can pull the wobble in sync.

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    color::{Rgb, scale_color},
    math8::{beat16, blend8, scale8, sin8},
    state::SPEED_RANGE,
};

pub const TIPSY_BPM_MAX: u32 = 40;
pub const TIPSY_BPM_MIN: u32 = 6;
/// Tipsy scale value that keeps the base rate unchanged
pub const TIPSY_SCALE_UNITY: u32 = 128;

#[derive(Debug, Clone, Default)]
pub struct TipsyEffect;

/// Primary wobble rate in Q8.8 beats per minute
pub fn tipsy_bpm_q8(speed: u8, tipsy_scale: u8) -> u32 {
    let (min_speed, max_speed) = SPEED_RANGE;
    let slowdown = u32::from(speed.clamp(min_speed, max_speed) - min_speed);
    let span = u32::from(max_speed - min_speed);
    let base = (TIPSY_BPM_MAX << 8) - slowdown * ((TIPSY_BPM_MAX - TIPSY_BPM_MIN) << 8) / span;
    base * u32::from(tipsy_scale) / TIPSY_SCALE_UNITY
}

impl Effect for TipsyEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        let bpm_q8 = tipsy_bpm_q8(ctx.state.speed, ctx.state.tipsy_scale);
        // Second wave runs at 3/2 the rate in the opposite direction
        let lead = (beat16(bpm_q8, ctx.now) >> 8) as u8;
        let lag = (beat16(bpm_q8 * 3 / 2, ctx.now) >> 8) as u8;

        let count = leds.len();
        let spacing = (256 / count.max(1)) as u8;
        let floor = 255 - ctx.state.intensity;

        for (i, led) in leds.iter_mut().enumerate() {
            let offset = spacing.wrapping_mul(i as u8);
            let wave = blend8(
                sin8(lead.wrapping_add(offset)),
                sin8(lag.wrapping_sub(offset)),
                128,
            );
            let level = floor.saturating_add(scale8(wave, ctx.state.intensity));
            *led = scale_color(ctx.pixel_color(i, count), level);
        }
        FrameOutcome::Updated
    }
}
