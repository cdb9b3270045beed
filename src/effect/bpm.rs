//! BPM: brightness waves travelling along the strip to a beat
//!
//! The beat runs at 120 BPM at speed 1 down to 20 BPM at speed 200. Intensity
//! sets the wave depth.

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    color::{Rgb, scale_color},
    math8::{beat8, scale8, sin8},
    state::SPEED_RANGE,
};

pub const BPM_MAX: u8 = 120;
pub const BPM_MIN: u8 = 20;

#[derive(Debug, Clone, Default)]
pub struct BpmEffect;

/// Beat rate for a speed value (low speed, high rate)
#[allow(clippy::cast_possible_truncation)]
pub fn bpm_for_speed(speed: u8) -> u8 {
    let (min_speed, max_speed) = SPEED_RANGE;
    let slowdown = u16::from(speed.clamp(min_speed, max_speed) - min_speed);
    let span = u16::from(max_speed - min_speed);
    BPM_MAX - (slowdown * u16::from(BPM_MAX - BPM_MIN) / span) as u8
}

impl Effect for BpmEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        let count = leds.len();
        let phase = beat8(bpm_for_speed(ctx.state.speed), ctx.now);
        let spacing = (256 / count.max(1)) as u8;
        let floor = 255 - ctx.state.intensity;

        for (i, led) in leds.iter_mut().enumerate() {
            let wave = sin8(phase.wrapping_add(spacing.wrapping_mul(i as u8)));
            let level = floor.saturating_add(scale8(wave, ctx.state.intensity));
            *led = scale_color(ctx.pixel_color(i, count), level);
        }
        FrameOutcome::Updated
    }
}
