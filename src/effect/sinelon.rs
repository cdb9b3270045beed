//! Sinelon: a single dot sweeping back and forth with a fading trail
//!
//! Sweep rate is `SINELON_BPM_MAX` beats per minute at speed 1, falling
//! linearly to `SINELON_BPM_MIN` at speed 200.

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    cadence::Cadence,
    color::{Rgb, fade_to_black_by},
    math8::beatsin_range,
    state::SPEED_RANGE,
};

pub const SINELON_BPM_MAX: u32 = 60;
pub const SINELON_BPM_MIN: u32 = 5;

/// Trail fade is applied at a fixed frame rate so its length does not
/// depend on how often the loop ticks
const FRAME_MS: u64 = 10;
const TRAIL_FADE: u8 = 20;

#[derive(Debug, Clone)]
pub struct SinelonEffect {
    cadence: Cadence,
}

impl Default for SinelonEffect {
    fn default() -> Self {
        Self {
            cadence: Cadence::from_millis(FRAME_MS),
        }
    }
}

/// Beats per minute in Q8.8 for a speed value (low speed, high rate)
pub fn sinelon_bpm_q8(speed: u8) -> u32 {
    let (min_speed, max_speed) = SPEED_RANGE;
    let speed = u32::from(speed.clamp(min_speed, max_speed) - min_speed);
    let span = u32::from(max_speed - min_speed);
    let bpm_q8 = (SINELON_BPM_MAX << 8) - speed * ((SINELON_BPM_MAX - SINELON_BPM_MIN) << 8) / span;
    bpm_q8.max(SINELON_BPM_MIN << 8)
}

impl Effect for SinelonEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        if leds.is_empty() || !self.cadence.ready(ctx.now) {
            return FrameOutcome::Hold;
        }

        fade_to_black_by(leds, TRAIL_FADE);

        let count = leds.len();
        let last = u16::try_from(count - 1).unwrap_or(u16::MAX);
        let pos = usize::from(beatsin_range(sinelon_bpm_q8(ctx.state.speed), 0, last, ctx.now));
        let pos = pos.min(count - 1);
        leds[pos] = ctx.pixel_color(pos, count);
        FrameOutcome::Updated
    }
}
