//! Breathing: the whole strip swells and fades on a cubic easing curve
//!
//! One breath takes `60 / bpm` seconds, with `bpm` from 30 at speed 1 down to
//! 4 at speed 200. Intensity sets the depth of the exhale.

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    color::{Rgb, scale_color},
    math8::{beat8, ease8_in_out_cubic, scale8, triwave8},
    state::SPEED_RANGE,
};

pub const BREATHS_MAX: u8 = 30;
pub const BREATHS_MIN: u8 = 4;

#[derive(Debug, Clone, Default)]
pub struct BreathingEffect;

/// Breaths per minute for a speed value
#[allow(clippy::cast_possible_truncation)]
pub fn breaths_for_speed(speed: u8) -> u8 {
    let (min_speed, max_speed) = SPEED_RANGE;
    let slowdown = u16::from(speed.clamp(min_speed, max_speed) - min_speed);
    let span = u16::from(max_speed - min_speed);
    BREATHS_MAX - (slowdown * u16::from(BREATHS_MAX - BREATHS_MIN) / span) as u8
}

/// Breath level (0-255) for a phase within one breath
pub fn breath_level(phase: u8, intensity: u8) -> u8 {
    let eased = ease8_in_out_cubic(triwave8(phase));
    (255 - intensity).saturating_add(scale8(eased, intensity))
}

impl Effect for BreathingEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        let phase = beat8(breaths_for_speed(ctx.state.speed), ctx.now);
        let level = breath_level(phase, ctx.state.intensity);

        let count = leds.len();
        for (i, led) in leds.iter_mut().enumerate() {
            *led = scale_color(ctx.pixel_color(i, count), level);
        }
        FrameOutcome::Updated
    }
}
