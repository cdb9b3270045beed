//! Confetti: randomly placed speckles that blink in and fade smoothly
//!
//! Speckle hues scatter around the shared hue. With multi-color enabled the
//! speckle takes its pixel's color from the shared color rule instead.

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    cadence::Cadence,
    color::{Hsv, Rgb, add_colors, fade_to_black_by, hsv2rgb},
    math8::Prng,
};

const FADE_AMOUNT: u8 = 10;
const HUE_SCATTER: u8 = 64;

#[derive(Debug, Clone)]
pub struct ConfettiEffect {
    cadence: Cadence,
    rng: Prng,
}

impl ConfettiEffect {
    pub const fn new(seed: u64) -> Self {
        Self {
            cadence: Cadence::from_millis(0),
            rng: Prng::new(seed),
        }
    }
}

impl Effect for ConfettiEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        self.cadence.set_interval_ms(u64::from(ctx.state.speed));
        if leds.is_empty() || !self.cadence.ready(ctx.now) {
            return FrameOutcome::Hold;
        }

        fade_to_black_by(leds, FADE_AMOUNT);

        let count = leds.len();
        let pos = self.rng.index(count);
        leds[pos] = if ctx.state.multi_color {
            ctx.pixel_color(pos, count)
        } else {
            let speckle = hsv2rgb(Hsv {
                hue: ctx
                    .state
                    .global_hue
                    .wrapping_add(self.rng.below8(HUE_SCATTER)),
                sat: ctx.state.saturation,
                val: 255,
            });
            add_colors(leds[pos], speckle)
        };
        FrameOutcome::Updated
    }
}
