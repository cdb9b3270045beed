//! Sparkle: single random LEDs flash up while the rest decays

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    cadence::Cadence,
    color::{Rgb, fade_to_black_by},
    math8::Prng,
};

const FADE_AMOUNT: u8 = 64;

#[derive(Debug, Clone)]
pub struct SparkleEffect {
    cadence: Cadence,
    rng: Prng,
    last_spark: Option<usize>,
}

impl SparkleEffect {
    pub const fn new(seed: u64) -> Self {
        Self {
            cadence: Cadence::from_millis(0),
            rng: Prng::new(seed),
            last_spark: None,
        }
    }

    /// LED lit by the most recent update
    pub const fn last_spark(&self) -> Option<usize> {
        self.last_spark
    }
}

impl Effect for SparkleEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        self.cadence.set_interval_ms(u64::from(ctx.state.speed));
        if leds.is_empty() || !self.cadence.ready(ctx.now) {
            return FrameOutcome::Hold;
        }

        fade_to_black_by(leds, FADE_AMOUNT);

        let count = leds.len();
        let pos = self.rng.index(count);
        leds[pos] = ctx.pixel_color(pos, count);
        self.last_spark = Some(pos);
        FrameOutcome::Updated
    }
}
