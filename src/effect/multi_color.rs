//! Multi-color: every LED its own hue, rotating with the shared hue counter

use super::{Effect, FrameContext, FrameOutcome};
use crate::{cadence::Cadence, color::Rgb};

#[derive(Debug, Clone)]
pub struct MultiColorEffect {
    cadence: Cadence,
}

impl Default for MultiColorEffect {
    fn default() -> Self {
        Self {
            cadence: Cadence::from_millis(0),
        }
    }
}

impl Effect for MultiColorEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        self.cadence.set_interval_ms(u64::from(ctx.state.speed));
        if !self.cadence.ready(ctx.now) {
            return FrameOutcome::Hold;
        }

        let count = leds.len();
        for (i, led) in leds.iter_mut().enumerate() {
            *led = ctx.pixel_color(i, count);
        }
        FrameOutcome::Updated
    }
}
