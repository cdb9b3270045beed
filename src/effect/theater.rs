//! Theater chase: every third LED lit, the pattern crawling along the strip

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    cadence::Cadence,
    color::{BLACK, Rgb},
};

const CHASE_SPACING: usize = 3;
/// Chase steps are this many times slower than the raw speed value
const SPEED_FACTOR: u64 = 5;

#[derive(Debug, Clone)]
pub struct TheaterEffect {
    cadence: Cadence,
    offset: usize,
}

impl Default for TheaterEffect {
    fn default() -> Self {
        Self {
            cadence: Cadence::from_millis(0),
            offset: 0,
        }
    }
}

impl Effect for TheaterEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        self.cadence
            .set_interval_ms(u64::from(ctx.state.speed) * SPEED_FACTOR);
        if !self.cadence.ready(ctx.now) {
            return FrameOutcome::Hold;
        }

        let count = leds.len();
        for (i, led) in leds.iter_mut().enumerate() {
            *led = if (i + self.offset) % CHASE_SPACING == 0 {
                ctx.pixel_color(i, count)
            } else {
                BLACK
            };
        }

        self.offset = (self.offset + 1) % CHASE_SPACING;
        FrameOutcome::Updated
    }
}
