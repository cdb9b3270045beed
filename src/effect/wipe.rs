//! Color wipe: lights the strip one LED at a time, then clears it the same way

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    cadence::Cadence,
    color::{BLACK, Rgb},
};

#[derive(Debug, Clone)]
pub struct WipeEffect {
    cadence: Cadence,
    index: usize,
    filling: bool,
}

impl Default for WipeEffect {
    fn default() -> Self {
        Self {
            cadence: Cadence::from_millis(0),
            index: 0,
            filling: true,
        }
    }
}

impl WipeEffect {
    /// Next LED the wipe will touch
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl Effect for WipeEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        self.cadence.set_interval_ms(u64::from(ctx.state.speed));
        if leds.is_empty() || !self.cadence.ready(ctx.now) {
            return FrameOutcome::Hold;
        }

        let count = leds.len();
        if self.index >= count {
            self.index = 0;
        }
        leds[self.index] = if self.filling {
            ctx.pixel_color(self.index, count)
        } else {
            BLACK
        };

        self.index += 1;
        if self.index == count {
            self.index = 0;
            self.filling = !self.filling;
        }
        FrameOutcome::Updated
    }
}
