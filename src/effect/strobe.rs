//! Strobe: short full flashes separated by dark gaps
//!
//! The flash is a fixed `FLASH_MS`; the gap is the speed value times
//! `GAP_FACTOR`.

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    cadence::Cadence,
    color::{BLACK, Rgb},
};

pub const FLASH_MS: u64 = 30;
pub const GAP_FACTOR: u64 = 5;

#[derive(Debug, Clone)]
pub struct StrobeEffect {
    cadence: Cadence,
    lit: bool,
}

impl Default for StrobeEffect {
    fn default() -> Self {
        Self {
            cadence: Cadence::from_millis(0),
            lit: false,
        }
    }
}

impl StrobeEffect {
    pub const fn is_lit(&self) -> bool {
        self.lit
    }
}

impl Effect for StrobeEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        if !self.cadence.ready(ctx.now) {
            return FrameOutcome::Hold;
        }

        self.lit = !self.lit;
        if self.lit {
            let count = leds.len();
            for (i, led) in leds.iter_mut().enumerate() {
                *led = ctx.pixel_color(i, count);
            }
            self.cadence.set_interval_ms(FLASH_MS);
        } else {
            leds.fill(BLACK);
            self.cadence
                .set_interval_ms(u64::from(ctx.state.speed) * GAP_FACTOR);
        }
        FrameOutcome::Updated
    }
}
