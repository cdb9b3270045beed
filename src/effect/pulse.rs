//! Pulse effect
//!
//! Shows the current colors at full value and breathes the global brightness
//! instead. The frame is reported as [`FrameOutcome::Dimmed`], the scheduler
//! brackets the flush with the override and restores the configured
//! brightness afterwards.

use super::{Effect, FrameContext, FrameOutcome};
use crate::{color::Rgb, math8::scale8};

/// Lowest level of the pulse envelope
pub const PULSE_FLOOR: u8 = 10;

#[derive(Debug, Clone)]
pub struct PulseEffect {
    level: u8,
    rising: bool,
}

impl Default for PulseEffect {
    fn default() -> Self {
        Self {
            level: PULSE_FLOOR,
            rising: true,
        }
    }
}

impl PulseEffect {
    /// Current envelope level (before scaling by the configured brightness)
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Envelope step per tick, larger with higher intensity
    const fn step(intensity: u8) -> u8 {
        1 + intensity / 32
    }

    fn advance(&mut self, step: u8) {
        if self.rising {
            self.level = self.level.saturating_add(step);
            if self.level == u8::MAX {
                self.rising = false;
            }
        } else {
            self.level = self.level.saturating_sub(step).max(PULSE_FLOOR);
            if self.level == PULSE_FLOOR {
                self.rising = true;
            }
        }
    }
}

impl Effect for PulseEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        let count = leds.len();
        for (i, led) in leds.iter_mut().enumerate() {
            *led = ctx.pixel_color(i, count);
        }

        self.advance(Self::step(ctx.state.intensity));
        FrameOutcome::Dimmed(scale8(self.level, ctx.state.brightness))
    }
}
