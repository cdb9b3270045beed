//! Static color fill effect

use super::{Effect, FrameContext, FrameOutcome};
use crate::color::Rgb;

/// Fills every LED with its color from the shared color rule
#[derive(Debug, Clone, Default)]
pub struct StaticColorEffect;

impl Effect for StaticColorEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        let count = leds.len();
        for (i, led) in leds.iter_mut().enumerate() {
            *led = ctx.pixel_color(i, count);
        }
        FrameOutcome::Updated
    }
}
