use embassy_time::Instant;

use crate::color::Rgb;
use crate::effect::{EffectBank, FrameContext, FrameOutcome};
use crate::state::LightState;

/// Effect engine - owns the frame buffer and every effect's private state
///
/// The frame buffer is kept in logical order; the `reverse` flag is applied
/// while copying it into the output buffer, so held frames never flip back
/// and forth between ticks.
pub struct Renderer<const N: usize> {
    effects: EffectBank<N>,
    frame_buffer: [Rgb; N],
    output_buffer: [Rgb; N],
}

impl<const N: usize> Renderer<N> {
    pub fn new(seed: u64) -> Self {
        Self {
            effects: EffectBank::new(seed),
            frame_buffer: [Rgb::default(); N],
            output_buffer: [Rgb::default(); N],
        }
    }

    /// Render one tick of the active effect into the frame buffer
    pub fn render(&mut self, state: &LightState, now: Instant) -> FrameOutcome {
        let ctx = FrameContext::new(now, state);
        self.effects
            .render(state.effect, &ctx, &mut self.frame_buffer)
    }

    /// Prepare the buffer to flush, applying the `reverse` geometry flag
    pub fn output(&mut self, reverse: bool) -> &[Rgb] {
        self.output_buffer.copy_from_slice(&self.frame_buffer);
        if reverse {
            self.output_buffer.reverse();
        }
        &self.output_buffer
    }

    /// Frame buffer in logical (unreversed) order
    pub fn frame(&self) -> &[Rgb; N] {
        &self.frame_buffer
    }

    pub fn effects(&self) -> &EffectBank<N> {
        &self.effects
    }
}
