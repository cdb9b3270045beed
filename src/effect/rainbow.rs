//! Rainbow cycling effect
//!
//! Draws the shared hue across the strip every tick. The loop is paced at
//! the configured speed while this effect is active, so it does no gating
//! of its own.

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    bounds::center_of,
    color::{Hsv, Rgb, fill_gradient_three_fp, hsv2rgb, mirror_half},
    math8::scale8,
    state::RainbowStyle,
};

const HUE_STEP: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainbowDirection {
    Forward,
    Backward,
}

/// Rainbow effect, styled by [`RainbowStyle`]
#[derive(Debug, Clone, Default)]
pub struct RainbowEffect;

impl RainbowEffect {
    #[allow(clippy::cast_possible_truncation)]
    fn fill_wheel(leds: &mut [Rgb], base_hue: u8, sat: u8, direction: RainbowDirection) {
        let spacing = (255 / leds.len().max(1)) as u8;
        for (i, led) in leds.iter_mut().enumerate() {
            let offset = spacing.wrapping_mul(i as u8);
            let hue = match direction {
                RainbowDirection::Forward => base_hue.wrapping_add(offset),
                RainbowDirection::Backward => base_hue.wrapping_sub(offset),
            };
            *led = hsv2rgb(Hsv { hue, sat, val: 255 });
        }
    }

    fn fill(leds: &mut [Rgb], ctx: &FrameContext<'_>, direction: RainbowDirection) {
        let state = ctx.state;
        let base_hue = state.global_hue;
        match state.rainbow_style {
            RainbowStyle::Wavelength => {
                Self::fill_wheel(leds, base_hue, state.saturation, direction);
            }
            RainbowStyle::Pastel => {
                Self::fill_wheel(leds, base_hue, scale8(state.saturation, 128), direction);
            }
            RainbowStyle::HueOnly => {
                let color = hsv2rgb(Hsv {
                    hue: base_hue,
                    sat: state.saturation,
                    val: 255,
                });
                leds.fill(color);
            }
            RainbowStyle::Saturated => {
                let step = match direction {
                    RainbowDirection::Forward => HUE_STEP,
                    RainbowDirection::Backward => 0u8.wrapping_sub(HUE_STEP),
                };
                let stop = |n: u8| Hsv {
                    hue: base_hue.wrapping_add(step.wrapping_mul(n)),
                    sat: 255,
                    val: 255,
                };
                fill_gradient_three_fp(leds, stop(0), stop(1), stop(2));
            }
        }
    }
}

impl Effect for RainbowEffect {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        if leds.is_empty() {
            return FrameOutcome::Hold;
        }

        let direction = if ctx.state.wave_direction {
            RainbowDirection::Backward
        } else {
            RainbowDirection::Forward
        };

        if ctx.state.mirror {
            let center_len = center_of(leds);
            let (first_half, _) = leds.split_at_mut(center_len);
            Self::fill(first_half, ctx, direction);
            mirror_half(leds);
        } else {
            Self::fill(leds, ctx, direction);
        }

        FrameOutcome::Updated
    }
}
