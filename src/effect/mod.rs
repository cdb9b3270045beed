//! Effect system with compile-time known effect variants
//!
//! Every effect keeps its own private timing state inside [`EffectBank`].
//! Switching effects never resets the others, so an effect resumed later
//! continues from wherever its timers were left.

mod bpm;
mod breathing;
mod confetti;
mod fire;
mod multi_color;
mod pulse;
mod rainbow;
mod sinelon;
mod sparkle;
mod static_color;
mod strobe;
mod theater;
mod tipsy;
mod wipe;

use embassy_time::Instant;

pub use bpm::{BPM_MAX, BPM_MIN, BpmEffect, bpm_for_speed};
pub use breathing::{BREATHS_MAX, BREATHS_MIN, BreathingEffect, breath_level, breaths_for_speed};
pub use confetti::ConfettiEffect;
pub use fire::FireEffect;
pub use multi_color::MultiColorEffect;
pub use pulse::{PULSE_FLOOR, PulseEffect};
pub use rainbow::{RainbowDirection, RainbowEffect};
pub use sinelon::{SINELON_BPM_MAX, SINELON_BPM_MIN, SinelonEffect, sinelon_bpm_q8};
pub use sparkle::SparkleEffect;
pub use static_color::StaticColorEffect;
pub use strobe::{FLASH_MS, GAP_FACTOR, StrobeEffect};
pub use theater::TheaterEffect;
pub use tipsy::{TIPSY_BPM_MAX, TIPSY_BPM_MIN, TIPSY_SCALE_UNITY, TipsyEffect, tipsy_bpm_q8};
pub use wipe::WipeEffect;

use crate::color::{Hsv, Rgb, hsv2rgb};
use crate::state::LightState;

const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_PULSE: &str = "pulse";
const EFFECT_NAME_STATIC: &str = "static";
const EFFECT_NAME_WIPE: &str = "wipe";
const EFFECT_NAME_THEATER: &str = "theater";
const EFFECT_NAME_SPARKLE: &str = "sparkle";
const EFFECT_NAME_SINELON: &str = "sinelon";
const EFFECT_NAME_BPM: &str = "bpm";
const EFFECT_NAME_CONFETTI: &str = "confetti";
const EFFECT_NAME_FIRE: &str = "fire";
const EFFECT_NAME_STROBE: &str = "strobe";
const EFFECT_NAME_BREATHING: &str = "breathing";
const EFFECT_NAME_TIPSY: &str = "tipsy";
const EFFECT_NAME_MULTI_COLOR: &str = "multi_color";

const EFFECT_ID_RAINBOW: u8 = 0;
const EFFECT_ID_PULSE: u8 = 1;
const EFFECT_ID_STATIC: u8 = 2;
const EFFECT_ID_WIPE: u8 = 3;
const EFFECT_ID_THEATER: u8 = 4;
const EFFECT_ID_SPARKLE: u8 = 5;
const EFFECT_ID_SINELON: u8 = 6;
const EFFECT_ID_BPM: u8 = 7;
const EFFECT_ID_CONFETTI: u8 = 8;
const EFFECT_ID_FIRE: u8 = 9;
const EFFECT_ID_STROBE: u8 = 10;
const EFFECT_ID_BREATHING: u8 = 11;
const EFFECT_ID_TIPSY: u8 = 12;
const EFFECT_ID_MULTI_COLOR: u8 = 13;

/// Number of known effects
pub const EFFECT_COUNT: u8 = 14;

/// Auto-cycle rotates through the effects with an id below this value
pub const AUTO_CYCLE_LEN: u8 = 10;

/// Result of rendering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The effect was not due; the previous frame stays as it is
    Hold,
    /// A new frame was written
    Updated,
    /// A new frame was written and must be shown at this global brightness.
    /// The configured brightness is restored right after the flush.
    Dimmed(u8),
}

/// Everything a renderer may read for one tick
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub now: Instant,
    pub state: &'a LightState,
}

impl<'a> FrameContext<'a> {
    pub const fn new(now: Instant, state: &'a LightState) -> Self {
        Self { now, state }
    }

    /// Color of pixel `index` on a strip of `count` LEDs
    ///
    /// With multi-color enabled this is the rainbow hue for the pixel,
    /// otherwise the configured color. All renderers source colors here.
    pub fn pixel_color(&self, index: usize, count: usize) -> Rgb {
        pixel_color(self.state, index, count)
    }
}

/// Shared color rule, see [`FrameContext::pixel_color`]
#[allow(clippy::cast_possible_truncation)]
pub fn pixel_color(state: &LightState, index: usize, count: usize) -> Rgb {
    if !state.multi_color {
        return state.color;
    }
    let spacing = 255 / count.max(1);
    let offset = (index.wrapping_mul(spacing) & 0xFF) as u8;
    hsv2rgb(Hsv {
        hue: state.global_hue.wrapping_add(offset),
        sat: state.saturation,
        val: 255,
    })
}

pub trait Effect {
    /// Render a single frame
    ///
    /// Called once per scheduler tick. Effects that are not due must leave
    /// `leds` untouched and return [`FrameOutcome::Hold`].
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome;
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum EffectId {
    #[default]
    Rainbow = EFFECT_ID_RAINBOW,
    Pulse = EFFECT_ID_PULSE,
    Static = EFFECT_ID_STATIC,
    Wipe = EFFECT_ID_WIPE,
    Theater = EFFECT_ID_THEATER,
    Sparkle = EFFECT_ID_SPARKLE,
    Sinelon = EFFECT_ID_SINELON,
    Bpm = EFFECT_ID_BPM,
    Confetti = EFFECT_ID_CONFETTI,
    Fire = EFFECT_ID_FIRE,
    Strobe = EFFECT_ID_STROBE,
    Breathing = EFFECT_ID_BREATHING,
    Tipsy = EFFECT_ID_TIPSY,
    MultiColor = EFFECT_ID_MULTI_COLOR,
}

impl EffectId {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_RAINBOW => Self::Rainbow,
            EFFECT_ID_PULSE => Self::Pulse,
            EFFECT_ID_STATIC => Self::Static,
            EFFECT_ID_WIPE => Self::Wipe,
            EFFECT_ID_THEATER => Self::Theater,
            EFFECT_ID_SPARKLE => Self::Sparkle,
            EFFECT_ID_SINELON => Self::Sinelon,
            EFFECT_ID_BPM => Self::Bpm,
            EFFECT_ID_CONFETTI => Self::Confetti,
            EFFECT_ID_FIRE => Self::Fire,
            EFFECT_ID_STROBE => Self::Strobe,
            EFFECT_ID_BREATHING => Self::Breathing,
            EFFECT_ID_TIPSY => Self::Tipsy,
            EFFECT_ID_MULTI_COLOR => Self::MultiColor,
            _ => return None,
        })
    }

    /// Index reported in telemetry
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Effect selected by a single-letter command (case-insensitive)
    pub const fn from_command(c: char) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            'R' => Self::Rainbow,
            'P' => Self::Pulse,
            'S' => Self::Static,
            'W' => Self::Wipe,
            'T' => Self::Theater,
            'K' => Self::Sparkle,
            'N' => Self::Sinelon,
            'B' => Self::Bpm,
            'C' => Self::Confetti,
            'F' => Self::Fire,
            'X' => Self::Strobe,
            'E' => Self::Breathing,
            'Y' => Self::Tipsy,
            'J' => Self::MultiColor,
            _ => return None,
        })
    }

    /// The effect auto-cycle switches to after `index`, with its new index
    pub const fn auto_cycle_after(index: u8) -> (u8, Self) {
        let next = (index + 1) % AUTO_CYCLE_LEN;
        match Self::from_raw(next) {
            Some(effect) => (next, effect),
            None => (0, Self::Rainbow),
        }
    }

    /// Effects that render continuously and pace the loop with the
    /// configured speed instead of gating themselves
    pub const fn paces_loop(self) -> bool {
        matches!(self, Self::Rainbow | Self::Pulse)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::Pulse => EFFECT_NAME_PULSE,
            Self::Static => EFFECT_NAME_STATIC,
            Self::Wipe => EFFECT_NAME_WIPE,
            Self::Theater => EFFECT_NAME_THEATER,
            Self::Sparkle => EFFECT_NAME_SPARKLE,
            Self::Sinelon => EFFECT_NAME_SINELON,
            Self::Bpm => EFFECT_NAME_BPM,
            Self::Confetti => EFFECT_NAME_CONFETTI,
            Self::Fire => EFFECT_NAME_FIRE,
            Self::Strobe => EFFECT_NAME_STROBE,
            Self::Breathing => EFFECT_NAME_BREATHING,
            Self::Tipsy => EFFECT_NAME_TIPSY,
            Self::MultiColor => EFFECT_NAME_MULTI_COLOR,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_RAINBOW => Some(Self::Rainbow),
            EFFECT_NAME_PULSE => Some(Self::Pulse),
            EFFECT_NAME_STATIC => Some(Self::Static),
            EFFECT_NAME_WIPE => Some(Self::Wipe),
            EFFECT_NAME_THEATER => Some(Self::Theater),
            EFFECT_NAME_SPARKLE => Some(Self::Sparkle),
            EFFECT_NAME_SINELON => Some(Self::Sinelon),
            EFFECT_NAME_BPM => Some(Self::Bpm),
            EFFECT_NAME_CONFETTI => Some(Self::Confetti),
            EFFECT_NAME_FIRE => Some(Self::Fire),
            EFFECT_NAME_STROBE => Some(Self::Strobe),
            EFFECT_NAME_BREATHING => Some(Self::Breathing),
            EFFECT_NAME_TIPSY => Some(Self::Tipsy),
            EFFECT_NAME_MULTI_COLOR => Some(Self::MultiColor),
            _ => None,
        }
    }
}

/// Registry holding the private state of every effect
///
/// `N` is the number of LEDs, used by effects with per-pixel memory.
#[derive(Debug, Clone)]
pub struct EffectBank<const N: usize> {
    pub rainbow: RainbowEffect,
    pub pulse: PulseEffect,
    pub static_color: StaticColorEffect,
    pub wipe: WipeEffect,
    pub theater: TheaterEffect,
    pub sparkle: SparkleEffect,
    pub sinelon: SinelonEffect,
    pub bpm: BpmEffect,
    pub confetti: ConfettiEffect,
    pub fire: FireEffect<N>,
    pub strobe: StrobeEffect,
    pub breathing: BreathingEffect,
    pub tipsy: TipsyEffect,
    pub multi_color: MultiColorEffect,
}

impl<const N: usize> EffectBank<N> {
    /// Create every effect; `seed` feeds the randomized ones
    pub fn new(seed: u64) -> Self {
        Self {
            rainbow: RainbowEffect::default(),
            pulse: PulseEffect::default(),
            static_color: StaticColorEffect,
            wipe: WipeEffect::default(),
            theater: TheaterEffect::default(),
            sparkle: SparkleEffect::new(seed),
            sinelon: SinelonEffect::default(),
            bpm: BpmEffect,
            confetti: ConfettiEffect::new(seed.rotate_left(21)),
            fire: FireEffect::new(seed.rotate_left(42)),
            strobe: StrobeEffect::default(),
            breathing: BreathingEffect,
            tipsy: TipsyEffect,
            multi_color: MultiColorEffect::default(),
        }
    }

    /// Render the effect selected by `id`
    pub fn render(&mut self, id: EffectId, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        match id {
            EffectId::Rainbow => self.rainbow.render(ctx, leds),
            EffectId::Pulse => self.pulse.render(ctx, leds),
            EffectId::Static => self.static_color.render(ctx, leds),
            EffectId::Wipe => self.wipe.render(ctx, leds),
            EffectId::Theater => self.theater.render(ctx, leds),
            EffectId::Sparkle => self.sparkle.render(ctx, leds),
            EffectId::Sinelon => self.sinelon.render(ctx, leds),
            EffectId::Bpm => self.bpm.render(ctx, leds),
            EffectId::Confetti => self.confetti.render(ctx, leds),
            EffectId::Fire => self.fire.render(ctx, leds),
            EffectId::Strobe => self.strobe.render(ctx, leds),
            EffectId::Breathing => self.breathing.render(ctx, leds),
            EffectId::Tipsy => self.tipsy.render(ctx, leds),
            EffectId::MultiColor => self.multi_color.render(ctx, leds),
        }
    }
}
