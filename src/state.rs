//! Runtime light state
//!
//! A single `LightState` lives for the whole program. The command decoder is
//! its only writer; renderers and telemetry only read it.

use crate::bounds::RenderingBounds;
use crate::color::{NamedColor, Rgb};
use crate::effect::EffectId;

pub const DEFAULT_LED_COUNT: u8 = 12;

pub const DEFAULT_BRIGHTNESS: u8 = 255;
pub const DEFAULT_SPEED: u8 = 10;
pub const DEFAULT_INTENSITY: u8 = 128;
pub const DEFAULT_SATURATION: u8 = 255;
pub const DEFAULT_HUE_SPEED: u8 = 1;
pub const DEFAULT_TIPSY_SCALE: u8 = 128;

/// Inclusive range of the speed ("wait in milliseconds") setting
pub const SPEED_RANGE: (u8, u8) = (1, 200);
/// Inclusive range of the hue rotation speed
pub const HUE_SPEED_RANGE: (u8, u8) = (1, 5);
/// Inclusive range of the Tipsy sync scale
pub const TIPSY_SCALE_RANGE: (u8, u8) = (32, 255);

/// How rainbow colors are derived from the shared hue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RainbowStyle {
    /// Full hue wheel across the strip
    #[default]
    Wavelength,
    /// Whole strip shows the same rotating hue
    HueOnly,
    /// Hue wheel with washed out saturation
    Pastel,
    /// Three-stop gradient at full saturation
    Saturated,
}

impl RainbowStyle {
    /// Next style, wrapping after the last one
    pub const fn next(self) -> Self {
        match self {
            Self::Wavelength => Self::HueOnly,
            Self::HueOnly => Self::Pastel,
            Self::Pastel => Self::Saturated,
            Self::Saturated => Self::Wavelength,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wavelength => "wavelength",
            Self::HueOnly => "hue_only",
            Self::Pastel => "pastel",
            Self::Saturated => "saturated",
        }
    }
}

/// Unattended effect rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoCycle {
    pub enabled: bool,
    /// Position within the auto-cycled effects
    pub index: u8,
    /// Ticks elapsed since the last rotation or manual command
    pub ticks: u16,
}

impl AutoCycle {
    /// Number of ticks between two rotations at the given speed
    pub const fn period(speed: u8) -> u16 {
        let speed = if speed == 0 { 1 } else { speed };
        5000 / speed as u16
    }
}

/// Complete mutable configuration of the light
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightState {
    pub brightness: u8,
    pub effect: EffectId,
    pub color: Rgb,
    pub multi_color: bool,
    /// Shared hue counter, advanced by the scheduler regardless of effect
    pub global_hue: u8,
    /// Wait in milliseconds, smaller is faster
    pub speed: u8,
    pub intensity: u8,
    pub saturation: u8,
    pub hue_speed: u8,
    pub tipsy_scale: u8,
    pub reverse: bool,
    pub mirror: bool,
    pub wave_direction: bool,
    pub rainbow_style: RainbowStyle,
    pub range: RenderingBounds,
    pub auto_cycle: AutoCycle,
}

impl Default for LightState {
    fn default() -> Self {
        Self::with_led_count(DEFAULT_LED_COUNT)
    }
}

impl LightState {
    /// Default state for a strip of `led_count` LEDs
    pub const fn with_led_count(led_count: u8) -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS,
            effect: EffectId::Rainbow,
            color: NamedColor::Red.rgb(),
            multi_color: false,
            global_hue: 0,
            speed: DEFAULT_SPEED,
            intensity: DEFAULT_INTENSITY,
            saturation: DEFAULT_SATURATION,
            hue_speed: DEFAULT_HUE_SPEED,
            tipsy_scale: DEFAULT_TIPSY_SCALE,
            reverse: false,
            mirror: false,
            wave_direction: false,
            rainbow_style: RainbowStyle::Wavelength,
            range: RenderingBounds::full(led_count),
            auto_cycle: AutoCycle {
                enabled: false,
                index: 0,
                ticks: 0,
            },
        }
    }

    /// Restore every setting to its default, keeping the strip range
    pub fn reset(&mut self) {
        let range = self.range;
        *self = Self::with_led_count(range.end);
        self.range = range;
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.speed = clamp_u8(speed, SPEED_RANGE);
    }

    pub fn set_hue_speed(&mut self, hue_speed: i32) {
        self.hue_speed = clamp_u8(hue_speed, HUE_SPEED_RANGE);
    }

    pub fn set_tipsy_scale(&mut self, scale: i32) {
        self.tipsy_scale = clamp_u8(scale, TIPSY_SCALE_RANGE);
    }
}

/// Clamp a signed value into an inclusive `u8` range
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn clamp_u8(value: i32, (min, max): (u8, u8)) -> u8 {
    if value < min as i32 {
        min
    } else if value > max as i32 {
        max
    } else {
        value as u8
    }
}

/// Clamp a signed value into the full `u8` range
pub const fn clamp_full(value: i32) -> u8 {
    clamp_u8(value, (0, 255))
}
