//! Command decoding
//!
//! One input line maps to at most one [`Command`]. Three shapes are accepted,
//! tried in this order:
//!
//! - a single character, looked up in a fixed table
//! - `G<r>,<g>,<b>`: literal color, each channel clamped to 0-255
//! - `~<Type><Value>`: numeric setting, clamped to the setting's range
//!
//! Nothing is ever rejected loudly. Malformed input decodes to `None` and
//! numbers are clamped instead of refused, so no input can corrupt the state.

use core::fmt;

use crate::color::{BLACK, NamedColor, Rgb};
use crate::effect::{AUTO_CYCLE_LEN, EffectId};
use crate::state::{
    HUE_SPEED_RANGE, LightState, RainbowStyle, SPEED_RANGE, TIPSY_SCALE_RANGE, clamp_u8,
};

const BRIGHTNESS_STEP: i32 = 15;
const SPEED_STEP: i32 = 5;
const INTENSITY_STEP: i32 = 30;
const SATURATION_STEP: i32 = 30;
const HUE_SPEED_STEP: i32 = 1;

const BRIGHTNESS_LOW: i32 = 64;
const BRIGHTNESS_MEDIUM: i32 = 128;

const SPEED_PRESET_VERY_FAST: i32 = 5;
const SPEED_PRESET_FAST: i32 = 15;
const SPEED_PRESET_MEDIUM: i32 = 30;
const SPEED_PRESET_SLOW: i32 = 50;
const SPEED_PRESET_VERY_SLOW: i32 = 100;

/// Numeric settings addressable by commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Brightness,
    Intensity,
    Saturation,
    HueSpeed,
    Speed,
    TipsyScale,
}

impl Setting {
    /// Setting selected by the type letter of a `~` command
    pub const fn from_type_letter(c: char) -> Option<Self> {
        Some(match c.to_ascii_uppercase() {
            'B' => Self::Brightness,
            'I' => Self::Intensity,
            'U' => Self::Saturation,
            'H' => Self::HueSpeed,
            'V' => Self::Speed,
            'T' => Self::TipsyScale,
            _ => return None,
        })
    }

    /// Inclusive range values are clamped into
    pub const fn range(self) -> (u8, u8) {
        match self {
            Self::Brightness | Self::Intensity | Self::Saturation => (0, 255),
            Self::HueSpeed => HUE_SPEED_RANGE,
            Self::Speed => SPEED_RANGE,
            Self::TipsyScale => TIPSY_SCALE_RANGE,
        }
    }

    pub const fn get(self, state: &LightState) -> u8 {
        match self {
            Self::Brightness => state.brightness,
            Self::Intensity => state.intensity,
            Self::Saturation => state.saturation,
            Self::HueSpeed => state.hue_speed,
            Self::Speed => state.speed,
            Self::TipsyScale => state.tipsy_scale,
        }
    }

    /// Store `value`, clamped, and return what was stored
    pub fn set(self, state: &mut LightState, value: i32) -> u8 {
        let value = clamp_u8(value, self.range());
        let slot = match self {
            Self::Brightness => &mut state.brightness,
            Self::Intensity => &mut state.intensity,
            Self::Saturation => &mut state.saturation,
            Self::HueSpeed => &mut state.hue_speed,
            Self::Speed => &mut state.speed,
            Self::TipsyScale => &mut state.tipsy_scale,
        };
        *slot = value;
        value
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brightness => "Brightness",
            Self::Intensity => "Intensity",
            Self::Saturation => "Saturation",
            Self::HueSpeed => "Hue speed",
            Self::Speed => "Speed",
            Self::TipsyScale => "Tipsy scale",
        }
    }
}

/// Read-only reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Status,
    PinInfo,
    CustomColor,
    LedSettings,
}

/// A decoded command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Preset color, switches to the static effect
    NamedColor(NamedColor),
    /// Literal color, switches to the static effect
    Color(Rgb),
    SelectEffect(EffectId),
    /// Relative change of a setting
    Adjust(Setting, i32),
    /// Absolute value for a setting
    Set(Setting, i32),
    ToggleAutoCycle,
    ToggleReverse,
    ToggleMirror,
    ToggleWaveDirection,
    CycleRainbowStyle,
    ResetAll,
    ClearLeds,
    Query(Query),
}

/// Acknowledgment of an applied command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Color(NamedColor),
    CustomColor(Rgb),
    Effect(EffectId),
    Setting(Setting, u8),
    AutoCycle(bool),
    Reverse(bool),
    Mirror(bool),
    WaveDirection(bool),
    RainbowStyle(RainbowStyle),
    Reset,
    Cleared,
}

/// What happened to a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not recognized or malformed; nothing changed
    Ignored,
    /// State changed
    Applied(Ack),
    /// Report requested; nothing changed
    Query(Query),
}

/// Decode one line of input
pub fn decode(line: &str) -> Option<Command> {
    let line = line.trim();
    let mut chars = line.chars();
    let first = chars.next()?;
    let rest = chars.as_str();

    if rest.is_empty() {
        return decode_single(first);
    }

    match first {
        'G' | 'g' => decode_rgb(rest),
        '~' => decode_setting(rest),
        _ => None,
    }
}

/// Decode and apply one line of input
pub fn process(state: &mut LightState, line: &str) -> CommandOutcome {
    match decode(line) {
        Some(command) => apply(state, command),
        None => CommandOutcome::Ignored,
    }
}

/// Apply a command to the state
///
/// Every mutation restarts the auto-cycle countdown, without disabling it,
/// and lines the rotation up with the effect on display.
pub fn apply(state: &mut LightState, command: Command) -> CommandOutcome {
    let ack = match command {
        Command::Query(query) => return CommandOutcome::Query(query),
        Command::NamedColor(named) => {
            set_static_color(state, named.rgb());
            Ack::Color(named)
        }
        Command::Color(color) => {
            set_static_color(state, color);
            Ack::CustomColor(color)
        }
        Command::SelectEffect(effect) => {
            state.effect = effect;
            if effect == EffectId::MultiColor {
                state.multi_color = true;
            }
            Ack::Effect(effect)
        }
        Command::Adjust(setting, delta) => {
            let current = i32::from(setting.get(state));
            Ack::Setting(setting, setting.set(state, current + delta))
        }
        Command::Set(setting, value) => Ack::Setting(setting, setting.set(state, value)),
        Command::ToggleAutoCycle => {
            let auto_cycle = &mut state.auto_cycle;
            auto_cycle.enabled = !auto_cycle.enabled;
            Ack::AutoCycle(auto_cycle.enabled)
        }
        Command::ToggleReverse => {
            state.reverse = !state.reverse;
            Ack::Reverse(state.reverse)
        }
        Command::ToggleMirror => {
            state.mirror = !state.mirror;
            Ack::Mirror(state.mirror)
        }
        Command::ToggleWaveDirection => {
            state.wave_direction = !state.wave_direction;
            Ack::WaveDirection(state.wave_direction)
        }
        Command::CycleRainbowStyle => {
            state.rainbow_style = state.rainbow_style.next();
            Ack::RainbowStyle(state.rainbow_style)
        }
        Command::ResetAll => {
            state.reset();
            Ack::Reset
        }
        Command::ClearLeds => {
            set_static_color(state, BLACK);
            Ack::Cleared
        }
    };

    state.auto_cycle.ticks = 0;
    if state.auto_cycle.enabled {
        // Resume the rotation from the effect on display
        state.auto_cycle.index = auto_cycle_slot(state.effect);
    }
    CommandOutcome::Applied(ack)
}

/// Rotation index the auto-cycle continues from, effects outside the
/// rotation continue with Rainbow
const fn auto_cycle_slot(effect: EffectId) -> u8 {
    let raw = effect.raw();
    if raw < AUTO_CYCLE_LEN {
        raw
    } else {
        AUTO_CYCLE_LEN - 1
    }
}

fn set_static_color(state: &mut LightState, color: Rgb) {
    state.color = color;
    state.multi_color = false;
    state.effect = EffectId::Static;
}

fn decode_single(c: char) -> Option<Command> {
    if let Some(named) = NamedColor::from_digit(c) {
        return Some(Command::NamedColor(named));
    }
    if let Some(effect) = EffectId::from_command(c) {
        return Some(Command::SelectEffect(effect));
    }

    Some(match c.to_ascii_uppercase() {
        '+' => Command::Adjust(Setting::Brightness, BRIGHTNESS_STEP),
        '-' => Command::Adjust(Setting::Brightness, -BRIGHTNESS_STEP),
        '!' => Command::Set(Setting::Brightness, BRIGHTNESS_LOW),
        '@' => Command::Set(Setting::Brightness, BRIGHTNESS_MEDIUM),
        '>' => Command::Adjust(Setting::Speed, SPEED_STEP),
        '<' => Command::Adjust(Setting::Speed, -SPEED_STEP),
        '#' => Command::Adjust(Setting::Intensity, -INTENSITY_STEP),
        '$' => Command::Adjust(Setting::Intensity, INTENSITY_STEP),
        '%' => Command::Adjust(Setting::Saturation, -SATURATION_STEP),
        '^' => Command::Adjust(Setting::Saturation, SATURATION_STEP),
        '&' => Command::Adjust(Setting::HueSpeed, -HUE_SPEED_STEP),
        '*' => Command::Adjust(Setting::HueSpeed, HUE_SPEED_STEP),
        'Q' => Command::Set(Setting::Speed, SPEED_PRESET_VERY_FAST),
        'D' => Command::Set(Setting::Speed, SPEED_PRESET_FAST),
        'V' => Command::Set(Setting::Speed, SPEED_PRESET_MEDIUM),
        'Z' => Command::Set(Setting::Speed, SPEED_PRESET_SLOW),
        'M' => Command::Set(Setting::Speed, SPEED_PRESET_VERY_SLOW),
        'A' => Command::ToggleAutoCycle,
        ';' => Command::ToggleReverse,
        '\'' => Command::ToggleMirror,
        '[' => Command::ToggleWaveDirection,
        ']' => Command::CycleRainbowStyle,
        '(' => Command::ResetAll,
        '{' => Command::ClearLeds,
        'L' => Command::Query(Query::Status),
        'I' => Command::Query(Query::PinInfo),
        ')' => Command::Query(Query::CustomColor),
        '}' => Command::Query(Query::LedSettings),
        _ => return None,
    })
}

/// `r,g,b` payload of a `G` command; exactly three numbers
fn decode_rgb(payload: &str) -> Option<Command> {
    let mut parts = payload.split(',');
    let r = parse_number(parts.next()?)?;
    let g = parse_number(parts.next()?)?;
    let b = parse_number(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    let channel = |value| clamp_u8(value, (0, 255));
    Some(Command::Color(Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }))
}

/// `<Type><Value>` payload of a `~` command
fn decode_setting(payload: &str) -> Option<Command> {
    let mut chars = payload.chars();
    let setting = Setting::from_type_letter(chars.next()?)?;
    let value = parse_number(chars.as_str())?;
    Some(Command::Set(setting, value))
}

/// Parse a signed decimal integer of any length, saturating at the `i32` range
#[allow(clippy::cast_possible_truncation)]
pub fn parse_number(text: &str) -> Option<i32> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(digit - b'0'))
            .min(i64::from(i32::MAX) + 1)
    });
    let value = if negative { -magnitude } else { magnitude };
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Color(named) => write!(f, "Color: {}", named.as_str()),
            Self::CustomColor(c) => write!(f, "Custom RGB: {},{},{}", c.r, c.g, c.b),
            Self::Effect(effect) => write!(f, "Effect: {}", effect.as_str()),
            Self::Setting(Setting::Speed, value) => write!(f, "Speed: {value}ms"),
            Self::Setting(setting, value) => write!(f, "{}: {value}", setting.as_str()),
            Self::AutoCycle(enabled) => write!(f, "Auto-cycle: {}", on_off(enabled)),
            Self::Reverse(enabled) => write!(f, "Reverse: {}", on_off(enabled)),
            Self::Mirror(enabled) => write!(f, "Mirror: {}", on_off(enabled)),
            Self::WaveDirection(enabled) => write!(f, "Wave direction: {}", on_off(enabled)),
            Self::RainbowStyle(style) => write!(f, "Rainbow style: {}", style.as_str()),
            Self::Reset => f.write_str("All settings reset"),
            Self::Cleared => f.write_str("LEDs cleared"),
        }
    }
}
