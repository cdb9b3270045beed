//! Human readable text: startup help and the read-only query reports
//!
//! Every type here is a borrowed view rendered through `Display`, one
//! `\n`-terminated line per entry, so it can be written straight into the
//! transport without an intermediate buffer.

use core::fmt;

use crate::color::Rgb;
use crate::command::Query;
use crate::config::PinInfo;
use crate::state::LightState;

const fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

/// Command reference printed on start
#[derive(Debug, Clone, Copy, Default)]
pub struct Banner;

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(concat!(
            "=== Fan LED controller ===\n",
            "Colors:     1 red  2 green  3 blue  4 white  5 cyan\n",
            "            6 magenta  7 yellow  8 orange  9 pink  0 purple\n",
            "            G<r>,<g>,<b> custom color\n",
            "Effects:    R rainbow  P pulse  S static  W wipe  T theater\n",
            "            K sparkle  N sinelon  B bpm  C confetti  F fire\n",
            "            X strobe  E breathing  Y tipsy  J multi-color\n",
            "Brightness: + / - step  ! 25%  @ 50%\n",
            "Speed:      > slower  < faster  Q D V Z M presets\n",
            "Intensity:  # / $    Saturation: % / ^    Hue speed: & / *\n",
            "Toggles:    A auto-cycle  ; reverse  ' mirror  [ wave direction\n",
            "            ] rainbow style  ( reset all  { clear LEDs\n",
            "Settings:   ~<B|I|U|H|V|T><value>\n",
            "Queries:    L status  I pin info  ) custom color  } LED settings\n",
        ))
    }
}

pub struct StatusReport<'a> {
    pub state: &'a LightState,
}

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        let color = state.color;
        writeln!(f, "Effect: {} ({})", state.effect.as_str(), state.effect.raw())?;
        writeln!(f, "Brightness: {}", state.brightness)?;
        writeln!(f, "Speed: {}ms", state.speed)?;
        writeln!(f, "Intensity: {}", state.intensity)?;
        writeln!(f, "Saturation: {}", state.saturation)?;
        writeln!(f, "Hue speed: {}", state.hue_speed)?;
        writeln!(f, "Color: {},{},{}", color.r, color.g, color.b)?;
        writeln!(f, "Multi-color: {}", on_off(state.multi_color))?;
        writeln!(f, "Auto-cycle: {}", on_off(state.auto_cycle.enabled))?;
        writeln!(f, "Tipsy scale: {}", state.tipsy_scale)
    }
}

pub struct PinReport<'a> {
    pub pin: &'a PinInfo,
    pub led_count: usize,
}

impl fmt::Display for PinReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data pin: {}", self.pin.data_pin)?;
        writeln!(f, "LED type: {}", self.pin.led_type)?;
        writeln!(f, "Color order: {}", self.pin.color_order)?;
        writeln!(f, "LED count: {}", self.led_count)
    }
}

pub struct CustomColorReport {
    pub color: Rgb,
}

impl fmt::Display for CustomColorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.color;
        writeln!(f, "Current color: {r},{g},{b} (#{r:02X}{g:02X}{b:02X})")
    }
}

pub struct LedSettingsReport<'a> {
    pub state: &'a LightState,
}

impl fmt::Display for LedSettingsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        writeln!(f, "Reverse: {}", on_off(state.reverse))?;
        writeln!(f, "Mirror: {}", on_off(state.mirror))?;
        writeln!(f, "Wave direction: {}", on_off(state.wave_direction))?;
        writeln!(f, "Rainbow style: {}", state.rainbow_style.as_str())?;
        writeln!(f, "Range: {}-{}", state.range.start, state.range.end)
    }
}

/// Report answering a [`Query`]
pub enum Report<'a> {
    Status(StatusReport<'a>),
    Pin(PinReport<'a>),
    CustomColor(CustomColorReport),
    LedSettings(LedSettingsReport<'a>),
}

impl<'a> Report<'a> {
    pub fn new(query: Query, state: &'a LightState, pin: &'a PinInfo, led_count: usize) -> Self {
        match query {
            Query::Status => Self::Status(StatusReport { state }),
            Query::PinInfo => Self::Pin(PinReport { pin, led_count }),
            Query::CustomColor => Self::CustomColor(CustomColorReport { color: state.color }),
            Query::LedSettings => Self::LedSettings(LedSettingsReport { state }),
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(report) => report.fmt(f),
            Self::Pin(report) => report.fmt(f),
            Self::CustomColor(report) => report.fmt(f),
            Self::LedSettings(report) => report.fmt(f),
        }
    }
}
