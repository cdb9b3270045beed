//! Rate limited state snapshots for the companion application
//!
//! The record is a single line with a fixed key order:
//!
//! ```text
//! {"BR":255,"M":0,"S":10,"I":128,"SAT":255,"H":1,"R":255,"G":0,"BL":0,"TS":128}
//! ```

use core::fmt;

use embassy_time::{Duration, Instant};

use crate::cadence::Cadence;
use crate::config::DEFAULT_TELEMETRY_INTERVAL;
use crate::state::LightState;

/// Copy of the reported fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Telemetry {
    pub brightness: u8,
    pub effect: u8,
    pub speed: u8,
    pub intensity: u8,
    pub saturation: u8,
    pub hue_speed: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub tipsy_scale: u8,
}

impl Telemetry {
    pub const fn snapshot(state: &LightState) -> Self {
        Self {
            brightness: state.brightness,
            effect: state.effect.raw(),
            speed: state.speed,
            intensity: state.intensity,
            saturation: state.saturation,
            hue_speed: state.hue_speed,
            red: state.color.r,
            green: state.color.g,
            blue: state.color.b,
            tipsy_scale: state.tipsy_scale,
        }
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"BR\":{},\"M\":{},\"S\":{},\"I\":{},\"SAT\":{},\"H\":{},\"R\":{},\"G\":{},\"BL\":{},\"TS\":{}}}",
            self.brightness,
            self.effect,
            self.speed,
            self.intensity,
            self.saturation,
            self.hue_speed,
            self.red,
            self.green,
            self.blue,
            self.tipsy_scale,
        )
    }
}

/// Emits at most one snapshot per interval, however fast it is polled
#[derive(Debug, Clone)]
pub struct TelemetryEmitter {
    cadence: Cadence,
}

impl Default for TelemetryEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_TELEMETRY_INTERVAL)
    }
}

impl TelemetryEmitter {
    pub const fn new(interval: Duration) -> Self {
        Self {
            cadence: Cadence::new(interval),
        }
    }

    /// Snapshot of `state` if the interval has elapsed since the last one
    pub fn poll(&mut self, now: Instant, state: &LightState) -> Option<Telemetry> {
        self.cadence
            .ready(now)
            .then(|| Telemetry::snapshot(state))
    }
}
