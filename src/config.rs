//! Controller configuration

use embassy_time::Duration;

use crate::state::LightState;

pub const DEFAULT_HUE_INTERVAL: Duration = Duration::from_millis(20);
pub const DEFAULT_TELEMETRY_INTERVAL: Duration = Duration::from_millis(50);
pub const DEFAULT_IDLE_POLL: Duration = Duration::from_millis(1);
pub const DEFAULT_SEED: u64 = 0x5EED_FA11_C0DE_D00D;

/// Hardware wiring, reported by the pin info query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinInfo {
    pub data_pin: u8,
    pub led_type: &'static str,
    pub color_order: &'static str,
}

impl Default for PinInfo {
    fn default() -> Self {
        Self {
            data_pin: 6,
            led_type: "WS2812B",
            color_order: "GRB",
        }
    }
}

/// Configuration for the [`FrameScheduler`](crate::FrameScheduler)
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// State at power-up, its range is replaced by the strip length
    pub initial: LightState,
    /// Spacing of the shared hue counter advances
    pub hue_interval: Duration,
    /// Minimum spacing of telemetry lines
    pub telemetry_interval: Duration,
    /// Pacing hint returned while a self-timed effect is active
    pub idle_poll: Duration,
    /// Seed for the random effects
    pub seed: u64,
    /// Print the command help on start
    pub banner: bool,
    pub pin: PinInfo,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            initial: LightState::default(),
            hue_interval: DEFAULT_HUE_INTERVAL,
            telemetry_interval: DEFAULT_TELEMETRY_INTERVAL,
            idle_poll: DEFAULT_IDLE_POLL,
            seed: DEFAULT_SEED,
            banner: true,
            pin: PinInfo::default(),
        }
    }
}
