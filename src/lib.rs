#![no_std]

pub mod bounds;
pub mod cadence;
pub mod channel;
pub mod color;
pub mod command;
pub mod config;
pub mod effect;
pub mod error;
pub mod frame_scheduler;
pub mod input;
#[cfg(feature = "esp32-log")]
pub mod logger;
pub mod math8;
pub mod renderer;
pub mod report;
pub mod state;
pub mod telemetry;

pub use channel::{CommandChannel, CommandLine, CommandReceiver, CommandSender};
pub use command::{Ack, Command, CommandOutcome, Query, Setting};
pub use config::{ControllerConfig, PinInfo};
pub use effect::{EffectId, FrameOutcome};
pub use error::Error;
pub use frame_scheduler::{FrameScheduler, TickResult};
pub use input::LineReader;
pub use renderer::Renderer;
pub use state::LightState;
pub use telemetry::{Telemetry, TelemetryEmitter};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// Brightness is global output scaling applied by the driver, the colors
/// handed to [`write`](Self::write) are unscaled.
pub trait PixelSink {
    /// Set the global output brightness
    fn set_brightness(&mut self, brightness: u8);

    /// Write colors to the LED strip and show them
    fn write(&mut self, colors: &[Rgb]);
}
