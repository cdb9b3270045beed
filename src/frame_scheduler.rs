//! The control loop
//!
//! Portable and never blocking: the caller reads the clock, calls
//! [`FrameScheduler::tick`] and sleeps for the returned duration. Every timed
//! part of the controller (hue advance, effect cadences, auto-cycle,
//! telemetry) compares `now` against its own last-fired instant, so none of
//! them can stall another.

use core::fmt;

use embassy_time::{Duration, Instant};
use embedded_io::Write;

use crate::PixelSink;
use crate::bounds::RenderingBounds;
use crate::cadence::Cadence;
use crate::channel::CommandReceiver;
use crate::command::{self, Ack, CommandOutcome};
use crate::config::{ControllerConfig, PinInfo};
use crate::effect::{EffectId, FrameOutcome};
use crate::error::Error;
use crate::renderer::Renderer;
use crate::report::{Banner, Report};
use crate::state::{AutoCycle, LightState};
use crate::telemetry::TelemetryEmitter;

/// Result of a tick
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// What the active effect did this tick
    pub outcome: FrameOutcome,
    /// How long the caller may sleep before the next tick. Waking earlier,
    /// for example on incoming input, is always allowed.
    pub sleep_duration: Duration,
    pub next_deadline: Instant,
}

/// Owns the state, the effects and both output seams
///
/// # Usage
///
/// ```ignore
/// static COMMANDS: CommandChannel<4> = CommandChannel::new();
///
/// let mut scheduler: FrameScheduler<_, _, 12, 4> = FrameScheduler::new(
///     strip,
///     uart_tx,
///     COMMANDS.receiver(),
///     ControllerConfig::default(),
/// );
/// scheduler.start();
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<'a, P, W, const N: usize, const QUEUE: usize>
where
    P: PixelSink,
    W: Write,
{
    sink: P,
    output: W,
    commands: CommandReceiver<'a, QUEUE>,
    renderer: Renderer<N>,
    state: LightState,
    pin: PinInfo,
    banner: bool,
    idle_poll: Duration,
    hue: Cadence,
    telemetry: TelemetryEmitter,
    /// Brightness last handed to the sink
    pushed_brightness: Option<u8>,
    /// A command changed the state since the last flush
    dirty: bool,
}

impl<'a, P, W, const N: usize, const QUEUE: usize> FrameScheduler<'a, P, W, N, QUEUE>
where
    P: PixelSink,
    W: Write,
{
    pub fn new(
        sink: P,
        output: W,
        commands: CommandReceiver<'a, QUEUE>,
        config: ControllerConfig,
    ) -> Self {
        let mut state = config.initial;
        state.range = RenderingBounds::full(u8::try_from(N).unwrap_or(u8::MAX));
        Self {
            sink,
            output,
            commands,
            renderer: Renderer::new(config.seed),
            state,
            pin: config.pin,
            banner: config.banner,
            idle_poll: config.idle_poll,
            hue: Cadence::new(config.hue_interval),
            telemetry: TelemetryEmitter::new(config.telemetry_interval),
            pushed_brightness: None,
            dirty: false,
        }
    }

    /// Push the initial brightness and print the help banner
    pub fn start(&mut self) {
        self.push_brightness();
        if self.banner {
            write_line(&mut self.output, format_args!("{Banner}"));
        }
        log::info!("controller started, effect: {}", self.state.effect.as_str());
    }

    /// Run one iteration of the loop
    ///
    /// In order: advance the shared hue, apply at most one queued command,
    /// step the auto-cycle, render and flush the active effect, then emit
    /// telemetry if it is due.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        if self.hue.ready(now) {
            self.state.global_hue = self.state.global_hue.wrapping_add(self.state.hue_speed);
        }

        if let Some(line) = self.commands.try_receive() {
            self.handle_line(&line);
        }

        self.step_auto_cycle();

        self.push_brightness();
        let outcome = self.renderer.render(&self.state, now);
        match outcome {
            FrameOutcome::Hold => {
                // Geometry or color changes show at once on held frames
                if self.dirty {
                    self.present();
                }
            }
            FrameOutcome::Updated => self.present(),
            FrameOutcome::Dimmed(level) => {
                self.sink.set_brightness(level);
                self.present();
                self.sink.set_brightness(self.state.brightness);
                self.pushed_brightness = Some(self.state.brightness);
            }
        }

        if let Some(telemetry) = self.telemetry.poll(now, &self.state) {
            write_line(&mut self.output, format_args!("{telemetry}\n"));
        }

        let sleep_duration = if self.state.effect.paces_loop() {
            Duration::from_millis(u64::from(self.state.speed))
        } else {
            self.idle_poll
        };
        TickResult {
            outcome,
            sleep_duration,
            next_deadline: now + sleep_duration,
        }
    }

    /// Decode and apply one line, writing its acknowledgment or report
    ///
    /// [`tick`](Self::tick) calls this for queued lines; hosts without an
    /// input context may call it directly.
    pub fn handle_line(&mut self, line: &str) -> CommandOutcome {
        let previous = self.state.effect;
        let outcome = command::process(&mut self.state, line);

        match outcome {
            CommandOutcome::Ignored => {
                log::debug!("ignored input line {:?}", line);
            }
            CommandOutcome::Applied(ack) => {
                self.dirty = true;
                if self.state.effect != previous {
                    log::info!("effect: {}", self.state.effect.as_str());
                }
                if matches!(ack, Ack::AutoCycle(true)) {
                    log::info!("auto-cycle enabled");
                }
                write_line(&mut self.output, format_args!("{ack}\n"));
            }
            CommandOutcome::Query(query) => {
                let report = Report::new(query, &self.state, &self.pin, N);
                write_line(&mut self.output, format_args!("{report}"));
            }
        }
        outcome
    }

    fn step_auto_cycle(&mut self) {
        let cycle = &mut self.state.auto_cycle;
        if !cycle.enabled {
            return;
        }

        cycle.ticks = cycle.ticks.saturating_add(1);
        if cycle.ticks < AutoCycle::period(self.state.speed) {
            return;
        }

        let (index, effect) = EffectId::auto_cycle_after(cycle.index);
        cycle.index = index;
        cycle.ticks = 0;
        self.state.effect = effect;
        self.dirty = true;
        log::info!("auto-cycle: {}", effect.as_str());
    }

    fn push_brightness(&mut self) {
        if self.pushed_brightness != Some(self.state.brightness) {
            self.sink.set_brightness(self.state.brightness);
            self.pushed_brightness = Some(self.state.brightness);
        }
    }

    fn present(&mut self) {
        let frame = self.renderer.output(self.state.reverse);
        self.sink.write(frame);
        self.dirty = false;
    }

    pub fn state(&self) -> &LightState {
        &self.state
    }

    pub fn renderer(&self) -> &Renderer<N> {
        &self.renderer
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut P {
        &mut self.sink
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }
}

/// Write to the transport, logging failures instead of propagating them
fn write_line<W: Write>(output: &mut W, args: fmt::Arguments<'_>) {
    let result = output
        .write_fmt(args)
        .map_err(Error::from)
        .and_then(|()| output.flush().map_err(Error::Transport));
    if let Err(err) = result {
        log::warn!("transport write failed: {err:?}");
    }
}
