//! Desktop preview for myrtio-fan-composer
//!
//! Runs the real `FrameScheduler` against a simulated fan ring. Commands are
//! typed exactly as they would be sent over the serial link, and everything
//! the controller writes back (acknowledgments, reports, telemetry) lands in
//! the log panel.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use myrtio_fan_composer::{
    CommandChannel, CommandLine, CommandSender, ControllerConfig, FrameScheduler, Instant,
    PixelSink, Rgb, math8::scale8,
};

/// Number of LEDs on the simulated fan
const LED_COUNT: usize = 12;

/// Command queue depth between the UI and the scheduler
const COMMAND_QUEUE: usize = 8;

/// Ticks simulated per UI frame at most, so a stalled window cannot spin
const MAX_TICKS_PER_FRAME: usize = 2_000;

/// Lines kept in the log panel
const LOG_CAPACITY: usize = 400;

const LED_SIZE: f32 = 22.0;
const LED_GAP: f32 = 4.0;

static COMMANDS: CommandChannel<COMMAND_QUEUE> = CommandChannel::new();

/// Effects offered as quick buttons: (command, label)
const EFFECT_BUTTONS: [(&str, &str); 14] = [
    ("R", "rainbow"),
    ("P", "pulse"),
    ("S", "static"),
    ("W", "wipe"),
    ("T", "theater"),
    ("K", "sparkle"),
    ("N", "sinelon"),
    ("B", "bpm"),
    ("C", "confetti"),
    ("F", "fire"),
    ("X", "strobe"),
    ("E", "breathing"),
    ("Y", "tipsy"),
    ("J", "multi-color"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// LEDs around a circle, like the fan
    Ring,
    /// LEDs in a single row
    Strip,
}

/// Simulated strip: remembers the last frame and global brightness
#[derive(Debug, Default)]
struct PreviewSink {
    frame: Vec<Rgb>,
    brightness: u8,
    /// Brightness the last frame was shown at
    shown_brightness: u8,
    frames: u64,
}

impl PixelSink for PreviewSink {
    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn write(&mut self, colors: &[Rgb]) {
        self.frame.clear();
        self.frame.extend_from_slice(colors);
        self.shown_brightness = self.brightness;
        self.frames += 1;
    }
}

/// Transport side: collects everything the controller prints
#[derive(Debug, Default)]
struct LogWriter {
    pending: String,
}

impl LogWriter {
    fn drain_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.pending.rfind('\n') else {
            return Vec::new();
        };
        let complete: String = self.pending.drain(..=last_newline).collect();
        complete.lines().map(str::to_owned).collect()
    }
}

impl embedded_io::ErrorType for LogWriter {
    type Error = Infallible;
}

impl embedded_io::Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.pending.push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

type PreviewScheduler =
    FrameScheduler<'static, PreviewSink, LogWriter, LED_COUNT, COMMAND_QUEUE>;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_title("Fan Composer Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-fan-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    scheduler: PreviewScheduler,
    commands: CommandSender<'static, COMMAND_QUEUE>,

    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Synthetic time of the next scheduler tick
    next_tick_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,

    input: String,
    log: VecDeque<String>,
    show_telemetry: bool,
    layout: Layout,
    led_size: f32,
}

impl PreviewApp {
    fn new() -> Self {
        let mut scheduler = FrameScheduler::new(
            PreviewSink::default(),
            LogWriter::default(),
            COMMANDS.receiver(),
            ControllerConfig::default(),
        );
        scheduler.start();

        let mut app = Self {
            scheduler,
            commands: COMMANDS.sender(),
            t_ms: 0,
            next_tick_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            input: String::new(),
            log: VecDeque::new(),
            show_telemetry: false,
            layout: Layout::Ring,
            led_size: LED_SIZE,
        };
        app.collect_output();
        app
    }

    /// Queue a command line as if it arrived over the serial link
    fn send(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        self.push_log(format!("> {line}"));
        let Ok(line) = CommandLine::try_from(line) else {
            self.push_log("! line too long, dropped".to_owned());
            return;
        };
        if self.commands.try_send(line).is_err() {
            self.push_log("! command queue full, dropped".to_owned());
        }
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    fn collect_output(&mut self) {
        for line in self.scheduler.output_mut().drain_lines() {
            if line.starts_with('{') && !self.show_telemetry {
                continue;
            }
            self.push_log(line);
        }
    }

    /// Update synthetic time based on wall clock and time scale
    fn update_time(&mut self) {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if self.playing {
            let delta_ms = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let delta_ms = if delta_ms.is_finite() {
                delta_ms.clamp(0.0, 10_000.0) as u64
            } else {
                0
            };
            self.t_ms = self.t_ms.wrapping_add(delta_ms);
        }
    }

    /// Run every scheduler tick that is due up to the synthetic clock
    fn run_ticks(&mut self) {
        let mut ticks = 0;
        while self.next_tick_ms <= self.t_ms && ticks < MAX_TICKS_PER_FRAME {
            let result = self.scheduler.tick(Instant::from_millis(self.next_tick_ms));
            self.next_tick_ms += result.sleep_duration.as_millis().max(1);
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.next_tick_ms = self.t_ms;
        }
    }

    fn displayed_colors(&self) -> Vec<egui::Color32> {
        let sink = self.scheduler.sink();
        sink.frame
            .iter()
            .map(|pixel| {
                egui::Color32::from_rgb(
                    scale8(pixel.r, sink.shown_brightness),
                    scale8(pixel.g, sink.shown_brightness),
                    scale8(pixel.b, sink.shown_brightness),
                )
            })
            .collect()
    }

    fn draw_leds(&self, ui: &mut egui::Ui) {
        let colors = self.displayed_colors();
        let led_pitch = self.led_size + LED_GAP;

        match self.layout {
            Layout::Strip => {
                #[allow(clippy::cast_precision_loss)]
                let width = LED_COUNT as f32 * led_pitch;
                let (response, painter) = ui.allocate_painter(
                    egui::vec2(width, led_pitch),
                    egui::Sense::hover(),
                );
                let origin = response.rect.min;
                #[allow(clippy::cast_precision_loss)]
                for (i, color) in colors.iter().enumerate() {
                    let rect = egui::Rect::from_min_size(
                        egui::pos2(origin.x + i as f32 * led_pitch, origin.y),
                        egui::vec2(self.led_size, self.led_size),
                    );
                    painter.rect_filled(rect, 3.0, *color);
                }
            }
            Layout::Ring => {
                #[allow(clippy::cast_precision_loss)]
                let radius = LED_COUNT as f32 * led_pitch / std::f32::consts::TAU;
                let side = 2.0 * radius + self.led_size * 2.0;
                let (response, painter) =
                    ui.allocate_painter(egui::vec2(side, side), egui::Sense::hover());
                let center = response.rect.center();
                painter.circle_stroke(
                    center,
                    radius,
                    egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
                );
                #[allow(clippy::cast_precision_loss)]
                for (i, color) in colors.iter().enumerate() {
                    let angle = i as f32 / LED_COUNT as f32 * std::f32::consts::TAU
                        - std::f32::consts::FRAC_PI_2;
                    let pos = center + egui::vec2(angle.cos(), angle.sin()) * radius;
                    painter.circle_filled(pos, self.led_size / 2.0, *color);
                }
            }
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_time();
        self.run_ticks();
        self.collect_output();

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::SidePanel::right("log_panel")
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Log");
                    ui.checkbox(&mut self.show_telemetry, "telemetry");
                    if ui.button("Clear").clicked() {
                        self.log.clear();
                    }
                });
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.log {
                            ui.monospace(line);
                        }
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            // <PlaybackControls>
            ui.horizontal(|ui| {
                if ui
                    .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                    .clicked()
                {
                    self.playing = !self.playing;
                }
                let secs = self.t_ms / 1000;
                let ms = self.t_ms % 1000;
                ui.label(format!("Time: {secs}.{ms:03}s"));
                ui.add_space(8.0);
                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));
            });
            // </PlaybackControls>

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Layout:");
                ui.selectable_value(&mut self.layout, Layout::Ring, "ring");
                ui.selectable_value(&mut self.layout, Layout::Strip, "strip");
                ui.add_space(8.0);
                ui.label("Size:");
                ui.add(egui::Slider::new(&mut self.led_size, 8.0..=40.0));
            });

            ui.add_space(8.0);

            // <CommandInput>
            ui.horizontal(|ui| {
                ui.label("Command:");
                let response = ui.text_edit_singleline(&mut self.input);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if submitted || ui.button("Send").clicked() {
                    let line = std::mem::take(&mut self.input);
                    self.send(&line);
                    response.request_focus();
                }
            });
            // </CommandInput>

            ui.add_space(4.0);

            ui.horizontal_wrapped(|ui| {
                for (command, label) in EFFECT_BUTTONS {
                    if ui.button(label).clicked() {
                        self.send(command);
                    }
                }
            });

            ui.horizontal_wrapped(|ui| {
                for (command, label) in [
                    ("-", "brightness -"),
                    ("+", "brightness +"),
                    ("<", "faster"),
                    (">", "slower"),
                    ("A", "auto-cycle"),
                    (";", "reverse"),
                    ("'", "mirror"),
                    ("]", "rainbow style"),
                    ("L", "status"),
                    ("(", "reset"),
                ] {
                    if ui.button(label).clicked() {
                        self.send(command);
                    }
                }
            });

            ui.add_space(16.0);

            self.draw_leds(ui);

            ui.add_space(8.0);

            let state = self.scheduler.state();
            ui.label(format!(
                "effect: {}  brightness: {}  speed: {}ms  hue: {}  frames: {}",
                state.effect.as_str(),
                state.brightness,
                state.speed,
                state.global_hue,
                self.scheduler.sink().frames,
            ));
        });
    }
}
