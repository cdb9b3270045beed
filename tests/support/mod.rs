#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;
use std::string::String;
use std::vec::Vec;

use myrtio_fan_composer::{ControllerConfig, FrameScheduler, PixelSink, Rgb};

pub const LEDS: usize = 12;
pub const QUEUE: usize = 4;

pub type TestScheduler<'a> = FrameScheduler<'a, RecordingSink, CaptureWriter, LEDS, QUEUE>;

/// Sink that remembers every call it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub brightness: u8,
    pub brightness_calls: Vec<u8>,
    pub frames: Vec<Vec<Rgb>>,
    /// Brightness in effect when each frame was written
    pub frame_brightness: Vec<u8>,
}

impl PixelSink for RecordingSink {
    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.brightness_calls.push(brightness);
    }

    fn write(&mut self, colors: &[Rgb]) {
        self.frames.push(colors.to_vec());
        self.frame_brightness.push(self.brightness);
    }
}

impl RecordingSink {
    pub fn last_frame(&self) -> &[Rgb] {
        self.frames.last().map_or(&[], Vec::as_slice)
    }
}

/// Transport writer collecting text
#[derive(Debug, Default)]
pub struct CaptureWriter {
    pub text: String,
}

impl CaptureWriter {
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn telemetry_lines(&self) -> usize {
        self.text.lines().filter(|line| line.starts_with("{\"BR\"")).count()
    }
}

impl embedded_io::ErrorType for CaptureWriter {
    type Error = Infallible;
}

impl embedded_io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.text.push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Transport reader handing out queued bytes in small chunks
#[derive(Debug, Default)]
pub struct ByteSource {
    data: VecDeque<u8>,
    chunk: usize,
}

impl ByteSource {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            data: bytes.iter().copied().collect(),
            chunk: 5,
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.data.extend(bytes.iter().copied());
    }
}

impl embedded_io::ErrorType for ByteSource {
    type Error = Infallible;
}

impl embedded_io::Read for ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let count = buf.len().min(self.chunk).min(self.data.len());
        for (slot, byte) in buf.iter_mut().zip(self.data.drain(..count)) {
            *slot = byte;
        }
        Ok(count)
    }
}

impl embedded_io::ReadReady for ByteSource {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.data.is_empty())
    }
}

pub fn quiet_config() -> ControllerConfig {
    ControllerConfig {
        banner: false,
        ..ControllerConfig::default()
    }
}
