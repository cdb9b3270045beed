//! Line assembly from the byte-oriented transport

use embedded_io::{Read, ReadReady};
use heapless::Vec;

use crate::channel::{COMMAND_LINE_CAPACITY, CommandLine, CommandSender};
use crate::error::Error;

const READ_CHUNK: usize = 16;

/// Collects transport bytes until a line terminator
///
/// `\r`, `\n` and `\r\n` all end a line. Lines are trimmed and empty ones
/// skipped. A line longer than [`COMMAND_LINE_CAPACITY`] is discarded whole,
/// so a truncated prefix can never be mistaken for a command.
#[derive(Debug, Default)]
pub struct LineReader {
    buffer: Vec<u8, COMMAND_LINE_CAPACITY>,
    overflowed: bool,
}

impl LineReader {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feed one byte, returning a line once it is complete
    pub fn push(&mut self, byte: u8) -> Option<CommandLine> {
        if byte != b'\r' && byte != b'\n' {
            if !self.overflowed && self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        let line = self.finish();
        self.buffer.clear();
        self.overflowed = false;
        line
    }

    fn finish(&self) -> Option<CommandLine> {
        if self.overflowed {
            log::warn!("dropping input line longer than {COMMAND_LINE_CAPACITY} bytes");
            return None;
        }
        let Ok(text) = core::str::from_utf8(&self.buffer) else {
            log::warn!("dropping input line with invalid UTF-8");
            return None;
        };
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut line = CommandLine::new();
        line.push_str(text).ok()?;
        Some(line)
    }

    /// Drain every byte the transport has ready and queue complete lines
    ///
    /// Returns the number of lines queued. When the queue is full the
    /// remaining lines of this batch are still assembled but dropped, and
    /// [`Error::QueueFull`] is returned at the end.
    pub fn poll<R, const SIZE: usize>(
        &mut self,
        reader: &mut R,
        commands: &CommandSender<'_, SIZE>,
    ) -> Result<usize, Error<R::Error>>
    where
        R: Read + ReadReady,
    {
        let mut queued = 0;
        let mut dropped = false;
        let mut chunk = [0u8; READ_CHUNK];

        while reader.read_ready().map_err(Error::Transport)? {
            let read = reader.read(&mut chunk).map_err(Error::Transport)?;
            if read == 0 {
                break;
            }
            for &byte in &chunk[..read] {
                let Some(line) = self.push(byte) else {
                    continue;
                };
                if commands.try_send(line).is_ok() {
                    queued += 1;
                } else {
                    log::warn!("command queue full, dropping line");
                    dropped = true;
                }
            }
        }

        if dropped {
            Err(Error::QueueFull)
        } else {
            Ok(queued)
        }
    }
}
