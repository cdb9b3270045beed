//! Non-blocking rate limiting.
//!
//! Every periodic behavior of the controller (hue advance, telemetry, the
//! self-timed effects) owns one [`Cadence`] and asks it whether it is due.
//! Nothing ever sleeps; a cadence that is not due simply says no.

use embassy_time::{Duration, Instant};

/// Interval gate with its own last-fired timestamp
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: Duration,
    last: Option<Instant>,
}

impl Cadence {
    /// Create a cadence that fires on the very first check
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub const fn from_millis(interval_ms: u64) -> Self {
        Self::new(Duration::from_millis(interval_ms))
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval without touching the last fire time
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval = Duration::from_millis(interval_ms);
    }

    /// Check whether the interval has elapsed, without firing
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => {
                now.as_millis().saturating_sub(last.as_millis()) >= self.interval.as_millis()
            }
        }
    }

    /// Fire if due, recording `now` as the last fire time
    ///
    /// The next fire is measured from `now` rather than from the previous
    /// deadline, so a stalled loop never produces a burst of catch-up fires.
    pub fn ready(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.last = Some(now);
        true
    }

    /// Last fire time, if the cadence fired at least once
    pub const fn last(&self) -> Option<Instant> {
        self.last
    }

    /// Forget the last fire time so the next check fires immediately
    pub fn reset(&mut self) {
        self.last = None;
    }
}
