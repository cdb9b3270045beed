//! 8-bit fixed-point helpers shared by the effect renderers.
//!
//! Everything here works on `u8` "fractions" where 0 means 0.0 and 255 means
//! (almost) 1.0, the same convention the LED driver uses for brightness.

use core::f32::consts::TAU;

use embassy_time::Instant;

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Blend two 8-bit values
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let delta = b as i16 - a as i16;

    let mut partial: u32 = (a as u32) << 16; // a * 65536
    partial = partial.wrapping_add(
        (delta as u32)
            .wrapping_mul(amount_of_b as u32)
            .wrapping_mul(257),
    ); // (b - a) * amount_of_b * 257
    partial = partial.wrapping_add(0x8000); // + 32768 for rounding

    (partial >> 16) as u8
}

/// Sine of an 8-bit angle (256 = full turn), mapped to 0-255.
///
/// `sin8(0) == 128`, `sin8(64) == 255`, `sin8(192) == 0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sin8(theta: u8) -> u8 {
    let s = libm::sinf(f32::from(theta) * TAU / 256.0);
    ((s + 1.0) * 127.5 + 0.5).clamp(0.0, 255.0) as u8
}

/// Triangle wave: rises 0..254 over the first half, falls back over the second.
#[inline]
pub const fn triwave8(i: u8) -> u8 {
    let j = if i & 0x80 != 0 { 255 - i } else { i };
    j << 1
}

/// Cubic ease in/out (`3x² - 2x³`)
#[allow(clippy::cast_possible_truncation)]
pub const fn ease8_in_out_cubic(i: u8) -> u8 {
    let ii = scale8(i, i);
    let iii = scale8(ii, i);
    let r = 3 * ii as u16 - 2 * iii as u16;
    if r > 255 { 255 } else { r as u8 }
}

/// 16-bit phase of a beat running at `bpm_q8` beats per minute.
///
/// `bpm_q8` is Q8.8 fixed point, so `60 << 8` is one beat per second.
/// One full beat spans the whole `u16` range.
#[allow(clippy::cast_possible_truncation)]
pub fn beat16(bpm_q8: u32, now: Instant) -> u16 {
    let ms = now.as_millis();
    (ms.wrapping_mul(u64::from(bpm_q8)).wrapping_mul(256) / 60_000) as u16
}

/// 8-bit phase of a beat running at `bpm` whole beats per minute.
#[allow(clippy::cast_possible_truncation)]
pub fn beat8(bpm: u8, now: Instant) -> u8 {
    (beat16(u32::from(bpm) << 8, now) >> 8) as u8
}

/// Sine oscillator over an arbitrary `low..=high` range, for pixel positions.
#[allow(clippy::cast_possible_truncation)]
pub fn beatsin_range(bpm_q8: u32, low: u16, high: u16, now: Instant) -> u16 {
    let range = u32::from(high.saturating_sub(low));
    let phase = (beat16(bpm_q8, now) >> 8) as u8;
    let offset = u32::from(sin8(phase)) * range / 255;
    low + offset as u16
}

/// Small deterministic PRNG (`SplitMix64`), one instance per effect.
#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        (z ^ (z >> 31)) as u32
    }

    /// Uniform value in `0..=255`
    #[allow(clippy::cast_possible_truncation)]
    pub fn random8(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }

    /// Uniform value in `0..limit` (0 when `limit` is 0)
    #[allow(clippy::cast_possible_truncation)]
    pub fn below8(&mut self, limit: u8) -> u8 {
        ((u16::from(self.random8()) * u16::from(limit)) >> 8) as u8
    }

    /// Uniform value in `low..high`
    pub fn between8(&mut self, low: u8, high: u8) -> u8 {
        low + self.below8(high.saturating_sub(low))
    }

    /// Uniform index in `0..len` (0 when `len` is 0)
    #[allow(clippy::cast_possible_truncation)]
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_u32() as usize) % len
    }
}
