//! Fire simulation over a per-LED heat map
//!
//! Each update runs four steps:
//! 1. every cell cools down a little, randomly
//! 2. heat drifts up from each cell and diffuses
//! 3. new sparks randomly ignite near the bottom
//! 4. heat is mapped to the black body gradient
//!
//! Intensity is the spark probability.

use super::{Effect, FrameContext, FrameOutcome};
use crate::{
    cadence::Cadence,
    color::{Rgb, heat_color},
    math8::Prng,
};

/// Cooling strength, spread over the strip length
const COOLING: usize = 55;
/// Sparks ignite within this many cells of the bottom
const SPARK_ZONE: usize = 7;
const SPARK_HEAT_MIN: u8 = 160;

#[derive(Debug, Clone)]
pub struct FireEffect<const N: usize> {
    cadence: Cadence,
    rng: Prng,
    heat: [u8; N],
}

impl<const N: usize> FireEffect<N> {
    pub const fn new(seed: u64) -> Self {
        Self {
            cadence: Cadence::from_millis(0),
            rng: Prng::new(seed),
            heat: [0; N],
        }
    }

    /// Current heat map, one cell per LED
    pub const fn heat(&self) -> &[u8; N] {
        &self.heat
    }

    /// Highest amount a single cell may cool down per update
    #[allow(clippy::cast_possible_truncation)]
    const fn max_cooling() -> u8 {
        let cells = if N == 0 { 1 } else { N };
        let cooling = COOLING * 10 / cells + 2;
        if cooling > 255 { 255 } else { cooling as u8 }
    }

    fn cool(&mut self) {
        let limit = Self::max_cooling();
        for cell in &mut self.heat {
            *cell = cell.saturating_sub(self.rng.below8(limit));
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn diffuse(&mut self) {
        for k in (2..N).rev() {
            let sum = u16::from(self.heat[k]) + u16::from(self.heat[k - 1]) + u16::from(self.heat[k - 2]);
            self.heat[k] = (sum / 3) as u8;
        }
    }

    fn ignite(&mut self, sparking: u8) {
        if N == 0 || self.rng.random8() >= sparking {
            return;
        }
        let y = self.rng.index(SPARK_ZONE.min(N));
        let spark = self.rng.between8(SPARK_HEAT_MIN, 255);
        self.heat[y] = self.heat[y].saturating_add(spark);
    }

    /// Advance the simulation by one step
    pub fn step(&mut self, sparking: u8) {
        self.cool();
        self.diffuse();
        self.ignite(sparking);
    }
}

impl<const N: usize> Effect for FireEffect<N> {
    fn render(&mut self, ctx: &FrameContext<'_>, leds: &mut [Rgb]) -> FrameOutcome {
        self.cadence.set_interval_ms(u64::from(ctx.state.speed));
        if !self.cadence.ready(ctx.now) {
            return FrameOutcome::Hold;
        }

        self.step(ctx.state.intensity);

        for (led, heat) in leds.iter_mut().zip(self.heat.iter()) {
            *led = heat_color(*heat);
        }
        FrameOutcome::Updated
    }
}
