//! Seeded random source for the simulation
//!
//! Every random draw in a run goes through one PCG stream, so a seed fully
//! reproduces obstacle layouts, item drops and particle bursts.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Simulation RNG
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[min, max)`; returns `min` for an empty range
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }

    /// True with probability `p` (clamped to [0, 1])
    pub fn chance(&mut self, p: f32) -> bool {
        let p = p.clamp(0.0, 1.0);
        self.rng.random::<f32>() < p
    }

    /// Uniform index in `[0, len)`; `len` must be non-zero
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.rng.random_range(0..len.max(1))
    }

    /// Pick one element of a non-empty slice
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.index(items.len())]
    }

    /// Random angle in `[0, 2π)`
    pub fn angle(&mut self) -> f32 {
        self.range(0.0, std::f32::consts::TAU)
    }
}
