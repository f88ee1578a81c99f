//! Deterministic random number generation.
//!
//! Implements PCG (Permuted Congruential Generator) with partitioned seeds
//! for reproducible parallel execution.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, every Monte Carlo draw is bitwise-identical
//! across runs, platforms and thread counts: each iteration gets its own
//! stream from [`SimRng::partition`], so scheduling order never matters.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Golden-ratio increment separating partition seeds.
const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct SimRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Next stream index handed out by `partition`.
    stream: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SimRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            stream: 0,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Create an RNG seeded from operating-system entropy.
    ///
    /// The chosen seed is still recorded, so a run can be replayed by
    /// passing [`SimRng::master_seed`] to [`SimRng::new`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get current stream index.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// Create `n` independent RNGs for parallel execution.
    ///
    /// Each partition gets its own stream derived from the master seed,
    /// so results do not depend on which thread consumes which stream.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sanicost::engine::rng::SimRng;
    ///
    /// let mut rng = SimRng::new(42);
    /// let partitions = rng.partition(4);
    /// assert_eq!(partitions.len(), 4);
    /// assert_eq!(rng.stream(), 4);
    /// ```
    #[must_use]
    pub fn partition(&mut self, n: usize) -> Vec<Self> {
        let partitions = (0..n)
            .map(|i| {
                let stream = self.stream + i as u64;
                let seed = self
                    .master_seed
                    .wrapping_add(stream.wrapping_add(1).wrapping_mul(STREAM_STRIDE));
                Self {
                    master_seed: self.master_seed,
                    stream,
                    rng: Pcg64::seed_from_u64(seed),
                }
            })
            .collect();

        self.stream += n as u64;
        partitions
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random f64 in `[min, max)`; the bounds may come in either order.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        lo + (hi - lo) * self.gen_f64()
    }

    /// Multiplicative uniform noise: `value × U(1 - half_width, 1 + half_width)`.
    pub fn vary(&mut self, value: f64, half_width: f64) -> f64 {
        self.gen_range_f64(value * (1.0 - half_width), value * (1.0 + half_width))
    }
}
