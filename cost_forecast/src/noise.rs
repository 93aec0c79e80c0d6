//! Random perturbation sources for forecast projection
//!
//! Every source yields draws in `[-0.5, 0.5)`. The engine scales the draw by
//! the noise amplitude and the cloud baseline, so the source itself carries
//! no knowledge of costs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use std::fmt;

/// Lower bound of a noise draw
pub const NOISE_MIN: f64 = -0.5;
/// Upper bound of a noise draw
pub const NOISE_MAX: f64 = 0.5;

/// Source of centered noise draws
pub trait NoiseSource {
    /// Draw one value in `[-0.5, 0.5)`
    fn sample(&mut self) -> f64;
}

/// Uniform noise backed by a random number generator
#[derive(Debug, Clone)]
pub struct RngNoise<R: Rng> {
    rng: R,
    distribution: Uniform<f64>,
}

impl<R: Rng> RngNoise<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            distribution: Uniform::new(NOISE_MIN, NOISE_MAX),
        }
    }
}

impl RngNoise<StdRng> {
    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible generator for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NoiseSource for RngNoise<R> {
    fn sample(&mut self) -> f64 {
        self.distribution.sample(&mut self.rng)
    }
}

/// Constant noise, clamped to the draw band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(f64);

impl FixedNoise {
    /// Create a source that always returns `value`
    pub fn new(value: f64) -> Self {
        Self(value.clamp(NOISE_MIN, NOISE_MAX))
    }

    /// The constant draw
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl NoiseSource for FixedNoise {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

/// Noise drawn from a closure
pub struct FnNoise<F>(F);

impl<F: FnMut() -> f64> FnNoise<F> {
    /// Wrap a closure producing draws
    pub fn new(draw: F) -> Self {
        Self(draw)
    }
}

impl<F: FnMut() -> f64> NoiseSource for FnNoise<F> {
    fn sample(&mut self) -> f64 {
        (self.0)().clamp(NOISE_MIN, NOISE_MAX)
    }
}

impl<F> fmt::Debug for FnNoise<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnNoise").finish_non_exhaustive()
    }
}
