//! The simulation's single seeded random source.
//!
//! # Determinism
//!
//! Every stochastic draw in the simulator — inter-stop distances, headway
//! sampling, cruise-speed sampling — flows through one [`SimRng`] threaded
//! from setup through every handler.  Handlers must never instantiate a
//! fresh generator of their own; doing so breaks run-to-run reproducibility
//! for a given seed.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// The simulation-wide deterministic RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample `Normal(mean, stddev)`. Returns `mean` unchanged if
    /// `stddev <= 0` (a degenerate, non-random "distribution").
    pub fn normal(&mut self, mean: f64, stddev: f64) -> f64 {
        if stddev <= 0.0 {
            return mean;
        }
        // Normal::new only fails for a non-finite stddev, which can't happen
        // after the guard above.
        let dist = Normal::new(mean, stddev).expect("finite, positive stddev");
        dist.sample(&mut self.0)
    }

    /// Sample `Normal(mean, stddev)` and clamp the result at zero.
    ///
    /// Used for physical quantities (distances, speeds) that cannot go
    /// negative; negative draws are clipped rather than resampled.
    pub fn normal_nonneg(&mut self, mean: f64, stddev: f64) -> f64 {
        self.normal(mean, stddev).max(0.0)
    }
}
