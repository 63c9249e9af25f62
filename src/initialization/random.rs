use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Uniform};

use super::{Result, ValueGen};

/// A value generator that follows a certain probabilistic distribution.
pub struct RandValueGen<R: Rng, D: Distribution<f64>> {
    rng: R,
    distribution: D,
}

impl<R: Rng, D: Distribution<f64>> RandValueGen<R, D> {
    /// Creates a new `RandValueGen` value generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the random numbers from.
    pub fn new(rng: R, distribution: D) -> Self {
        Self { rng, distribution }
    }
}

impl<R: Rng> RandValueGen<R, Uniform<f64>> {
    /// Creates a new `RandValueGen` value generator with an inclusive uniform distribution.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The inclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low > high).
    pub fn uniform_inclusive(rng: R, low: f64, high: f64) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new_inclusive(low, high)?))
    }
}

impl RandValueGen<StdRng, Uniform<f64>> {
    /// Creates the generator used to initialize a kernel run, values fall in `[0, 1]`.
    ///
    /// # Arguments
    /// * `seed` - The seed of the run, equal seeds produce equal vectors.
    pub fn unit(seed: u64) -> Result<Self> {
        Self::uniform_inclusive(StdRng::seed_from_u64(seed), 0., 1.)
    }
}

impl<R: Rng, D: Distribution<f64>> ValueGen for RandValueGen<R, D> {
    fn sample(&mut self) -> f64 {
        self.distribution.sample(&mut self.rng)
    }
}
