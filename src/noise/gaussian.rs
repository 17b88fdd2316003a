//! Gaussian (normally distributed) white noise.

use crate::{AudioSignal, Signal};
use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Output scale applied to the standard normal variates.
const GAUSSIAN_SCALE: f64 = 0.5;

/// Gaussian white noise using the Marsaglia polar method.
///
/// Each accepted pair of uniform draws yields two independent normal values;
/// the second one is cached and returned on the following sample. Output is
/// scaled by 0.5, so roughly 95% of samples fall within [-1.0, 1.0].
///
/// # Examples
///
/// ```
/// use wellenform::{GaussianNoise, Signal};
///
/// let mut noise = GaussianNoise::<48000>::with_seed(7);
/// let sample = noise.next_sample();
/// ```
pub struct GaussianNoise<const SAMPLE_RATE: u32, R: Rng = StdRng> {
    rng: R,
    /// Second value of the last accepted pair
    cached: Option<f64>,
}

impl<const SAMPLE_RATE: u32> GaussianNoise<SAMPLE_RATE, StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> GaussianNoise<SAMPLE_RATE, R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, cached: None }
    }
}

impl<const SAMPLE_RATE: u32> Default for GaussianNoise<SAMPLE_RATE, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> Signal for GaussianNoise<SAMPLE_RATE, R> {
    fn next_sample(&mut self) -> f64 {
        if let Some(value) = self.cached.take() {
            return value * GAUSSIAN_SCALE;
        }

        let (x1, x2, w) = loop {
            let x1 = self.rng.gen_range(-1.0..1.0);
            let x2 = self.rng.gen_range(-1.0..1.0);
            let w: f64 = x1 * x1 + x2 * x2;
            if w > 0.0 && w < 1.0 {
                break (x1, x2, w);
            }
        };

        let scale = (-2.0 * w.ln() / w).sqrt();
        self.cached = Some(x2 * scale);
        x1 * scale * GAUSSIAN_SCALE
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> AudioSignal<SAMPLE_RATE> for GaussianNoise<SAMPLE_RATE, R> {}

/// Gaussian white noise using the basic Box-Muller transform.
///
/// Draws two uniform values per sample and discards the sine half of the
/// transform. The output is an unscaled standard normal variate.
pub struct FastGaussianNoise<const SAMPLE_RATE: u32> {
    rng: SmallRng,
}

impl<const SAMPLE_RATE: u32> FastGaussianNoise<SAMPLE_RATE> {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<const SAMPLE_RATE: u32> Default for FastGaussianNoise<SAMPLE_RATE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32> Signal for FastGaussianNoise<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        // (0, 1] keeps the logarithm finite
        let r1: f64 = 1.0 - self.rng.gen_range(0.0..1.0);
        let r2: f64 = self.rng.gen_range(0.0..1.0);
        (-2.0 * r1.ln()).sqrt() * (TAU * r2).cos()
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for FastGaussianNoise<SAMPLE_RATE> {}
