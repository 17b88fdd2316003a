//! White noise generator implementations.

use crate::{AudioSignal, Signal};
use rand::rngs::{SmallRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

/// Scale that maps a 24-bit integer onto [0, 2).
const FAST_SCALE: f64 = 2.0 / (1u32 << 24) as f64;

/// A white noise generator.
///
/// White noise has equal power across all frequencies. Each sample is
/// a random value uniformly distributed in [-1.0, 1.0).
pub struct WhiteNoise<const SAMPLE_RATE: u32, R: Rng = StdRng> {
    /// Random number generator
    rng: R,
}

impl<const SAMPLE_RATE: u32> WhiteNoise<SAMPLE_RATE, StdRng> {
    /// Creates a new white noise generator seeded from system entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellenform::{Signal, WhiteNoise};
    ///
    /// let mut noise = WhiteNoise::<44100>::new();
    /// let sample = noise.next_sample();
    /// ```
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a reproducible white noise generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> WhiteNoise<SAMPLE_RATE, R> {
    /// Creates a new white noise generator with a custom RNG.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellenform::{Signal, WhiteNoise};
    /// use rand::SeedableRng;
    ///
    /// let rng = rand::rngs::SmallRng::seed_from_u64(42);
    /// let mut noise = WhiteNoise::<44100, _>::with_rng(rng);
    /// let sample = noise.next_sample();
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<const SAMPLE_RATE: u32> Default for WhiteNoise<SAMPLE_RATE, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> Signal for WhiteNoise<SAMPLE_RATE, R> {
    fn next_sample(&mut self) -> f64 {
        self.rng.gen_range(-1.0..1.0)
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> AudioSignal<SAMPLE_RATE> for WhiteNoise<SAMPLE_RATE, R> {}

/// A cheaper white noise generator.
///
/// Uses a small non-cryptographic generator and maps the top 24 bits of each
/// draw directly onto [-1.0, 1.0).
pub struct FastWhiteNoise<const SAMPLE_RATE: u32> {
    rng: SmallRng,
}

impl<const SAMPLE_RATE: u32> FastWhiteNoise<SAMPLE_RATE> {
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

impl<const SAMPLE_RATE: u32> Default for FastWhiteNoise<SAMPLE_RATE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32> Signal for FastWhiteNoise<SAMPLE_RATE> {
    #[inline]
    fn next_sample(&mut self) -> f64 {
        (self.rng.next_u32() >> 8) as f64 * FAST_SCALE - 1.0
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for FastWhiteNoise<SAMPLE_RATE> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_range() {
        let mut noise = WhiteNoise::<44100>::new();
        for _ in 0..10000 {
            let sample = noise.next_sample();
            assert!((-1.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_fast_sample_range() {
        let mut noise = FastWhiteNoise::<44100>::new();
        for _ in 0..10000 {
            let sample = noise.next_sample();
            assert!((-1.0..1.0).contains(&sample));
        }
    }

    #[test]
    fn test_fast_scale_end_points() {
        assert_eq!(0.0 * FAST_SCALE - 1.0, -1.0);
        let top = ((1u32 << 24) - 1) as f64 * FAST_SCALE - 1.0;
        assert!(top < 1.0);
    }

    #[test]
    fn test_randomness() {
        let mut noise = WhiteNoise::<44100>::new();
        let samples: Vec<f64> = (0..100).map(|_| noise.next_sample()).collect();
        let first = samples[0];
        let all_same = samples.iter().all(|&s| s == first);
        assert!(!all_same, "White noise should produce varying samples");
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = WhiteNoise::<44100>::with_seed(9);
        let mut b = WhiteNoise::<44100>::with_seed(9);
        let mut fast_a = FastWhiteNoise::<44100>::with_seed(9);
        let mut fast_b = FastWhiteNoise::<44100>::with_seed(9);
        for _ in 0..256 {
            assert_eq!(a.next_sample(), b.next_sample());
            assert_eq!(fast_a.next_sample(), fast_b.next_sample());
        }
    }

    #[test]
    fn test_mean_is_near_zero() {
        let mut noise = FastWhiteNoise::<44100>::with_seed(1);
        let mean = (0..100_000).map(|_| noise.next_sample()).sum::<f64>() / 100_000.0;
        assert!(mean.abs() < 0.02, "{mean}");
    }

    #[test]
    fn test_process_buffer() {
        let mut noise = WhiteNoise::<44100>::with_seed(3);
        let mut buffer = vec![0.0; 128];
        noise.process(&mut buffer);
        for sample in buffer {
            assert!((-1.0..1.0).contains(&sample));
        }
    }
}
