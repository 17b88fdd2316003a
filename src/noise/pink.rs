//! Pink noise generator implementation.

use crate::{AudioSignal, Signal};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NUM_STAGES: usize = 3;

/// Stage weights.
const A: [f64; NUM_STAGES] = [0.02109238, 0.07113478, 0.68873558];
/// Stage poles.
const P: [f64; NUM_STAGES] = [0.3190, 0.7756, 0.9613];
/// Sum of the stage weights, removes the DC bias of the [0, 1) draws.
const OFFSET: f64 = A[0] + A[1] + A[2];

const DEFAULT_SCALE: f64 = 7.0;

/// A pink noise generator.
///
/// Pink noise (also called 1/f noise) has equal power per octave, meaning
/// it has more energy at lower frequencies than white noise. This
/// implementation filters uniform draws through three parallel one-pole
/// low-pass stages (Paul Kellet's economy method) and sums them with fixed
/// weights.
///
/// # Examples
///
/// ```
/// use wellenform::{PinkNoise, Signal};
///
/// let mut noise = PinkNoise::<44100>::with_seed(42).with_scale(5.0);
/// let sample = noise.next_sample();
/// ```
pub struct PinkNoise<const SAMPLE_RATE: u32, R: Rng = StdRng> {
    rng: R,
    state: [f64; NUM_STAGES],
    scale: f64,
}

impl<const SAMPLE_RATE: u32> PinkNoise<SAMPLE_RATE, StdRng> {
    /// Creates a new pink noise generator seeded from system entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a reproducible pink noise generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> PinkNoise<SAMPLE_RATE, R> {
    /// Creates a new pink noise generator with a custom RNG.
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            state: [0.0; NUM_STAGES],
            scale: DEFAULT_SCALE,
        }
    }

    /// Builder-style method to set the output scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    /// Zeroes the filter stages.
    pub fn clear(&mut self) {
        self.state = [0.0; NUM_STAGES];
    }
}

impl<const SAMPLE_RATE: u32> Default for PinkNoise<SAMPLE_RATE, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> Signal for PinkNoise<SAMPLE_RATE, R> {
    fn next_sample(&mut self) -> f64 {
        let mut sum = 0.0;
        for ((state, &pole), &weight) in self.state.iter_mut().zip(P.iter()).zip(A.iter()) {
            let white: f64 = self.rng.gen_range(0.0..1.0);
            *state = pole * (*state - white) + white;
            sum += weight * *state;
        }
        (sum * 2.0 - OFFSET) * self.scale
    }
}

impl<const SAMPLE_RATE: u32, R: Rng> AudioSignal<SAMPLE_RATE> for PinkNoise<SAMPLE_RATE, R> {}
