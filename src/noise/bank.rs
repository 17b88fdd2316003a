//! Switchable noise source combining every generator in this module.

use super::{
    FastGaussianNoise, FastWhiteNoise, GaussianNoise, PinkNoise, SimplexNoise, WhiteNoise,
};
use crate::{AudioSignal, Signal};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

/// Noise flavours available from [`Noise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseType {
    /// Uniform white noise in [-1.0, 1.0)
    #[default]
    White,
    /// Uniform white noise from a cheaper generator
    WhiteFast,
    /// Normally distributed noise (polar method, scaled by 0.5)
    Gaussian,
    /// Normally distributed noise (basic Box-Muller, unscaled)
    GaussianFast,
    /// 1/f noise
    Pink,
    /// Smooth coherent noise
    Simplex,
}

impl NoiseType {
    /// All noise types, in seed derivation order.
    pub const ALL: [NoiseType; 6] = [
        NoiseType::White,
        NoiseType::WhiteFast,
        NoiseType::Gaussian,
        NoiseType::GaussianFast,
        NoiseType::Pink,
        NoiseType::Simplex,
    ];
}

/// Derives one independent seed per generator from a bank seed.
fn derive_seeds(seed: u64) -> [u64; 6] {
    let mut rng = StdRng::seed_from_u64(seed);
    [(); 6].map(|_| rng.next_u64())
}

/// A bank of noise generators with a selectable output.
///
/// Only the selected generator advances; the others keep their state until
/// they are selected again.
///
/// # Examples
///
/// ```
/// use wellenform::{Noise, NoiseType, Signal};
///
/// let mut noise = Noise::<48000>::with_seed(42);
/// noise.set_type(NoiseType::Pink);
/// noise.set_amplitude(0.25);
///
/// let mut block = [0.0; 256];
/// noise.process(&mut block);
/// ```
pub struct Noise<const SAMPLE_RATE: u32> {
    noise_type: NoiseType,
    amplitude: f64,
    white: WhiteNoise<SAMPLE_RATE>,
    white_fast: FastWhiteNoise<SAMPLE_RATE>,
    gaussian: GaussianNoise<SAMPLE_RATE>,
    gaussian_fast: FastGaussianNoise<SAMPLE_RATE>,
    pink: PinkNoise<SAMPLE_RATE>,
    simplex: SimplexNoise<SAMPLE_RATE>,
}

impl<const SAMPLE_RATE: u32> Noise<SAMPLE_RATE> {
    /// Creates a white noise bank seeded from system entropy.
    ///
    /// The simplex generator uses its default seed.
    pub fn new() -> Self {
        Self {
            noise_type: NoiseType::default(),
            amplitude: 1.0,
            white: WhiteNoise::new(),
            white_fast: FastWhiteNoise::new(),
            gaussian: GaussianNoise::new(),
            gaussian_fast: FastGaussianNoise::new(),
            pink: PinkNoise::new(),
            simplex: SimplexNoise::default(),
        }
    }

    /// Creates a reproducible bank. Each generator gets its own seed derived
    /// from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        let [white, white_fast, gaussian, gaussian_fast, pink, simplex] = derive_seeds(seed);
        Self {
            noise_type: NoiseType::default(),
            amplitude: 1.0,
            white: WhiteNoise::with_seed(white),
            white_fast: FastWhiteNoise::with_seed(white_fast),
            gaussian: GaussianNoise::with_seed(gaussian),
            gaussian_fast: FastGaussianNoise::with_seed(gaussian_fast),
            pink: PinkNoise::with_seed(pink),
            simplex: SimplexNoise::new(simplex),
        }
    }

    /// Builder-style method to select the noise type.
    pub fn with_type(mut self, noise_type: NoiseType) -> Self {
        self.set_type(noise_type);
        self
    }

    pub fn noise_type(&self) -> NoiseType {
        self.noise_type
    }

    pub fn set_type(&mut self, noise_type: NoiseType) {
        if self.noise_type != noise_type {
            debug!(from = ?self.noise_type, to = ?noise_type, "noise type changed");
            self.noise_type = noise_type;
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude;
    }

    /// Gives access to the pink generator, e.g. to change its scale.
    pub fn pink_mut(&mut self) -> &mut PinkNoise<SAMPLE_RATE> {
        &mut self.pink
    }

    /// Gives access to the simplex generator, e.g. to change its step.
    pub fn simplex_mut(&mut self) -> &mut SimplexNoise<SAMPLE_RATE> {
        &mut self.simplex
    }
}

impl<const SAMPLE_RATE: u32> Default for Noise<SAMPLE_RATE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SAMPLE_RATE: u32> Signal for Noise<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        let sample = match self.noise_type {
            NoiseType::White => self.white.next_sample(),
            NoiseType::WhiteFast => self.white_fast.next_sample(),
            NoiseType::Gaussian => self.gaussian.next_sample(),
            NoiseType::GaussianFast => self.gaussian_fast.next_sample(),
            NoiseType::Pink => self.pink.next_sample(),
            NoiseType::Simplex => self.simplex.next_sample(),
        };
        sample * self.amplitude
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for Noise<SAMPLE_RATE> {}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 48000;

    /// A standalone generator seeded the same way the bank seeds `noise_type`.
    fn reference(noise_type: NoiseType, seed: u64) -> Box<dyn Signal> {
        let seeds = derive_seeds(seed);
        let index = NoiseType::ALL
            .iter()
            .position(|&t| t == noise_type)
            .unwrap();
        let seed = seeds[index];
        match noise_type {
            NoiseType::White => Box::new(WhiteNoise::<SAMPLE_RATE>::with_seed(seed)),
            NoiseType::WhiteFast => Box::new(FastWhiteNoise::<SAMPLE_RATE>::with_seed(seed)),
            NoiseType::Gaussian => Box::new(GaussianNoise::<SAMPLE_RATE>::with_seed(seed)),
            NoiseType::GaussianFast => {
                Box::new(FastGaussianNoise::<SAMPLE_RATE>::with_seed(seed))
            }
            NoiseType::Pink => Box::new(PinkNoise::<SAMPLE_RATE>::with_seed(seed)),
            NoiseType::Simplex => Box::new(SimplexNoise::<SAMPLE_RATE>::new(seed)),
        }
    }

    #[test]
    fn test_defaults() {
        let noise = Noise::<SAMPLE_RATE>::new();
        assert_eq!(noise.noise_type(), NoiseType::White);
        assert_eq!(noise.amplitude(), 1.0);
    }

    #[test]
    fn test_output_matches_selected_generator() {
        for noise_type in NoiseType::ALL {
            let mut bank = Noise::<SAMPLE_RATE>::with_seed(2024).with_type(noise_type);
            bank.set_amplitude(0.5);
            let mut generator = reference(noise_type, 2024);
            for _ in 0..500 {
                assert_eq!(bank.next_sample(), generator.next_sample() * 0.5, "{noise_type:?}");
            }
        }
    }

    #[test]
    fn test_unselected_generators_do_not_advance() {
        let mut bank = Noise::<SAMPLE_RATE>::with_seed(5).with_type(NoiseType::Pink);
        for _ in 0..100 {
            bank.next_sample();
        }
        bank.set_type(NoiseType::White);
        let mut white = reference(NoiseType::White, 5);
        assert_eq!(bank.next_sample(), white.next_sample());
    }

    #[test]
    fn test_derived_seeds_are_distinct() {
        let seeds = derive_seeds(0);
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_zero_amplitude_silences() {
        let mut bank = Noise::<SAMPLE_RATE>::with_seed(1).with_type(NoiseType::GaussianFast);
        bank.set_amplitude(0.0);
        assert_eq!(bank.next_sample(), 0.0);
    }
}
