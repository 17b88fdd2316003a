//! Oscillator that evaluates its waveform directly instead of reading a table.

use super::Oscillator;
use super::waveforms::Waveform;
use crate::core::Pitched;
use crate::{AudioSignal, Signal};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

const DEFAULT_AMPLITUDE: f64 = 0.75;
const DEFAULT_FREQUENCY: f64 = 220.0;

/// A function oscillator.
///
/// Sine is integrated in radians. Triangle, sawtooth and square accumulate the
/// frequency once per sample and wrap at the sample rate, so one full cycle of
/// the phase is `SAMPLE_RATE` units long. Noise ignores the phase.
///
/// # Examples
///
/// ```
/// use wellenform::{FunctionOscillator, Pitched, Signal, Waveform};
///
/// let mut osc = FunctionOscillator::<48000>::new(Waveform::Square);
/// osc.set_frequency(100.0);
/// osc.set_amplitude(1.0);
/// let sample = osc.next_sample();
/// assert_eq!(sample, -1.0);
/// ```
#[derive(Debug, Clone)]
pub struct FunctionOscillator<const SAMPLE_RATE: u32> {
    waveform: Waveform,
    frequency: f64,
    /// Phase increment in radians, used by the sine
    step: f64,
    phase: f64,
    amplitude: f64,
    offset: f64,
    rng: SmallRng,
}

impl<const SAMPLE_RATE: u32> FunctionOscillator<SAMPLE_RATE> {
    /// Creates an oscillator at 220 Hz with amplitude 0.75.
    pub fn new(waveform: Waveform) -> Self {
        let mut osc = Self {
            waveform,
            frequency: 0.0,
            step: 0.0,
            phase: 0.0,
            amplitude: DEFAULT_AMPLITUDE,
            offset: 0.0,
            rng: SmallRng::from_entropy(),
        };
        osc.set_frequency(DEFAULT_FREQUENCY);
        osc
    }

    /// Reseeds the noise generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Gets the waveform.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Switches the waveform and restarts the phase.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        if self.waveform != waveform {
            self.waveform = waveform;
            self.phase = 0.0;
        }
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude;
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    #[inline]
    fn advance_cycle(&mut self) -> f64 {
        self.phase = (self.phase + self.frequency).rem_euclid(SAMPLE_RATE as f64);
        self.phase
    }

    #[inline]
    fn sine(&mut self) -> f64 {
        self.phase += self.step;
        if !(0.0..TAU).contains(&self.phase) {
            self.phase = self.phase.rem_euclid(TAU);
            // -tiny + TAU can round up to exactly TAU
            if self.phase >= TAU {
                self.phase = 0.0;
            }
        }
        self.phase.sin()
    }

    #[inline]
    fn triangle(&mut self) -> f64 {
        let quarter = SAMPLE_RATE as f64 / 4.0;
        let phase = self.advance_cycle();
        ((phase - 2.0 * quarter).abs() - quarter) / quarter
    }

    #[inline]
    fn sawtooth(&mut self) -> f64 {
        let phase = self.advance_cycle();
        phase / (SAMPLE_RATE as f64 / 2.0) - 1.0
    }

    #[inline]
    fn square(&mut self) -> f64 {
        let phase = self.advance_cycle();
        if phase > SAMPLE_RATE as f64 / 2.0 {
            1.0
        } else {
            -1.0
        }
    }
}

impl<const SAMPLE_RATE: u32> Default for FunctionOscillator<SAMPLE_RATE> {
    fn default() -> Self {
        Self::new(Waveform::Sine)
    }
}

impl<const SAMPLE_RATE: u32> Signal for FunctionOscillator<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        let sample = match self.waveform {
            Waveform::Sine => self.sine(),
            Waveform::Triangle => self.triangle(),
            Waveform::Sawtooth => self.sawtooth(),
            Waveform::Square => self.square(),
            Waveform::Noise => self.rng.gen_range(-1.0..1.0),
        };
        sample * self.amplitude + self.offset
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for FunctionOscillator<SAMPLE_RATE> {}

impl<const SAMPLE_RATE: u32> Pitched for FunctionOscillator<SAMPLE_RATE> {
    fn set_frequency(&mut self, frequency: f64) {
        if self.frequency != frequency {
            self.frequency = frequency;
            self.step = frequency * TAU / SAMPLE_RATE as f64;
        }
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl<const SAMPLE_RATE: u32> Oscillator for FunctionOscillator<SAMPLE_RATE> {
    fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn unit<const SR: u32>(waveform: Waveform, frequency: f64) -> FunctionOscillator<SR> {
        let mut osc = FunctionOscillator::<SR>::new(waveform).with_seed(1);
        osc.set_amplitude(1.0);
        osc.set_frequency(frequency);
        osc
    }

    #[test]
    fn test_defaults() {
        let osc = FunctionOscillator::<48000>::default();
        assert_eq!(osc.waveform(), Waveform::Sine);
        assert_eq!(osc.frequency(), DEFAULT_FREQUENCY);
        assert_eq!(osc.amplitude(), DEFAULT_AMPLITUDE);
    }

    #[test]
    fn test_sine_quarter_cycle() {
        // 4 samples per cycle: first sample is already a quarter turn in
        let mut osc = unit::<400>(Waveform::Sine, 100.0);
        assert!((osc.next_sample() - 1.0).abs() < EPSILON);
        assert!(osc.next_sample().abs() < EPSILON);
        assert!((osc.next_sample() + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_sawtooth_rises() {
        let mut osc = unit::<400>(Waveform::Sawtooth, 100.0);
        let samples: Vec<f64> = (0..4).map(|_| osc.next_sample()).collect();
        assert_eq!(samples, vec![-0.5, 0.0, 0.5, -1.0]);
    }

    #[test]
    fn test_triangle_shape() {
        let mut osc = unit::<400>(Waveform::Triangle, 100.0);
        let samples: Vec<f64> = (0..4).map(|_| osc.next_sample()).collect();
        assert_eq!(samples, vec![0.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_square_levels() {
        let mut osc = unit::<400>(Waveform::Square, 50.0);
        let samples: Vec<f64> = (0..8).map(|_| osc.next_sample()).collect();
        assert_eq!(samples, vec![-1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_negative_frequency_stays_bounded() {
        for waveform in [Waveform::Triangle, Waveform::Sawtooth, Waveform::Square] {
            let mut osc = unit::<48000>(waveform, -733.0);
            for _ in 0..48000 {
                let s = osc.next_sample();
                assert!((-1.0..=1.0).contains(&s), "{waveform:?}: {s}");
            }
        }
    }

    #[test]
    fn test_negative_frequency_sine_wraps_phase() {
        let mut forward = unit::<48000>(Waveform::Sine, 733.0);
        let mut backward = unit::<48000>(Waveform::Sine, -733.0);
        for _ in 0..48000 {
            let f = forward.next_sample();
            let b = backward.next_sample();
            assert!((0.0..TAU).contains(&backward.phase), "{}", backward.phase);
            assert!((f + b).abs() < 1e-9, "{f} vs {b}");
        }
    }

    #[test]
    fn test_noise_range() {
        let mut osc = unit::<48000>(Waveform::Noise, 0.0);
        for _ in 0..10000 {
            assert!((-1.0..1.0).contains(&osc.next_sample()));
        }
    }

    #[test]
    fn test_amplitude_and_offset() {
        let mut osc = unit::<400>(Waveform::Square, 50.0);
        osc.set_amplitude(0.5);
        osc.set_offset(0.5);
        assert_eq!(osc.next_sample(), 0.0);
    }

    #[test]
    fn test_set_waveform_restarts_phase() {
        let mut osc = unit::<400>(Waveform::Sawtooth, 100.0);
        osc.next_sample();
        osc.set_waveform(Waveform::Triangle);
        assert_eq!(osc.next_sample(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut osc = unit::<400>(Waveform::Sawtooth, 100.0);
        osc.next_sample();
        osc.next_sample();
        osc.reset();
        assert_eq!(osc.next_sample(), -0.5);
    }
}
