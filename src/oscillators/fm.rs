//! Two-operator frequency modulation.

use super::Wavetable;
use super::wavetable::InterpolationMode;
use crate::{AudioSignal, Signal};
use std::f64::consts::TAU;

/// Two-operator FM voice built from a carrier and a modulator wavetable.
///
/// Each sample advances both oscillators and returns
/// `amplitude * sin(2π * carrier + depth * sin(2π * modulator))`.
///
/// # Examples
///
/// ```
/// use wellenform::{FmSynth, Pitched, Signal};
///
/// let mut fm = FmSynth::<48000>::new(512);
/// fm.carrier_mut().set_frequency(0.5);
/// fm.modulator_mut().set_frequency(3.0);
/// fm.set_modulation_depth(2.0);
///
/// let mut block = [0.0; 128];
/// fm.process(&mut block);
/// assert!(block.iter().all(|s| s.abs() <= 1.0));
/// ```
#[derive(Debug)]
pub struct FmSynth<'a, const SAMPLE_RATE: u32> {
    carrier: Wavetable<'a, SAMPLE_RATE>,
    modulator: Wavetable<'a, SAMPLE_RATE>,
    amplitude: f64,
    modulation_depth: f64,
}

impl<'a, const SAMPLE_RATE: u32> FmSynth<'a, SAMPLE_RATE> {
    /// Creates a voice with sine carrier and modulator tables of `table_size`
    /// samples, both using linear interpolation.
    ///
    /// # Panics
    ///
    /// Panics if `table_size` is zero.
    pub fn new(table_size: usize) -> Self {
        let carrier = Wavetable::sine(table_size).with_interpolation(InterpolationMode::Linear);
        let modulator = Wavetable::sine(table_size).with_interpolation(InterpolationMode::Linear);
        Self::from_parts(carrier, modulator)
    }

    /// Creates a voice from caller-configured oscillators.
    pub fn from_parts(
        carrier: Wavetable<'a, SAMPLE_RATE>,
        modulator: Wavetable<'a, SAMPLE_RATE>,
    ) -> Self {
        Self {
            carrier,
            modulator,
            amplitude: 1.0,
            modulation_depth: 1.0,
        }
    }

    pub fn carrier(&self) -> &Wavetable<'a, SAMPLE_RATE> {
        &self.carrier
    }

    pub fn carrier_mut(&mut self) -> &mut Wavetable<'a, SAMPLE_RATE> {
        &mut self.carrier
    }

    pub fn modulator(&self) -> &Wavetable<'a, SAMPLE_RATE> {
        &self.modulator
    }

    pub fn modulator_mut(&mut self) -> &mut Wavetable<'a, SAMPLE_RATE> {
        &mut self.modulator
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude;
    }

    pub fn modulation_depth(&self) -> f64 {
        self.modulation_depth
    }

    pub fn set_modulation_depth(&mut self, depth: f64) {
        self.modulation_depth = depth;
    }
}

impl<const SAMPLE_RATE: u32> Signal for FmSynth<'_, SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        let carrier = self.carrier.next_sample();
        let modulator = self.modulator.next_sample();
        self.amplitude * (TAU * carrier + self.modulation_depth * (TAU * modulator).sin()).sin()
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for FmSynth<'_, SAMPLE_RATE> {}
