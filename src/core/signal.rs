//! Core signal processing traits.
//!
//! This module provides the fundamental traits shared by every component:
//! `Signal` for sources that generate samples, `Processor` for units that
//! transform samples in place, and `Pitched` for anything with a tunable
//! frequency.

/// Common interface for all signal sources.
///
/// This trait defines the core functionality for anything that can generate
/// audio samples: oscillators, envelopes, noise generators, etc.
///
/// The trait provides two fundamental operations:
/// - Single sample generation via `next_sample()`
/// - Batch processing via `process()`, which overwrites the buffer
pub trait Signal {
    /// Advances the signal by one sample and returns the output.
    ///
    /// # Returns
    ///
    /// A sample value, typically between -1.0 and 1.0 for audio signals
    fn next_sample(&mut self) -> f64;

    /// Generates multiple samples into a buffer.
    ///
    /// Default implementation calls `next_sample()` for each element.
    /// Implementors may override this for more efficient batch processing.
    ///
    /// # Arguments
    ///
    /// * `buffer` - Mutable slice to fill with samples
    fn process(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

/// Implementation of `Signal` for `f64` representing a constant signal value.
///
/// # Examples
///
/// ```
/// use wellenform::Signal;
///
/// let mut constant = 0.5_f64;
/// assert_eq!(constant.next_sample(), 0.5);
///
/// let mut buffer = vec![0.0; 4];
/// constant.process(&mut buffer);
/// assert_eq!(buffer, vec![0.5, 0.5, 0.5, 0.5]);
/// ```
impl Signal for f64 {
    fn next_sample(&mut self) -> f64 {
        *self
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(*self);
    }
}

/// Common interface for units that transform an incoming signal.
///
/// Filters, envelopes used as amplifiers and level detectors implement this
/// trait. Each call advances the processor's internal state by exactly one
/// sample.
pub trait Processor {
    /// Processes a single input sample and returns the output sample.
    fn process_sample(&mut self, input: f64) -> f64;

    /// Processes a buffer in place.
    ///
    /// Default implementation calls `process_sample()` for each element.
    fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}

/// Minimal trait for anything with a controllable pitch.
///
/// # Examples
///
/// ```
/// use wellenform::{Pitched, Wavetable};
///
/// let mut osc = Wavetable::<48000>::sine(512);
/// osc.set_frequency(880.0);
/// assert_eq!(osc.frequency(), 880.0);
/// ```
pub trait Pitched {
    /// Sets the frequency in Hz.
    fn set_frequency(&mut self, frequency: f64);

    /// Gets the current frequency in Hz.
    fn frequency(&self) -> f64;
}

/// A constant signal that always returns the same value.
///
/// This is a lightweight wrapper around `f64` that also carries a sample rate,
/// useful as a DC source when composing sample-rate-aware chains.
///
/// # Examples
///
/// ```
/// use wellenform::{ConstantSignal, Signal};
///
/// let mut dc = ConstantSignal::<48000>(0.25);
/// assert_eq!(dc.next_sample(), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSignal<const SAMPLE_RATE: u32>(pub f64);

impl<const SAMPLE_RATE: u32> Signal for ConstantSignal<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        self.0
    }

    fn process(&mut self, buffer: &mut [f64]) {
        buffer.fill(self.0);
    }
}

impl<const SAMPLE_RATE: u32> From<f64> for ConstantSignal<SAMPLE_RATE> {
    fn from(value: f64) -> Self {
        ConstantSignal::<SAMPLE_RATE>(value)
    }
}

impl<const SAMPLE_RATE: u32> crate::AudioSignal<SAMPLE_RATE> for ConstantSignal<SAMPLE_RATE> {}
