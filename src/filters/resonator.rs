//! Two-pole resonant band-pass filter.
//!
//! Uses Robert Bristow-Johnson's Audio EQ Cookbook band-pass with a constant
//! 0 dB peak gain, so a sine at the center frequency passes at unit level while
//! everything else is attenuated according to Q.

use crate::Processor;
use crate::core::Pitched;
use std::f64::consts::TAU;

/// A resonant band-pass filter.
///
/// # Examples
///
/// ```
/// use wellenform::{Processor, Resonator};
///
/// let mut resonator = Resonator::<48000>::new(440.0, 8.0);
/// let ring = resonator.process_sample(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Resonator<const SAMPLE_RATE: u32> {
    frequency: f64,
    q: f64,

    // Filter state variables (previous samples)
    x1: f64, // Input at t-1
    x2: f64, // Input at t-2
    y1: f64, // Output at t-1
    y2: f64, // Output at t-2

    // Normalized coefficients; b1 is always zero for this band-pass
    b0: f64,
    b2: f64,
    a1: f64,
    a2: f64,

    needs_coefficient_update: bool,
}

impl<const SAMPLE_RATE: u32> Resonator<SAMPLE_RATE> {
    /// Creates a new resonator.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Center frequency in Hz
    /// * `q` - Quality factor; higher values give a narrower, longer ringing peak
    pub fn new(frequency: f64, q: f64) -> Self {
        let mut resonator = Self {
            frequency,
            q,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            b0: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            needs_coefficient_update: true,
        };
        resonator.update_coefficients();
        resonator
    }

    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn set_q(&mut self, q: f64) {
        if self.q != q {
            self.q = q;
            self.needs_coefficient_update = true;
        }
    }

    /// Clears the filter history.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    fn update_coefficients(&mut self) {
        let sample_rate = SAMPLE_RATE as f64;
        // Clamp frequency to valid range (avoid nyquist issues)
        let frequency = self.frequency.clamp(1.0, sample_rate * 0.49);
        let q = self.q.max(0.001); // Prevent division by zero

        let omega = TAU * frequency / sample_rate;
        let alpha = omega.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;

        self.b0 = alpha / a0;
        self.b2 = -alpha / a0;
        self.a1 = -2.0 * omega.cos() / a0;
        self.a2 = (1.0 - alpha) / a0;

        self.needs_coefficient_update = false;
    }
}

impl<const SAMPLE_RATE: u32> Default for Resonator<SAMPLE_RATE> {
    /// 440 Hz with Q of 1.
    fn default() -> Self {
        Self::new(440.0, 1.0)
    }
}

impl<const SAMPLE_RATE: u32> Processor for Resonator<SAMPLE_RATE> {
    fn process_sample(&mut self, input: f64) -> f64 {
        if self.needs_coefficient_update {
            self.update_coefficients();
        }

        // Direct Form I
        let output = self.b0 * input + self.b2 * self.x2 - self.a1 * self.y1 - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }
}

impl<const SAMPLE_RATE: u32> Pitched for Resonator<SAMPLE_RATE> {
    fn set_frequency(&mut self, frequency: f64) {
        if self.frequency != frequency {
            self.frequency = frequency;
            self.needs_coefficient_update = true;
        }
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 48000;

    /// Peak output level for a unit sine at `frequency` after settling.
    fn steady_peak(resonator: &mut Resonator<SAMPLE_RATE>, frequency: f64) -> f64 {
        let step = TAU * frequency / SAMPLE_RATE as f64;
        let mut peak = 0.0_f64;
        for i in 0..48000 {
            let out = resonator.process_sample((step * i as f64).sin());
            if i >= 24000 {
                peak = peak.max(out.abs());
            }
        }
        peak
    }

    #[test]
    fn test_defaults() {
        let resonator = Resonator::<SAMPLE_RATE>::default();
        assert_eq!(resonator.frequency(), 440.0);
        assert_eq!(resonator.q(), 1.0);
    }

    #[test]
    fn test_unit_gain_at_center() {
        let mut resonator = Resonator::<SAMPLE_RATE>::new(1000.0, 4.0);
        let peak = steady_peak(&mut resonator, 1000.0);
        assert!((peak - 1.0).abs() < 0.01, "{peak}");
    }

    #[test]
    fn test_attenuates_away_from_center() {
        let mut resonator = Resonator::<SAMPLE_RATE>::new(1000.0, 10.0);
        let below = steady_peak(&mut resonator, 100.0);
        resonator.reset();
        let above = steady_peak(&mut resonator, 10000.0);
        assert!(below < 0.05, "{below}");
        assert!(above < 0.05, "{above}");
    }

    #[test]
    fn test_blocks_dc() {
        let mut resonator = Resonator::<SAMPLE_RATE>::default();
        let mut out = 1.0;
        for _ in 0..48000 {
            out = resonator.process_sample(1.0);
        }
        assert!(out.abs() < 1e-6, "{out}");
    }

    #[test]
    fn test_retune() {
        let mut resonator = Resonator::<SAMPLE_RATE>::new(500.0, 4.0);
        resonator.set_frequency(2000.0);
        resonator.set_q(4.0);
        assert!(resonator.needs_coefficient_update);
        let peak = steady_peak(&mut resonator, 2000.0);
        assert!((peak - 1.0).abs() < 0.01, "{peak}");
    }

    #[test]
    fn test_reset_clears_history() {
        let mut resonator = Resonator::<SAMPLE_RATE>::default();
        for _ in 0..100 {
            resonator.process_sample(1.0);
        }
        resonator.reset();
        assert_eq!(resonator.process_sample(0.0), 0.0);
    }
}
