//! Four-pole nonlinear ladder low-pass filter.
//!
//! A digital model of the Moog transistor ladder after Antti Huovilainen's
//! design, in the formulation used by Csound and soundpipe (Victor Lazzarini,
//! John ffitch). Each input sample runs through the ladder twice. The second
//! pass is fed from the third stage of the first, not from the input again.

use crate::core::Pitched;
use crate::Processor;
use std::f64::consts::TAU;

/// Thermal voltage scaling of the transistor stages.
const THERMAL: f64 = 0.000025;

/// Saturation curve of a ladder stage.
///
/// Odd symmetric, linear below 0.5 and fully saturated from 4.0 on.
#[inline]
fn fast_tanh(x: f64) -> f64 {
    let magnitude = x.abs();
    if magnitude < 0.5 {
        x
    } else if magnitude >= 4.0 {
        x.signum()
    } else {
        x.tanh()
    }
}

/// Nonlinear four-pole low-pass filter.
///
/// Resonance is nominally in `[0, 1)`. Negative values are treated as zero;
/// values approaching 1.0 make the feedback loop self-oscillate and are not
/// guarded against.
///
/// # Examples
///
/// ```
/// use wellenform::{MoogLadder, Pitched, Processor};
///
/// let mut filter = MoogLadder::<48000>::new(1200.0, 0.2);
/// let mut buffer = [1.0, 0.0, 0.0, 0.0];
/// filter.process_buffer(&mut buffer);
///
/// // Sweep the cutoff; coefficients are recomputed on the next sample.
/// filter.set_frequency(300.0);
/// let out = filter.process_sample(0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MoogLadder<const SAMPLE_RATE: u32> {
    frequency: f64,
    resonance: f64,

    // Filter state
    delay: [f64; 6],
    tanh_stage: [f64; 3],

    // Cached coefficients
    acr: f64,
    tune: f64,

    needs_coefficient_update: bool,
}

impl<const SAMPLE_RATE: u32> MoogLadder<SAMPLE_RATE> {
    /// Creates a new ladder filter.
    ///
    /// # Arguments
    ///
    /// * `frequency` - Cutoff frequency in Hz
    /// * `resonance` - Feedback amount, nominally 0.0 to just below 1.0
    pub fn new(frequency: f64, resonance: f64) -> Self {
        Self {
            frequency,
            resonance,
            delay: [0.0; 6],
            tanh_stage: [0.0; 3],
            acr: 0.0,
            tune: 0.0,
            needs_coefficient_update: true,
        }
    }

    pub fn resonance(&self) -> f64 {
        self.resonance
    }

    /// Sets the resonance. Coefficients are only invalidated if the value
    /// changed.
    pub fn set_resonance(&mut self, resonance: f64) {
        if self.resonance != resonance {
            self.resonance = resonance;
            self.needs_coefficient_update = true;
        }
    }

    /// Clears the delay lines and saturation state.
    pub fn reset(&mut self) {
        self.delay = [0.0; 6];
        self.tanh_stage = [0.0; 3];
    }

    fn update_coefficients(&mut self) {
        let fc = self.frequency / SAMPLE_RATE as f64;
        let f = 0.5 * fc;
        let fc2 = fc * fc;
        let fc3 = fc2 * fc2;

        let fcr = 1.8730 * fc3 + 0.4955 * fc2 - 0.6490 * fc + 0.9988;
        self.acr = -3.9364 * fc2 + 1.8409 * fc + 0.9968;
        self.tune = (1.0 - (-(TAU * f * fcr)).exp()) / THERMAL;

        self.needs_coefficient_update = false;
    }
}

impl<const SAMPLE_RATE: u32> Default for MoogLadder<SAMPLE_RATE> {
    /// 1 kHz cutoff with resonance 0.4.
    fn default() -> Self {
        Self::new(1000.0, 0.4)
    }
}

impl<const SAMPLE_RATE: u32> Processor for MoogLadder<SAMPLE_RATE> {
    fn process_sample(&mut self, input: f64) -> f64 {
        if self.needs_coefficient_update {
            self.update_coefficients();
        }

        let res4 = 4.0 * self.resonance.max(0.0) * self.acr;
        let tune = self.tune;
        let mut stage = [0.0; 4];
        let mut signal = input;

        // The second pass continues from the third stage of the first one
        for _ in 0..2 {
            signal -= res4 * self.delay[5];
            stage[0] = self.delay[0] + tune * (fast_tanh(signal * THERMAL) - self.tanh_stage[0]);
            self.delay[0] = stage[0];

            for k in 1..4 {
                signal = stage[k - 1];
                self.tanh_stage[k - 1] = fast_tanh(signal * THERMAL);
                let previous = if k != 3 {
                    self.tanh_stage[k]
                } else {
                    fast_tanh(self.delay[k] * THERMAL)
                };
                stage[k] = self.delay[k] + tune * (self.tanh_stage[k - 1] - previous);
                self.delay[k] = stage[k];
            }

            // Half-sample averaging of the output stage
            self.delay[5] = (stage[3] + self.delay[4]) * 0.5;
            self.delay[4] = stage[3];
        }

        self.delay[5]
    }
}

impl<const SAMPLE_RATE: u32> Pitched for MoogLadder<SAMPLE_RATE> {
    /// Sets the cutoff frequency in Hz. Coefficients are only invalidated if
    /// the value changed.
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
