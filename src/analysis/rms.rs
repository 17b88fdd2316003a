//! Windowed root-mean-square level.

use crate::Processor;

const DEFAULT_WINDOW_SIZE: usize = 16;

/// Root-mean-square level over a sliding window of recent samples.
///
/// Keeps a ring buffer of the last `window_size` inputs and a running sum of
/// their squares, so each sample costs O(1).
///
/// # Examples
///
/// ```
/// use wellenform::{Processor, RootMeanSquare};
///
/// let mut rms = RootMeanSquare::new(4);
/// for _ in 0..4 {
///     rms.process_sample(-0.5);
/// }
/// assert!((rms.current() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct RootMeanSquare {
    window: Vec<f64>,
    index: usize,
    sum: f64,
    rms: f64,
}

impl RootMeanSquare {
    /// Creates a detector averaging over `window_size` samples (at least 1).
    pub fn new(window_size: usize) -> Self {
        Self {
            window: vec![0.0; window_size.max(1)],
            index: 0,
            sum: 0.0,
            rms: 0.0,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    /// Gets the most recent RMS value.
    pub fn current(&self) -> f64 {
        self.rms
    }

    /// Clears the window.
    pub fn reset(&mut self) {
        self.window.fill(0.0);
        self.index = 0;
        self.sum = 0.0;
        self.rms = 0.0;
    }
}

impl Default for RootMeanSquare {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl Processor for RootMeanSquare {
    fn process_sample(&mut self, input: f64) -> f64 {
        let oldest = self.window[self.index];
        self.sum -= oldest * oldest;
        self.window[self.index] = input;
        self.index = (self.index + 1) % self.window.len();
        self.sum += input * input;

        // The running sum can drift slightly below zero
        self.rms = if self.sum > 0.0 {
            (self.sum / self.window.len() as f64).sqrt()
        } else {
            0.0
        };
        self.rms
    }
}
