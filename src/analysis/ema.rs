//! Exponential moving average of the rectified signal.

use crate::Processor;

/// Exponential moving average of `|input|`.
///
/// The first sample initializes the average directly; after that each sample
/// moves it by `alpha` towards the new magnitude.
///
/// # Examples
///
/// ```
/// use wellenform::{ExponentialMovingAverage, Processor};
///
/// let mut ema = ExponentialMovingAverage::new(0.5);
/// assert_eq!(ema.process_sample(-1.0), 1.0);
/// assert_eq!(ema.process_sample(0.0), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct ExponentialMovingAverage {
    alpha: f64,
    ema: f64,
    initialized: bool,
}

impl ExponentialMovingAverage {
    /// Creates an average with smoothing factor `alpha` (0.0 to 1.0). Larger
    /// values follow the input faster.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ema: 0.0,
            initialized: false,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    /// Gets the current average.
    pub fn current(&self) -> f64 {
        self.ema
    }

    /// Forgets the history; the next sample initializes the average again.
    pub fn reset(&mut self) {
        self.ema = 0.0;
        self.initialized = false;
    }
}

impl Processor for ExponentialMovingAverage {
    fn process_sample(&mut self, input: f64) -> f64 {
        let magnitude = input.abs();
        if self.initialized {
            self.ema = self.alpha * magnitude + (1.0 - self.alpha) * self.ema;
        } else {
            self.ema = magnitude;
            self.initialized = true;
        }
        self.ema
    }
}
