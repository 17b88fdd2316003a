//! Peak envelope follower with separate attack and release times.

use crate::Processor;

const DEFAULT_ATTACK_TIME: f64 = 0.01;
const DEFAULT_RELEASE_TIME: f64 = 0.1;

/// One-pole smoothing coefficient for a time constant in seconds.
fn coefficient(time: f64, sample_rate: f64) -> f64 {
    (-1.0 / (time * sample_rate)).exp()
}

/// Tracks the amplitude envelope of a signal.
///
/// Rising magnitudes are followed with the attack time constant, falling ones
/// with the release time constant.
///
/// # Examples
///
/// ```
/// use wellenform::{EnvelopeFollower, Processor};
///
/// let mut follower = EnvelopeFollower::<48000>::new(0.001, 0.2);
/// for _ in 0..4800 {
///     follower.process_sample(0.9);
/// }
/// assert!((follower.current() - 0.9).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower<const SAMPLE_RATE: u32> {
    attack_time: f64,
    release_time: f64,
    attack_coefficient: f64,
    release_coefficient: f64,
    envelope: f64,
}

impl<const SAMPLE_RATE: u32> EnvelopeFollower<SAMPLE_RATE> {
    /// Creates a follower with attack and release time constants in seconds.
    pub fn new(attack_time: f64, release_time: f64) -> Self {
        let mut follower = Self {
            attack_time,
            release_time,
            attack_coefficient: 0.0,
            release_coefficient: 0.0,
            envelope: 0.0,
        };
        follower.set_attack_time(attack_time);
        follower.set_release_time(release_time);
        follower
    }

    pub fn attack_time(&self) -> f64 {
        self.attack_time
    }

    pub fn set_attack_time(&mut self, attack_time: f64) {
        self.attack_time = attack_time;
        self.attack_coefficient = coefficient(attack_time, SAMPLE_RATE as f64);
    }

    pub fn release_time(&self) -> f64 {
        self.release_time
    }

    pub fn set_release_time(&mut self, release_time: f64) {
        self.release_time = release_time;
        self.release_coefficient = coefficient(release_time, SAMPLE_RATE as f64);
    }

    /// Gets the current envelope level.
    pub fn current(&self) -> f64 {
        self.envelope
    }

    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

impl<const SAMPLE_RATE: u32> Default for EnvelopeFollower<SAMPLE_RATE> {
    /// 10 ms attack, 100 ms release.
    fn default() -> Self {
        Self::new(DEFAULT_ATTACK_TIME, DEFAULT_RELEASE_TIME)
    }
}

impl<const SAMPLE_RATE: u32> Processor for EnvelopeFollower<SAMPLE_RATE> {
    fn process_sample(&mut self, input: f64) -> f64 {
        let magnitude = input.abs();
        let coefficient = if magnitude > self.envelope {
            self.attack_coefficient
        } else {
            self.release_coefficient
        };
        self.envelope = coefficient * (self.envelope - magnitude) + magnitude;
        self.envelope
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 1000;

    #[test]
    fn test_coefficients() {
        let follower = EnvelopeFollower::<SAMPLE_RATE>::new(0.01, 0.1);
        assert!((follower.attack_coefficient - (-0.1_f64).exp()).abs() < 1e-12);
        assert!((follower.release_coefficient - (-0.01_f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_attack_faster_than_release() {
        let mut follower = EnvelopeFollower::<SAMPLE_RATE>::default();

        // One attack time constant reaches 1 - 1/e of the step
        for _ in 0..10 {
            follower.process_sample(1.0);
        }
        let attacked = follower.current();
        assert!((attacked - (1.0 - (-1.0_f64).exp())).abs() < 1e-9);

        for _ in 0..1000 {
            follower.process_sample(1.0);
        }
        for _ in 0..10 {
            follower.process_sample(0.0);
        }
        // Release over the same time only drops by about 10%
        assert!(follower.current() > 0.9);
    }

    #[test]
    fn test_rectifies_input() {
        let mut follower = EnvelopeFollower::<SAMPLE_RATE>::new(0.001, 0.001);
        for _ in 0..100 {
            follower.process_sample(-0.5);
        }
        assert!((follower.current() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_retune_and_reset() {
        let mut follower = EnvelopeFollower::<SAMPLE_RATE>::default();
        follower.set_attack_time(0.5);
        follower.set_release_time(2.0);
        assert_eq!(follower.attack_time(), 0.5);
        assert_eq!(follower.release_time(), 2.0);

        follower.process_sample(1.0);
        follower.reset();
        assert_eq!(follower.current(), 0.0);
    }
}
