//! ADSR (Attack, Decay, Sustain, Release) envelope generator.

use super::Envelope;
use crate::{AudioSignal, Processor, Signal};
use crate::{DEFAULT_ATTACK, DEFAULT_DECAY, DEFAULT_RELEASE, DEFAULT_SUSTAIN};
use tracing::debug;

/// Duration of the fade used by [`RetriggerMode::FadeToZero`], in seconds.
const FADE_TO_ZERO_TIME: f64 = 0.01;

/// State of the ADSR envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeState {
    /// Envelope is not active
    #[default]
    Idle,
    /// Ramping from the current level to peak (1.0)
    Attack,
    /// Ramping from peak to sustain level
    Decay,
    /// Holding at sustain level
    Sustain,
    /// Ramping from current level to 0
    Release,
    /// Fading to silence before a retriggered attack
    PreAttackFade,
}

/// What `start()` does when the envelope is still sounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetriggerMode {
    /// Restart the attack from the current level, without a gap.
    #[default]
    Legato,
    /// Fade to zero over 10 ms first, then run a full attack from silence.
    FadeToZero,
}

/// ADSR (Attack, Decay, Sustain, Release) envelope generator.
///
/// Generates a control signal that follows the classic linear ADSR shape:
/// - **Attack**: ramps from the current level to peak (1.0)
/// - **Decay**: ramps from peak to sustain level
/// - **Sustain**: holds at sustain level until `stop()`
/// - **Release**: ramps from current level to 0
///
/// Each phase advances by a constant per-sample delta. A phase with zero
/// duration jumps straight to its target, and a zero-duration decay is passed
/// through in the same sample as the attack that precedes it.
///
/// As a [`Processor`] the envelope is a VCA: every input sample is multiplied
/// by the envelope level.
///
/// # Examples
///
/// ```
/// use wellenform::{ADSR, Envelope, Signal};
///
/// // 10ms attack, 50ms decay, 70% sustain, 100ms release
/// let mut env = ADSR::<48000>::new(0.01, 0.05, 0.7, 0.1);
///
/// env.start();
/// for _ in 0..1000 {
///     let level = env.next_sample();
/// }
///
/// env.stop();
/// while env.is_active() {
///     env.next_sample();
/// }
/// assert_eq!(env.amplitude(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ADSR<const SAMPLE_RATE: u32> {
    state: EnvelopeState,
    amp: f64,
    delta: f64,

    // Time parameters (in seconds)
    attack: f64,
    decay: f64,
    sustain: f64, // 0.0 to 1.0
    release: f64,

    retrigger: RetriggerMode,
}

impl<const SAMPLE_RATE: u32> ADSR<SAMPLE_RATE> {
    /// Creates a new ADSR envelope.
    ///
    /// # Arguments
    ///
    /// * `attack` - Attack time in seconds (0 or positive)
    /// * `decay` - Decay time in seconds (0 or positive)
    /// * `sustain` - Sustain level (0.0 to 1.0, will be clamped)
    /// * `release` - Release time in seconds (0 or positive)
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            state: EnvelopeState::Idle,
            amp: 0.0,
            delta: 0.0,
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
            retrigger: RetriggerMode::default(),
        }
    }

    /// Builder-style method to choose the retrigger behaviour.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellenform::{ADSR, RetriggerMode};
    ///
    /// let env = ADSR::<44100>::default().with_retrigger_mode(RetriggerMode::FadeToZero);
    /// assert_eq!(env.retrigger_mode(), RetriggerMode::FadeToZero);
    /// ```
    pub fn with_retrigger_mode(mut self, mode: RetriggerMode) -> Self {
        self.set_retrigger_mode(mode);
        self
    }

    pub fn retrigger_mode(&self) -> RetriggerMode {
        self.retrigger
    }

    pub fn set_retrigger_mode(&mut self, mode: RetriggerMode) {
        if self.retrigger != mode {
            debug!(from = ?self.retrigger, to = ?mode, "envelope retrigger mode changed");
            self.retrigger = mode;
        }
    }

    pub fn attack(&self) -> f64 {
        self.attack
    }

    pub fn set_attack(&mut self, attack: f64) {
        self.attack = attack.max(0.0);
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn set_decay(&mut self, decay: f64) {
        self.decay = decay.max(0.0);
    }

    pub fn sustain(&self) -> f64 {
        self.sustain
    }

    pub fn set_sustain(&mut self, sustain: f64) {
        self.sustain = sustain.clamp(0.0, 1.0);
    }

    pub fn release(&self) -> f64 {
        self.release
    }

    pub fn set_release(&mut self, release: f64) {
        self.release = release.max(0.0);
    }

    /// Sets all four parameters at once.
    pub fn set_adsr(&mut self, attack: f64, decay: f64, sustain: f64, release: f64) {
        self.set_attack(attack);
        self.set_decay(decay);
        self.set_sustain(sustain);
        self.set_release(release);
    }

    /// Gets the current phase of the envelope.
    pub fn state(&self) -> EnvelopeState {
        self.state
    }

    /// Gets the current level without advancing.
    pub fn amplitude(&self) -> f64 {
        self.amp
    }

    /// Resets the envelope to idle state with zero output.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellenform::{ADSR, Envelope};
    ///
    /// let mut env = ADSR::<44100>::new(0.1, 0.1, 0.7, 0.1);
    /// env.start();
    /// env.reset();
    /// assert!(!env.is_active());
    /// ```
    pub fn reset(&mut self) {
        self.state = EnvelopeState::Idle;
        self.amp = 0.0;
        self.delta = 0.0;
    }

    /// Per-sample increment that covers `distance` in `duration` seconds, or
    /// the whole distance at once for a zero duration.
    fn compute_delta(distance: f64, duration: f64) -> f64 {
        if duration > 0.0 {
            distance / SAMPLE_RATE as f64 / duration
        } else {
            distance
        }
    }

    fn enter_attack(&mut self) {
        self.delta = Self::compute_delta(1.0 - self.amp, self.attack);
        self.state = EnvelopeState::Attack;
    }

    fn enter_decay(&mut self) {
        self.delta = Self::compute_delta(-(1.0 - self.sustain), self.decay);
        self.state = EnvelopeState::Decay;
        if self.decay <= 0.0 {
            self.step_decay();
        }
    }

    fn step_decay(&mut self) {
        self.amp += self.delta;
        if self.amp <= self.sustain || self.decay <= 0.0 {
            self.amp = self.sustain;
            self.state = EnvelopeState::Sustain;
        }
    }

    /// Advances the envelope by one sample.
    fn step(&mut self) {
        match self.state {
            EnvelopeState::Idle | EnvelopeState::Sustain => {}
            EnvelopeState::Attack => {
                self.amp += self.delta;
                if self.amp >= 1.0 || self.attack <= 0.0 {
                    self.amp = 1.0;
                    self.enter_decay();
                }
            }
            EnvelopeState::Decay => self.step_decay(),
            EnvelopeState::Release => {
                self.amp += self.delta;
                if self.amp <= 0.0 || self.release <= 0.0 {
                    self.amp = 0.0;
                    self.state = EnvelopeState::Idle;
                }
            }
            EnvelopeState::PreAttackFade => {
                self.amp += self.delta;
                if self.amp <= 0.0 {
                    self.amp = 0.0;
                    self.enter_attack();
                }
            }
        }
    }
}

impl<const SAMPLE_RATE: u32> Default for ADSR<SAMPLE_RATE> {
    fn default() -> Self {
        Self::new(DEFAULT_ATTACK, DEFAULT_DECAY, DEFAULT_SUSTAIN, DEFAULT_RELEASE)
    }
}

impl<const SAMPLE_RATE: u32> Envelope for ADSR<SAMPLE_RATE> {
    fn start(&mut self) {
        if self.amp > 0.0 && self.retrigger == RetriggerMode::FadeToZero {
            if self.state != EnvelopeState::PreAttackFade {
                self.delta = Self::compute_delta(-self.amp, FADE_TO_ZERO_TIME);
                self.state = EnvelopeState::PreAttackFade;
            }
        } else {
            self.enter_attack();
        }
    }

    fn stop(&mut self) {
        if self.state != EnvelopeState::Release {
            self.delta = Self::compute_delta(-self.amp, self.release);
            self.state = EnvelopeState::Release;
        }
    }

    fn is_active(&self) -> bool {
        self.state != EnvelopeState::Idle
    }
}

impl<const SAMPLE_RATE: u32> Signal for ADSR<SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        self.step();
        self.amp
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for ADSR<SAMPLE_RATE> {}

impl<const SAMPLE_RATE: u32> Processor for ADSR<SAMPLE_RATE> {
    fn process_sample(&mut self, input: f64) -> f64 {
        self.step();
        input * self.amp
    }
}
