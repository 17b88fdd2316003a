//! Wellenform - real-time audio DSP primitives for Rust
//!
//! This library provides the building blocks of a software synthesizer voice:
//! a wavetable oscillator, an ADSR envelope, a nonlinear ladder low-pass
//! filter and a bank of noise generators, plus a few supporting oscillators,
//! filters and level detectors.
//!
//! Every component is an owned unit of state that is advanced one sample (or
//! one block) at a time by the caller's audio loop. Sources implement
//! [`Signal`]; units that transform an incoming signal implement
//! [`Processor`]. Components never call each other; compose them at the call
//! site with the [`combinators`] or plain arithmetic.
//!
//! The sample rate is a const generic parameter on every sample-rate-aware
//! type, so a 44.1 kHz signal cannot be mixed with a 48 kHz one by accident.
//!
//! # Examples
//!
//! ```
//! use wellenform::{ADSR, Envelope, MoogLadder, Pitched, Signal, SignalExt, Wavetable};
//!
//! const SR: u32 = wellenform::DEFAULT_SAMPLE_RATE;
//!
//! let mut osc = Wavetable::<SR>::sawtooth(wellenform::DEFAULT_WAVETABLE_SIZE);
//! osc.set_frequency(110.0);
//!
//! let mut env = ADSR::<SR>::default();
//! env.start();
//!
//! let mut voice = osc.through(MoogLadder::<SR>::new(900.0, 0.3)).through(env);
//! let mut block = [0.0; wellenform::DEFAULT_BLOCK_SIZE];
//! voice.process(&mut block);
//! ```

pub mod analysis;
pub mod core;
pub mod envelopes;
pub mod filters;
pub mod noise;
pub mod oscillators;

pub use self::core::combinators;

// Re-export commonly used types at the crate root
pub use analysis::{EnvelopeFollower, ExponentialMovingAverage, RootMeanSquare};
pub use self::core::{
    Add, AudioSignal, ConstantSignal, Gain, Multiply, Offset, Pitched, Processor, Signal,
    SignalExt, Through,
};
pub use envelopes::{ADSR, Envelope, EnvelopeState, RetriggerMode};
pub use filters::{MoogLadder, Resonator};
pub use noise::{
    FastGaussianNoise, FastWhiteNoise, GaussianNoise, Noise, NoiseType, PinkNoise, SimplexNoise,
    WhiteNoise,
};
pub use oscillators::{
    FmSynth, FunctionOscillator, InterpolationMode, Oscillator, TableStorage, Waveform, Wavetable,
};

/// Sample rate used by the demos and benchmarks, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;
/// Default number of samples in a wavetable.
pub const DEFAULT_WAVETABLE_SIZE: usize = 512;
/// Default number of samples per processing block.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Default ADSR attack time, in seconds.
pub const DEFAULT_ATTACK: f64 = 0.005;
/// Default ADSR decay time, in seconds.
pub const DEFAULT_DECAY: f64 = 0.01;
/// Default ADSR sustain level.
pub const DEFAULT_SUSTAIN: f64 = 0.5;
/// Default ADSR release time, in seconds.
pub const DEFAULT_RELEASE: f64 = 0.075;
