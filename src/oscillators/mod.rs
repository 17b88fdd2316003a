//! Oscillator implementations for audio synthesis.
//!
//! This module contains the core `Oscillator` trait, the table-lookup
//! `Wavetable` oscillator with its waveform generators, a direct
//! `FunctionOscillator`, and a two-operator `FmSynth`.

mod fm;
mod function;
mod traits;
pub mod waveforms;
mod wavetable;

pub use fm::FmSynth;
pub use function::FunctionOscillator;
pub use traits::Oscillator;
pub use waveforms::Waveform;
pub use wavetable::{InterpolationMode, TableStorage, Wavetable};
