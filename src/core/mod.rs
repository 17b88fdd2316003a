//! Core signal processing types and traits.
//!
//! This module provides the fundamental abstractions used throughout the
//! library:
//! - `Signal` trait for all signal sources
//! - `Processor` trait for in-place signal transformers
//! - `AudioSignal` trait for sample-rate-aware signals
//! - `Pitched` trait for frequency control
//! - Signal combinators for composing signals at the call site

mod audio;
pub mod combinators;
mod signal;

pub use audio::AudioSignal;
pub use combinators::{Add, Gain, Multiply, Offset, SignalExt, Through};
pub use signal::{ConstantSignal, Pitched, Processor, Signal};
