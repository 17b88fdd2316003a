//! Audio filters for signal processing.
//!
//! This module provides a nonlinear four-pole [`MoogLadder`] low-pass filter
//! and a two-pole band-pass [`Resonator`]. Both are [`Processor`]s and cache
//! their coefficients until frequency or resonance actually changes.
//!
//! [`Processor`]: crate::Processor

mod moog_ladder;
mod resonator;

pub use self::moog_ladder::MoogLadder;
pub use self::resonator::Resonator;
