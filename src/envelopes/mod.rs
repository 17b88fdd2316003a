//! Envelope generators for controlling amplitude over time.
//!
//! This module provides the `Envelope` lifecycle trait and a linear ADSR
//! envelope that can be used either as a control signal or directly as a
//! VCA on an incoming signal.

mod adsr;
mod envelope;

pub use adsr::{ADSR, EnvelopeState, RetriggerMode};
pub use envelope::Envelope;
