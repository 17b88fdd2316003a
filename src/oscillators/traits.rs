//! Core trait definitions for oscillators.

use crate::core::Pitched;

/// Oscillators are pitched signals with additional state control.
///
/// This trait extends `Pitched` to add oscillator-specific functionality
/// like state reset. All oscillators have controllable frequency (via `Pitched`)
/// and can reset their internal state to initial conditions.
pub trait Oscillator: Pitched {
    /// Resets the oscillator to its initial state.
    ///
    /// This rewinds the phase to zero and clears the last output. Frequency,
    /// amplitude and table content are left unchanged.
    fn reset(&mut self);
}
