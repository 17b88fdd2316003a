//! Envelope trait for note-driven control signals.

use crate::Signal;

/// Trait for envelope generators with lifecycle control.
///
/// Envelopes are signals with a defined lifecycle: they are started on a note
/// on, stopped on a note off, and go idle once their release phase completes.
///
/// # Examples
///
/// ```
/// use wellenform::{ADSR, Envelope, Signal};
///
/// let mut env = ADSR::<44100>::new(0.1, 0.1, 0.7, 0.3);
///
/// env.start();
/// assert!(env.is_active());
///
/// for _ in 0..1000 {
///     let level = env.next_sample();
///     // Use level to control amplitude, filter cutoff, etc.
/// }
///
/// env.stop();
///
/// // Continue generating until envelope completes
/// while env.is_active() {
///     env.next_sample();
/// }
/// ```
pub trait Envelope: Signal {
    /// Starts (or restarts) the attack phase.
    fn start(&mut self);

    /// Starts the release phase from the current level.
    fn stop(&mut self);

    /// Returns true if the envelope is currently active (not idle).
    fn is_active(&self) -> bool;
}
