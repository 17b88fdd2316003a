//! Audio signal trait for sample-rate-aware signals.

use crate::Signal;

/// Common interface for anything that can be played as audio.
///
/// This trait extends `Signal` to add the sample rate at the type level. The
/// sample rate is encoded as a const generic parameter, so signals running at
/// different rates cannot be accidentally combined.
///
/// # Type Parameters
///
/// * `SAMPLE_RATE` - Sample rate in Hz (e.g., 44100 for CD quality, 48000 for pro audio)
///
/// # Examples
///
/// ```
/// use wellenform::{AudioSignal, Wavetable};
///
/// let osc: Wavetable<'static, 48000> = Wavetable::sine(512);
/// assert_eq!(osc.sample_rate(), 48000.0);
/// ```
pub trait AudioSignal<const SAMPLE_RATE: u32>: Signal {
    /// Gets the sample rate at which this audio is being generated.
    fn sample_rate(&self) -> f64 {
        SAMPLE_RATE as f64
    }
}
