//! Wavetable oscillator for table-lookup synthesis.
//!
//! # Design Overview
//!
//! `Wavetable` plays back one cycle of an arbitrary waveform stored in a
//! sample table at a speed proportional to the requested frequency.
//!
//! ## Core Architecture
//!
//! 1. **Table Storage**: either owned (`Vec<f64>`, dropped with the
//!    oscillator) or borrowed from the caller (`&mut [f64]`, never freed by the
//!    oscillator). The choice is made explicitly at construction, see
//!    [`TableStorage`].
//!
//! 2. **Read Cursor**: a fractional position in `[0, N)` advanced by
//!    `step = frequency * N / SAMPLE_RATE` every sample. The step is only
//!    recomputed when the frequency actually changes. Negative steps play the
//!    table backwards; the cursor is wrapped back into range after every
//!    advance.
//!
//! 3. **Interpolation**: none (truncate to an index), linear (two points) or
//!    cubic (four-point Catmull-Rom). All neighbour reads wrap around the end of
//!    the table.
//!
//! 4. **Glides**: amplitude and frequency can be ramped linearly to a target
//!    over a fixed number of samples to avoid clicks, or to produce glissandi.
//!
//! ## Example Usage
//!
//! ```
//! use wellenform::{InterpolationMode, Pitched, Signal, Wavetable};
//!
//! let mut osc = Wavetable::<48000>::sine(1024).with_interpolation(InterpolationMode::Linear);
//! osc.set_frequency(440.0);
//!
//! let mut block = [0.0; 64];
//! osc.process(&mut block);
//!
//! // Slide up an octave over 100 ms.
//! osc.glide_frequency(880.0, 4800);
//! ```
//!
//! ## Implementation Notes
//!
//! A table must hold at least 4 samples for cubic interpolation to be
//! meaningful. Smaller tables still work but the neighbours overlap.

use super::Oscillator;
use super::waveforms::{self, Waveform};
use crate::core::Pitched;
use crate::{AudioSignal, Signal};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

const DEFAULT_AMPLITUDE: f64 = 0.75;
const DEFAULT_FREQUENCY: f64 = 220.0;

/// Interpolation mode for wavetable playback.
///
/// Determines how fractional positions between table samples are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// No interpolation - truncate to the sample at or before the cursor
    #[default]
    None,
    /// Linear interpolation between adjacent samples
    Linear,
    /// Cubic (Catmull-Rom) interpolation using 4 points
    Cubic,
}

/// Backing buffer of a [`Wavetable`].
///
/// The variant records who owns the samples: an `Owned` table is freed with
/// the oscillator, a `Borrowed` table belongs to the caller and outlives it.
#[derive(Debug)]
pub enum TableStorage<'a> {
    Owned(Vec<f64>),
    Borrowed(&'a mut [f64]),
}

impl Deref for TableStorage<'_> {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        match self {
            TableStorage::Owned(samples) => samples,
            TableStorage::Borrowed(samples) => samples,
        }
    }
}

impl DerefMut for TableStorage<'_> {
    fn deref_mut(&mut self) -> &mut [f64] {
        match self {
            TableStorage::Owned(samples) => samples,
            TableStorage::Borrowed(samples) => samples,
        }
    }
}

/// A linear parameter ramp in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Glide {
    target: f64,
    delta: f64,
    remaining: u32,
}

impl Glide {
    fn new(current: f64, target: f64, steps: u32) -> Self {
        Self {
            target,
            delta: (target - current) / steps as f64,
            remaining: steps,
        }
    }

    /// Returns the parameter value for the next sample and whether the glide
    /// has finished. The last step lands exactly on the target.
    fn advance(&mut self, current: f64) -> (f64, bool) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            (self.target, true)
        } else {
            (current + self.delta, false)
        }
    }
}

/// Wraps `value` into `[0, size)`.
///
/// Values within one table length of the range are wrapped by repeated
/// addition/subtraction; anything further out falls back to a euclidean
/// remainder. Non-finite values reset to zero.
#[inline]
fn wrap(value: f64, size: f64) -> f64 {
    let wrapped = if (0.0..size).contains(&value) {
        value
    } else if value >= size && value < 2.0 * size {
        value - size
    } else if value < 0.0 && value >= -size {
        value + size
    } else if value.is_finite() {
        value.rem_euclid(size)
    } else {
        0.0
    };

    // -tiny + size can round up to exactly size
    if wrapped >= size { 0.0 } else { wrapped }
}

/// A wavetable oscillator.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of a borrowed table (unconstrained for owned tables)
/// * `SAMPLE_RATE` - Sample rate in Hz
///
/// # Examples
///
/// ```
/// use wellenform::{Signal, Wavetable};
///
/// // Borrow a caller-owned table
/// let mut samples = vec![0.0; 256];
/// {
///     let mut osc = Wavetable::<44100>::borrowed(&mut samples);
///     osc.set_waveform(wellenform::Waveform::Square);
///     osc.next_sample();
/// }
/// assert_eq!(samples[0], 1.0);
/// ```
#[derive(Debug)]
pub struct Wavetable<'a, const SAMPLE_RATE: u32> {
    table: TableStorage<'a>,
    /// Read cursor in samples, always within [0, table.len())
    position: f64,
    /// Cursor increment per sample
    step: f64,
    frequency: f64,
    amplitude: f64,
    offset: f64,
    /// Read offset as a fraction of one cycle, within [0, 1)
    phase_offset: f64,
    interpolation: InterpolationMode,
    jitter_enabled: bool,
    jitter_range: f64,
    amplitude_glide: Option<Glide>,
    frequency_glide: Option<Glide>,
    /// Last output sample
    signal: f64,
    rng: SmallRng,
}

impl<'a, const SAMPLE_RATE: u32> Wavetable<'a, SAMPLE_RATE> {
    fn with_storage(table: TableStorage<'a>) -> Self {
        assert!(!table.is_empty(), "Wavetable cannot be empty");

        let mut osc = Self {
            table,
            position: 0.0,
            step: 0.0,
            frequency: 0.0,
            amplitude: DEFAULT_AMPLITUDE,
            offset: 0.0,
            phase_offset: 0.0,
            interpolation: InterpolationMode::default(),
            jitter_enabled: false,
            jitter_range: 0.0,
            amplitude_glide: None,
            frequency_glide: None,
            signal: 0.0,
            rng: SmallRng::from_entropy(),
        };
        osc.update_frequency(DEFAULT_FREQUENCY);
        osc
    }

    /// Creates an oscillator that owns a silent table of `table_size` samples.
    ///
    /// # Panics
    ///
    /// Panics if `table_size` is zero.
    pub fn new(table_size: usize) -> Self {
        Self::with_storage(TableStorage::Owned(vec![0.0; table_size]))
    }

    /// Creates an oscillator that takes ownership of `samples`.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn from_samples(samples: Vec<f64>) -> Self {
        Self::with_storage(TableStorage::Owned(samples))
    }

    /// Creates an oscillator that plays a caller-owned table.
    ///
    /// The oscillator reads and (through `set_waveform` or `table_mut`) writes
    /// the slice but never frees it.
    ///
    /// # Panics
    ///
    /// Panics if `samples` is empty.
    pub fn borrowed(samples: &'a mut [f64]) -> Self {
        Self::with_storage(TableStorage::Borrowed(samples))
    }

    /// Creates an owned table of `table_size` samples filled with `waveform`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellenform::{Waveform, Wavetable};
    ///
    /// let osc = Wavetable::<48000>::with_waveform(512, Waveform::Triangle);
    /// assert_eq!(osc.table_size(), 512);
    /// ```
    pub fn with_waveform(table_size: usize, waveform: Waveform) -> Self {
        let mut osc = Self::new(table_size);
        osc.set_waveform(waveform);
        osc
    }

    /// Creates a sine wavetable.
    pub fn sine(table_size: usize) -> Self {
        Self::with_waveform(table_size, Waveform::Sine)
    }

    /// Creates a triangle wavetable.
    pub fn triangle(table_size: usize) -> Self {
        Self::with_waveform(table_size, Waveform::Triangle)
    }

    /// Creates a (falling) sawtooth wavetable.
    pub fn sawtooth(table_size: usize) -> Self {
        Self::with_waveform(table_size, Waveform::Sawtooth)
    }

    /// Creates a square wavetable.
    pub fn square(table_size: usize) -> Self {
        Self::with_waveform(table_size, Waveform::Square)
    }

    /// Reseeds the generator used for jitter and noise tables.
    ///
    /// Call this before `set_waveform(Waveform::Noise)` for a reproducible
    /// noise table.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Builder-style method to set the interpolation mode.
    pub fn with_interpolation(mut self, mode: InterpolationMode) -> Self {
        self.interpolation = mode;
        self
    }

    /// Builder-style method to set the frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.set_frequency(frequency);
        self
    }

    /// Builder-style method to set the amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.set_amplitude(amplitude);
        self
    }

    /// Regenerates the table content in place.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        waveforms::fill(&mut self.table, waveform, &mut self.rng);
        debug!(?waveform, table_size = self.table.len(), "filled wavetable");
    }

    /// Regenerates the table as a band-limited sum of `harmonics` partials.
    pub fn set_waveform_harmonics(&mut self, waveform: Waveform, harmonics: usize) {
        waveforms::fill_harmonics(&mut self.table, waveform, harmonics);
        debug!(
            ?waveform,
            harmonics,
            table_size = self.table.len(),
            "filled wavetable from partials"
        );
    }

    /// Replaces one section of the table with `source`.
    ///
    /// The table is split into `total_sections` equal sections of
    /// `table_size / total_sections` samples. If the index is out of range, the
    /// source length differs from the section size, or the copy would run past
    /// the end of the table, a diagnostic is logged and the table is left
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellenform::Wavetable;
    ///
    /// let mut osc = Wavetable::<48000>::new(8);
    /// osc.replace_section(1, 2, &[1.0; 4]);
    /// assert_eq!(osc.table(), &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    ///
    /// // Wrong length: ignored
    /// osc.replace_section(0, 2, &[1.0; 3]);
    /// assert_eq!(osc.table()[0], 0.0);
    /// ```
    pub fn replace_section(&mut self, section: usize, total_sections: usize, source: &[f64]) {
        if section >= total_sections {
            warn!(section, total_sections, "invalid section index, table unchanged");
            return;
        }

        let section_size = self.table.len() / total_sections;
        if source.len() != section_size {
            warn!(
                source_len = source.len(),
                section_size, "source size does not match section size, table unchanged"
            );
            return;
        }

        let start = section * section_size;
        match self.table.get_mut(start..start + section_size) {
            Some(target) => target.copy_from_slice(source),
            None => warn!(
                start,
                section_size,
                table_size = self.table.len(),
                "section exceeds table bounds, table unchanged"
            ),
        }
    }

    /// Returns the table samples.
    pub fn table(&self) -> &[f64] {
        &self.table
    }

    /// Returns the table samples for direct editing.
    pub fn table_mut(&mut self) -> &mut [f64] {
        &mut self.table
    }

    /// Gets the number of samples in the table.
    pub fn table_size(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the oscillator owns (and will free) its table.
    pub fn is_owned(&self) -> bool {
        matches!(self.table, TableStorage::Owned(_))
    }

    /// Gets the current read cursor, in samples.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Gets the cursor increment per sample.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Starts a linear glide from the current frequency to `frequency`.
    ///
    /// After `steps` samples the frequency equals `frequency` exactly. With
    /// `steps == 0` this is the same as `set_frequency`.
    pub fn glide_frequency(&mut self, frequency: f64, steps: u32) {
        if steps > 0 {
            self.frequency_glide = Some(Glide::new(self.frequency, frequency, steps));
        } else {
            self.set_frequency(frequency);
        }
    }

    /// Gets the amplitude.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Sets the amplitude immediately, cancelling any amplitude glide.
    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.amplitude = amplitude;
        self.amplitude_glide = None;
    }

    /// Starts a linear glide from the current amplitude to `amplitude`.
    ///
    /// With `steps == 0` this is the same as `set_amplitude`.
    pub fn glide_amplitude(&mut self, amplitude: f64, steps: u32) {
        if steps > 0 {
            self.amplitude_glide = Some(Glide::new(self.amplitude, amplitude, steps));
        } else {
            self.set_amplitude(amplitude);
        }
    }

    /// Returns true while an amplitude or frequency glide is in progress.
    pub fn is_gliding(&self) -> bool {
        self.amplitude_glide.is_some() || self.frequency_glide.is_some()
    }

    /// Gets the DC offset added after the amplitude.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Sets the DC offset added after the amplitude.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset;
    }

    /// Gets the phase offset as a fraction of one cycle.
    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    /// Sets the read offset as a fraction of one cycle.
    ///
    /// Negative values count back from the end of the cycle, so `-0.25` is the
    /// same as `0.75`.
    pub fn set_phase_offset(&mut self, phase_offset: f64) {
        self.phase_offset = wrap(phase_offset, 1.0);
    }

    /// Enables or disables random perturbation of the cursor step.
    pub fn enable_jitter(&mut self, enabled: bool) {
        self.jitter_enabled = enabled;
    }

    /// Returns true if jitter is enabled.
    pub fn is_jitter_enabled(&self) -> bool {
        self.jitter_enabled
    }

    /// Gets the jitter range.
    pub fn jitter_range(&self) -> f64 {
        self.jitter_range
    }

    /// Sets the jitter range. Each advance is scaled by `1 + u * range` with
    /// `u` uniform in [0, 1).
    pub fn set_jitter_range(&mut self, range: f64) {
        self.jitter_range = range;
    }

    /// Gets the interpolation mode.
    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Sets the interpolation mode.
    pub fn set_interpolation(&mut self, mode: InterpolationMode) {
        self.interpolation = mode;
    }

    /// Sets the speed in seconds per cycle, useful for slow LFOs.
    pub fn set_oscillation_speed(&mut self, seconds: f64) {
        self.set_frequency(1.0 / seconds);
    }

    /// Sets amplitude and offset so the output of a unit-peak table spans
    /// `[min, max]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wellenform::Wavetable;
    ///
    /// let mut lfo = Wavetable::<48000>::sine(256);
    /// lfo.set_oscillation_range(200.0, 800.0);
    /// assert_eq!(lfo.amplitude(), 300.0);
    /// assert_eq!(lfo.offset(), 500.0);
    /// ```
    pub fn set_oscillation_range(&mut self, min: f64, max: f64) {
        let half_span = (max - min) * 0.5;
        self.set_amplitude(half_span);
        self.set_offset(half_span + min);
    }

    /// Returns the last output sample without advancing.
    pub fn current(&self) -> f64 {
        self.signal
    }

    /// Stores `frequency` and recomputes the step, but only if it changed.
    fn update_frequency(&mut self, frequency: f64) {
        if self.frequency != frequency {
            self.frequency = frequency;
            self.step = frequency * self.table.len() as f64 / SAMPLE_RATE as f64;
        }
    }

    fn advance_glides(&mut self) {
        if let Some((amplitude, done)) = self
            .amplitude_glide
            .as_mut()
            .map(|glide| glide.advance(self.amplitude))
        {
            self.amplitude = amplitude;
            if done {
                self.amplitude_glide = None;
            }
        }

        if let Some((frequency, done)) = self
            .frequency_glide
            .as_mut()
            .map(|glide| glide.advance(self.frequency))
        {
            self.update_frequency(frequency);
            if done {
                self.frequency_glide = None;
            }
        }
    }

    /// Reads the table at the cursor plus phase offset.
    #[inline]
    fn read_sample(&self) -> f64 {
        let table = &*self.table;
        let table_size = table.len();
        let position = wrap(
            self.position + self.phase_offset * table_size as f64,
            table_size as f64,
        );

        match self.interpolation {
            InterpolationMode::None => table[position as usize],
            InterpolationMode::Linear => {
                let index0 = position as usize;
                let index1 = (index0 + 1) % table_size;
                let frac = position - index0 as f64;

                let sample0 = table[index0];
                let sample1 = table[index1];

                sample0 + frac * (sample1 - sample0)
            }
            InterpolationMode::Cubic => {
                let index1 = position as usize;
                let index0 = if index1 == 0 {
                    table_size - 1
                } else {
                    index1 - 1
                };
                let index2 = (index1 + 1) % table_size;
                let index3 = (index1 + 2) % table_size;
                let frac = position - index1 as f64;

                let y0 = table[index0];
                let y1 = table[index1];
                let y2 = table[index2];
                let y3 = table[index3];

                let c0 = y1;
                let c1 = 0.5 * (y2 - y0);
                let c2 = y0 - 2.5 * y1 + 2.0 * y2 - 0.5 * y3;
                let c3 = 0.5 * (y3 - y0) + 1.5 * (y1 - y2);

                c0 + frac * (c1 + frac * (c2 + frac * c3))
            }
        }
    }

    #[inline]
    fn advance_position(&mut self) {
        let step = if self.jitter_enabled {
            self.step * (self.rng.gen_range(0.0..1.0) * self.jitter_range + 1.0)
        } else {
            self.step
        };
        self.position = wrap(self.position + step, self.table.len() as f64);
    }
}

impl<const SAMPLE_RATE: u32> Signal for Wavetable<'_, SAMPLE_RATE> {
    fn next_sample(&mut self) -> f64 {
        self.advance_glides();

        let sample = self.read_sample();
        self.advance_position();

        self.signal = sample * self.amplitude + self.offset;
        self.signal
    }
}

impl<const SAMPLE_RATE: u32> AudioSignal<SAMPLE_RATE> for Wavetable<'_, SAMPLE_RATE> {}

impl<const SAMPLE_RATE: u32> Pitched for Wavetable<'_, SAMPLE_RATE> {
    /// Sets the frequency immediately, cancelling any frequency glide.
    ///
    /// The step is only recomputed when the frequency differs from the
    /// current one. Negative frequencies play the table backwards.
    fn set_frequency(&mut self, frequency: f64) {
        self.frequency_glide = None;
        self.update_frequency(frequency);
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl<const SAMPLE_RATE: u32> Oscillator for Wavetable<'_, SAMPLE_RATE> {
    fn reset(&mut self) {
        self.position = 0.0;
        self.signal = 0.0;
    }
}
