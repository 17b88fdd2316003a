//! Single-cycle waveform generators for filling wavetables.
//!
//! Every function writes one full cycle into the slice it is given, in place.
//! Band-limited variants are built additively from cosine partials and then
//! normalized to a unit peak.

use rand::Rng;
use std::f64::consts::TAU;

/// Basic waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Sawtooth,
    Square,
    /// Uniform white noise in [-1.0, 1.0)
    Noise,
}

/// Fills `table` with one cycle of `waveform`.
///
/// `rng` is only consumed by [`Waveform::Noise`].
pub fn fill<R: Rng + ?Sized>(table: &mut [f64], waveform: Waveform, rng: &mut R) {
    match waveform {
        Waveform::Sine => sine(table),
        Waveform::Triangle => triangle(table),
        Waveform::Sawtooth => sawtooth(table),
        Waveform::Square => square(table),
        Waveform::Noise => noise(table, rng),
    }
}

/// Fills `table` with an additive, band-limited version of `waveform`.
///
/// Only triangle, sawtooth and square have harmonic variants; any other
/// waveform falls back to a plain sine.
pub fn fill_harmonics(table: &mut [f64], waveform: Waveform, harmonics: usize) {
    match waveform {
        Waveform::Triangle => triangle_harmonics(table, harmonics),
        Waveform::Sawtooth => sawtooth_harmonics(table, harmonics),
        Waveform::Square => square_harmonics(table, harmonics),
        Waveform::Sine | Waveform::Noise => sine(table),
    }
}

/// One cycle of a sine wave starting at zero.
pub fn sine(table: &mut [f64]) {
    let size = table.len() as f64;
    for (i, sample) in table.iter_mut().enumerate() {
        *sample = (TAU * i as f64 / size).sin();
    }
}

/// One cycle of a triangle wave: rises from 0 to 1, falls through 0 to -1,
/// and returns to 0.
pub fn triangle(table: &mut [f64]) {
    let size = table.len() as f64;
    for (i, sample) in table.iter_mut().enumerate() {
        let x = 4.0 * i as f64 / size;
        *sample = if x < 1.0 {
            x
        } else if x < 3.0 {
            2.0 - x
        } else {
            x - 4.0
        };
    }
}

/// One cycle of a falling sawtooth (1.0 down to -1.0).
pub fn sawtooth(table: &mut [f64]) {
    sawtooth_ramp(table, false);
}

/// One cycle of a linear ramp across the full table.
///
/// With `ramp_up` the table rises from -1.0 to 1.0, otherwise it falls from
/// 1.0 to -1.0. Both end points are hit exactly.
pub fn sawtooth_ramp(table: &mut [f64], ramp_up: bool) {
    let sign = if ramp_up { 1.0 } else { -1.0 };
    let last = table.len().saturating_sub(1).max(1) as f64;
    for (i, sample) in table.iter_mut().enumerate() {
        *sample = sign * (2.0 * (i as f64 / last) - 1.0);
    }
}

/// One cycle of a square wave: first half 1.0, second half -1.0.
pub fn square(table: &mut [f64]) {
    let half = table.len() / 2;
    for (i, sample) in table.iter_mut().enumerate() {
        *sample = if i < half { 1.0 } else { -1.0 };
    }
}

/// One cycle of a pulse wave with the given duty cycle (0.0 to 1.0).
pub fn pulse(table: &mut [f64], pulse_width: f64) {
    let threshold = (table.len() as f64 * pulse_width) as usize;
    for (i, sample) in table.iter_mut().enumerate() {
        *sample = if i < threshold { 1.0 } else { -1.0 };
    }
}

/// Uniform white noise in [-1.0, 1.0).
pub fn noise<R: Rng + ?Sized>(table: &mut [f64], rng: &mut R) {
    for sample in table.iter_mut() {
        *sample = rng.gen_range(-1.0..1.0);
    }
}

/// Additive sawtooth: every partial `k` at amplitude `1 / (k + 1)`.
pub fn sawtooth_harmonics(table: &mut [f64], harmonics: usize) {
    let amplitudes: Vec<f64> = (0..harmonics).map(|k| 1.0 / (k + 1) as f64).collect();
    fourier(table, &amplitudes, -0.25);
}

/// Additive square: odd partials only, at amplitude `1 / (k + 1)`.
pub fn square_harmonics(table: &mut [f64], harmonics: usize) {
    let amplitudes: Vec<f64> = (0..harmonics)
        .map(|k| if k % 2 == 0 { 1.0 / (k + 1) as f64 } else { 0.0 })
        .collect();
    fourier(table, &amplitudes, -0.25);
}

/// Additive triangle: odd partials only, at amplitude `1 / (k + 1)^2`.
pub fn triangle_harmonics(table: &mut [f64], harmonics: usize) {
    let amplitudes: Vec<f64> = (0..harmonics)
        .map(|k| {
            if k % 2 == 0 {
                let n = (k + 1) as f64;
                1.0 / (n * n)
            } else {
                0.0
            }
        })
        .collect();
    fourier(table, &amplitudes, 0.0);
}

/// Overwrites `table` with a sum of cosine partials and normalizes the result.
///
/// Partial `k` has frequency `k + 1` cycles per table, amplitude
/// `amplitudes[k]` and a phase of `phase` cycles.
pub fn fourier(table: &mut [f64], amplitudes: &[f64], phase: f64) {
    let size = table.len() as f64;
    let phase = phase * TAU;

    table.fill(0.0);
    for (k, &amplitude) in amplitudes.iter().enumerate() {
        if amplitude == 0.0 {
            continue;
        }
        let partial = (k + 1) as f64;
        for (n, sample) in table.iter_mut().enumerate() {
            let w = partial * (n as f64 * TAU / size);
            *sample += amplitude * (w + phase).cos();
        }
    }
    normalize(table);
}

/// Scales `table` so its largest absolute value is 1.0.
///
/// A silent table is left untouched.
pub fn normalize(table: &mut [f64]) {
    let peak = table.iter().fold(0.0_f64, |peak, &s| peak.max(s.abs()));
    if peak > 0.0 {
        for sample in table.iter_mut() {
            *sample /= peak;
        }
    }
}
