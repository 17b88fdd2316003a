//! Signal combinators for composing audio signals at the call site.
//!
//! Components never call each other. When an envelope should scale an
//! oscillator, or a filter should shape it, the caller wires them together
//! with these combinators (or by plain arithmetic in its own loop).

use crate::{AudioSignal, Processor, Signal};

/// Multiplies two signals together (amplitude modulation / ring modulation).
///
/// When one of the signals is an envelope, this is a VCA.
///
/// # Examples
///
/// ```
/// use wellenform::{ADSR, Envelope, Signal, Wavetable, combinators::Multiply};
///
/// let osc = Wavetable::<48000>::sine(512);
/// let mut env = ADSR::<48000>::new(0.01, 0.1, 0.5, 0.2);
/// env.start();
/// let mut voice = Multiply::new(osc, env);
/// let sample = voice.next_sample();
/// ```
pub struct Multiply<A: Signal, B: Signal> {
    a: A,
    b: B,
}

impl<A: Signal, B: Signal> Multiply<A, B> {
    /// Creates a new Multiply combinator.
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }

    /// Returns the two inner signals.
    pub fn into_inner(self) -> (A, B) {
        (self.a, self.b)
    }
}

impl<A: Signal, B: Signal> Signal for Multiply<A, B> {
    fn next_sample(&mut self) -> f64 {
        self.a.next_sample() * self.b.next_sample()
    }
}

impl<const SAMPLE_RATE: u32, A: AudioSignal<SAMPLE_RATE>, B: AudioSignal<SAMPLE_RATE>>
    AudioSignal<SAMPLE_RATE> for Multiply<A, B>
{
}

/// Adds two signals together (mixing).
///
/// Mixing several full-scale signals may need a `Gain` afterwards to avoid
/// clipping.
pub struct Add<A: Signal, B: Signal> {
    a: A,
    b: B,
}

impl<A: Signal, B: Signal> Add<A, B> {
    /// Creates a new Add combinator.
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: Signal, B: Signal> Signal for Add<A, B> {
    fn next_sample(&mut self) -> f64 {
        self.a.next_sample() + self.b.next_sample()
    }
}

impl<const SAMPLE_RATE: u32, A: AudioSignal<SAMPLE_RATE>, B: AudioSignal<SAMPLE_RATE>>
    AudioSignal<SAMPLE_RATE> for Add<A, B>
{
}

/// Scales a signal by a fixed factor.
pub struct Gain<S: Signal> {
    pub source: S,
    pub gain: f64,
}

impl<S: Signal> Signal for Gain<S> {
    fn next_sample(&mut self) -> f64 {
        self.source.next_sample() * self.gain
    }
}

impl<const SAMPLE_RATE: u32, S: AudioSignal<SAMPLE_RATE>> AudioSignal<SAMPLE_RATE> for Gain<S> {}

/// Adds a fixed DC offset to a signal.
pub struct Offset<S: Signal> {
    pub source: S,
    pub offset: f64,
}

impl<S: Signal> Signal for Offset<S> {
    fn next_sample(&mut self) -> f64 {
        self.source.next_sample() + self.offset
    }
}

impl<const SAMPLE_RATE: u32, S: AudioSignal<SAMPLE_RATE>> AudioSignal<SAMPLE_RATE> for Offset<S> {}

/// Runs a signal through a processor (filter, envelope, level detector).
///
/// # Examples
///
/// ```
/// use wellenform::{MoogLadder, Signal, SignalExt, Wavetable};
///
/// let osc = Wavetable::<48000>::sawtooth(1024);
/// let mut filtered = osc.through(MoogLadder::<48000>::new(800.0, 0.3));
/// let sample = filtered.next_sample();
/// ```
pub struct Through<S: Signal, P: Processor> {
    pub source: S,
    pub processor: P,
}

impl<S: Signal, P: Processor> Signal for Through<S, P> {
    fn next_sample(&mut self) -> f64 {
        let input = self.source.next_sample();
        self.processor.process_sample(input)
    }

    fn process(&mut self, buffer: &mut [f64]) {
        self.source.process(buffer);
        self.processor.process_buffer(buffer);
    }
}

impl<const SAMPLE_RATE: u32, S: AudioSignal<SAMPLE_RATE>, P: Processor> AudioSignal<SAMPLE_RATE>
    for Through<S, P>
{
}

/// Extension methods for composing signals fluently.
pub trait SignalExt: Signal + Sized {
    /// Multiplies this signal with another one.
    fn multiply<B: Signal>(self, other: B) -> Multiply<Self, B> {
        Multiply::new(self, other)
    }

    /// Adds another signal to this one.
    fn add<B: Signal>(self, other: B) -> Add<Self, B> {
        Add::new(self, other)
    }

    /// Scales this signal by a fixed gain.
    fn gain(self, gain: f64) -> Gain<Self> {
        Gain { source: self, gain }
    }

    /// Adds a fixed offset to this signal.
    fn offset(self, offset: f64) -> Offset<Self> {
        Offset {
            source: self,
            offset,
        }
    }

    /// Feeds this signal into a processor.
    fn through<P: Processor>(self, processor: P) -> Through<Self, P> {
        Through {
            source: self,
            processor,
        }
    }
}

impl<S: Signal> SignalExt for S {}
