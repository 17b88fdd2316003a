//! Plays a short filtered sawtooth arpeggio through the default output device.
//!
//! A wavetable sawtooth with a touch of pink noise runs through a Moog ladder
//! whose cutoff is swept by a slow wavetable LFO, and an ADSR shapes each note.
//!
//! ```text
//! cargo run --example voice
//! ```

use anyhow::{Result, anyhow};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, StreamConfig};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use wellenform::{
    ADSR, Envelope, InterpolationMode, MoogLadder, Noise, NoiseType, Pitched, Processor, Signal,
    Wavetable,
};

const SAMPLE_RATE: u32 = wellenform::DEFAULT_SAMPLE_RATE;

/// Semitone steps of the arpeggio above the root.
const ARPEGGIO: [i32; 8] = [0, 3, 7, 10, 12, 10, 7, 3];
const ROOT: f64 = 110.0;
const NOTE_LENGTH: Duration = Duration::from_millis(280);
const GAP: Duration = Duration::from_millis(70);

/// Glide between notes, in samples.
const PORTAMENTO: u32 = SAMPLE_RATE / 100;

struct Voice {
    osc: Wavetable<'static, SAMPLE_RATE>,
    lfo: Wavetable<'static, SAMPLE_RATE>,
    noise: Noise<SAMPLE_RATE>,
    filter: MoogLadder<SAMPLE_RATE>,
    env: ADSR<SAMPLE_RATE>,
}

impl Voice {
    fn new() -> Self {
        let mut osc = Wavetable::<SAMPLE_RATE>::sawtooth(wellenform::DEFAULT_WAVETABLE_SIZE)
            .with_interpolation(InterpolationMode::Linear)
            .with_frequency(ROOT)
            .with_amplitude(0.6);
        osc.set_waveform_harmonics(wellenform::Waveform::Sawtooth, 32);

        let mut lfo = Wavetable::<SAMPLE_RATE>::sine(wellenform::DEFAULT_WAVETABLE_SIZE)
            .with_interpolation(InterpolationMode::Linear);
        lfo.set_oscillation_speed(4.0);
        lfo.set_oscillation_range(300.0, 2400.0);

        let mut noise = Noise::<SAMPLE_RATE>::new().with_type(NoiseType::Pink);
        noise.set_amplitude(0.03);

        Self {
            osc,
            lfo,
            noise,
            filter: MoogLadder::new(1200.0, 0.45),
            env: ADSR::new(0.01, 0.12, 0.6, 0.15),
        }
    }

    fn note_on(&mut self, frequency: f64) {
        self.osc.glide_frequency(frequency, PORTAMENTO);
        self.env.start();
    }

    fn note_off(&mut self) {
        self.env.stop();
    }

    fn next_sample(&mut self) -> f64 {
        self.filter.set_frequency(self.lfo.next_sample());
        let raw = self.osc.next_sample() + self.noise.next_sample();
        let filtered = self.filter.process_sample(raw);
        self.env.process_sample(filtered)
    }
}

fn semitones(root: f64, steps: i32) -> f64 {
    root * 2.0_f64.powf(steps as f64 / 12.0)
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    voice: Arc<Mutex<Voice>>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f64> + cpal::SizedSample,
{
    let channels = config.channels as usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let Ok(mut voice) = voice.lock() else {
                return;
            };
            for frame in data.chunks_mut(channels) {
                let value: T = T::from_sample(voice.next_sample());
                for s in frame.iter_mut() {
                    *s = value;
                }
            }
        },
        |err| warn!(%err, "audio stream error"),
        None,
    )?;

    stream.play()?;
    Ok(stream)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))?;

    let supported = device.default_output_config()?;
    let sample_format = supported.sample_format();
    let mut config: StreamConfig = supported.into();
    config.sample_rate = cpal::SampleRate(SAMPLE_RATE);
    info!(
        device = %device.name().unwrap_or_default(),
        channels = config.channels,
        sample_rate = SAMPLE_RATE,
        ?sample_format,
        "opening output stream"
    );

    let voice = Arc::new(Mutex::new(Voice::new()));

    let _stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, voice.clone())?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, voice.clone())?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, voice.clone())?,
        sample_format => return Err(anyhow!("Unsupported sample format: {}", sample_format)),
    };

    for round in 0..2 {
        for &step in &ARPEGGIO {
            let frequency = semitones(ROOT * (round + 1) as f64, step);
            voice
                .lock()
                .map_err(|_| anyhow!("voice lock poisoned"))?
                .note_on(frequency);
            thread::sleep(NOTE_LENGTH);

            voice
                .lock()
                .map_err(|_| anyhow!("voice lock poisoned"))?
                .note_off();
            thread::sleep(GAP);
        }
    }

    // Let the last release ring out
    thread::sleep(Duration::from_millis(400));
    info!("done");
    Ok(())
}
