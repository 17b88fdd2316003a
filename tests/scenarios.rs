//! End-to-end scenarios driving the primitives the way an audio callback would.

use wellenform::{
    ADSR, Envelope, EnvelopeState, FastWhiteNoise, InterpolationMode, MoogLadder, Noise, NoiseType,
    PinkNoise, Pitched, Processor, RetriggerMode, Signal, SignalExt, SimplexNoise, Wavetable,
    WhiteNoise, combinators::Multiply,
};

const SR: u32 = 48_000;

fn sine_osc(frequency: f64) -> Wavetable<'static, SR> {
    let mut osc = Wavetable::<SR>::sine(1024)
        .with_interpolation(InterpolationMode::Linear)
        .with_amplitude(1.0);
    osc.set_frequency(frequency);
    osc
}

/// Calls `next_sample` until the envelope leaves `state`.
fn samples_in(env: &mut ADSR<SR>, state: EnvelopeState) -> usize {
    let mut count = 0;
    while env.state() == state && count < 1_000_000 {
        env.next_sample();
        count += 1;
    }
    count
}

#[test]
fn sine_returns_to_start_after_one_period() {
    let mut osc = sine_osc(220.0);

    let first = osc.next_sample();
    // 48000 / 220 = 218.18 samples per period
    for _ in 1..218 {
        osc.next_sample();
    }
    let after_period = osc.next_sample();

    // Falls short of a full cycle by 0.18 samples
    assert!((after_period - first).abs() < 0.03, "{first} vs {after_period}");
    assert!(osc.position() >= 0.0 && osc.position() < 1024.0);
}

#[test]
fn sine_with_integer_period_is_exact() {
    // 48000 / 240 = 200 samples per period, step 5.12
    let mut osc = sine_osc(240.0);
    let period: Vec<f64> = (0..200).map(|_| osc.next_sample()).collect();
    let next: Vec<f64> = (0..200).map(|_| osc.next_sample()).collect();

    for (a, b) in period.iter().zip(&next) {
        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
    }
    assert!((period[50] - 1.0).abs() < 1e-4);
}

#[test]
fn cursor_stays_in_range_under_modulation() {
    let mut osc = Wavetable::<SR>::sawtooth(64).with_interpolation(InterpolationMode::Cubic);
    let mut lfo = SimplexNoise::<SR>::new(3);
    lfo.set_step(0.05);

    for _ in 0..20_000 {
        osc.set_frequency(lfo.next_sample() * 30_000.0);
        let sample = osc.next_sample();
        assert!(sample.is_finite());
        assert!((0.0..64.0).contains(&osc.position()), "{}", osc.position());
    }
}

#[test]
fn adsr_phase_timing_at_48k() {
    let mut env = ADSR::<SR>::new(0.01, 0.02, 0.5, 0.05);
    env.start();

    let attack = samples_in(&mut env, EnvelopeState::Attack);
    assert!((480..=481).contains(&attack), "attack took {attack}");
    assert_eq!(env.amplitude(), 1.0);

    let decay = samples_in(&mut env, EnvelopeState::Decay);
    assert!((960..=961).contains(&decay), "decay took {decay}");
    assert_eq!(env.amplitude(), 0.5);

    for _ in 0..1000 {
        assert_eq!(env.next_sample(), 0.5);
    }

    env.stop();
    let release = samples_in(&mut env, EnvelopeState::Release);
    assert!((2400..=2401).contains(&release), "release took {release}");
    assert_eq!(env.amplitude(), 0.0);
    assert!(!env.is_active());
}

#[test]
fn adsr_release_from_attack() {
    let mut env = ADSR::<SR>::new(0.01, 0.02, 0.5, 0.05);
    env.start();
    for _ in 0..240 {
        env.next_sample();
    }

    env.stop();
    let release = samples_in(&mut env, EnvelopeState::Release);
    assert!((2400..=2401).contains(&release), "release took {release}");
}

#[test]
fn adsr_release_from_decay() {
    let mut env = ADSR::<SR>::new(0.01, 0.02, 0.5, 0.05);
    env.start();
    for _ in 0..(480 + 300) {
        env.next_sample();
    }
    assert_eq!(env.state(), EnvelopeState::Decay);

    env.stop();
    let release = samples_in(&mut env, EnvelopeState::Release);
    assert!((2400..=2401).contains(&release), "release took {release}");
    assert!(!env.is_active());
}

#[test]
fn adsr_release_from_retrigger_fade() {
    let mut env =
        ADSR::<SR>::new(0.0, 0.0, 0.5, 0.05).with_retrigger_mode(RetriggerMode::FadeToZero);
    env.start();
    env.next_sample();

    // 10 ms fade is 480 samples; stop a quarter of the way in
    env.start();
    for _ in 0..120 {
        env.next_sample();
    }
    assert_eq!(env.state(), EnvelopeState::PreAttackFade);
    assert!(env.amplitude() > 0.0);

    env.stop();
    let release = samples_in(&mut env, EnvelopeState::Release);
    assert!((2400..=2401).contains(&release), "release took {release}");
    assert_eq!(env.amplitude(), 0.0);
}

#[test]
fn zero_duration_adsr_jumps_to_sustain() {
    let mut env = ADSR::<SR>::new(0.0, 0.0, 0.5, 0.0);
    env.start();
    assert_eq!(env.next_sample(), 0.5);
    assert_eq!(env.state(), EnvelopeState::Sustain);

    env.stop();
    assert_eq!(env.next_sample(), 0.0);
    assert!(!env.is_active());
}

#[test]
fn envelope_scales_oscillator() {
    let mut reference_osc = sine_osc(440.0);
    let mut reference_env = ADSR::<SR>::new(0.005, 0.01, 0.7, 0.02);
    reference_env.start();

    let mut voice = Multiply::new(sine_osc(440.0), reference_env.clone());
    for _ in 0..2048 {
        let expected = reference_osc.next_sample() * reference_env.next_sample();
        assert_eq!(voice.next_sample(), expected);
    }

    // The same idea with the envelope used as a processor
    let mut gate = ADSR::<SR>::new(0.0, 0.0, 0.25, 0.0);
    gate.start();
    let mut vca = sine_osc(440.0).through(gate);
    let mut dry = sine_osc(440.0);
    for _ in 0..64 {
        let expected = dry.next_sample() * 0.25;
        assert!((vca.next_sample() - expected).abs() < 1e-12);
    }

    // An envelope that was never started keeps the voice silent
    let mut silent = sine_osc(440.0).through(ADSR::<SR>::default());
    let mut block = [0.0; 64];
    silent.process(&mut block);
    assert!(block.iter().all(|&s| s == 0.0));
}

#[test]
fn white_noise_stays_in_range() {
    let mut portable = WhiteNoise::<SR>::with_seed(1234);
    let mut fast = FastWhiteNoise::<SR>::with_seed(1234);

    for _ in 0..10_000 {
        let a = portable.next_sample();
        let b = fast.next_sample();
        assert!((-1.0..1.0).contains(&a), "{a}");
        assert!((-1.0..1.0).contains(&b), "{b}");
    }
}

#[test]
fn pink_noise_mean_near_zero() {
    let mut noise = PinkNoise::<SR>::with_seed(2024);
    let count = 100_000;
    let mean = (0..count).map(|_| noise.next_sample()).sum::<f64>() / count as f64;
    assert!(mean.abs() < 0.05, "{mean}");
}

#[test]
fn simplex_noise_is_deterministic() {
    let mut a = SimplexNoise::<SR>::new(77);
    let mut b = SimplexNoise::<SR>::new(77);
    let mut block_a = [0.0; 512];
    let mut block_b = [0.0; 512];
    a.process(&mut block_a);
    b.process(&mut block_b);
    assert_eq!(block_a, block_b);

    let mut other = SimplexNoise::<SR>::new(78);
    let mut block_other = [0.0; 512];
    other.process(&mut block_other);
    assert_ne!(block_a, block_other);
}

#[test]
fn ladder_low_pass_sanity() {
    fn impulse_energy(cutoff: f64) -> f64 {
        let mut filter = MoogLadder::<SR>::new(cutoff, 0.0);
        let mut buffer = vec![0.0; 8192];
        buffer[0] = 0.5;
        filter.process_buffer(&mut buffer);
        buffer.iter().map(|s| s * s).sum()
    }

    let energies: Vec<f64> = [8_000.0, 2_000.0, 500.0, 125.0]
        .into_iter()
        .map(impulse_energy)
        .collect();
    for pair in energies.windows(2) {
        assert!(pair[1] < pair[0], "{energies:?}");
    }

    let mut filter = MoogLadder::<SR>::new(1_500.0, 0.6);
    for _ in 0..256 {
        filter.process_sample(0.8);
    }
    let mut tail = 1.0;
    for _ in 0..48_000 {
        tail = filter.process_sample(0.0);
    }
    assert!(tail.abs() < 1e-6, "{tail}");
}

#[test]
fn filtered_sawtooth_loses_energy_at_low_cutoff() {
    fn rms(cutoff: f64) -> f64 {
        let osc = Wavetable::<SR>::sawtooth(512).with_frequency(220.0);
        let mut voice = osc.through(MoogLadder::<SR>::new(cutoff, 0.2));
        let mut block = [0.0; 4800];
        voice.process(&mut block);
        (block[2400..].iter().map(|s| s * s).sum::<f64>() / 2400.0).sqrt()
    }

    assert!(rms(300.0) < rms(6000.0));
}

#[test]
fn replace_section_streams_blocks_into_table() {
    let mut osc = Wavetable::<SR>::new(16).with_amplitude(1.0);
    let block = [0.25; 4];

    for section in 0..4 {
        osc.replace_section(section, 4, &block);
    }
    assert!(osc.table().iter().all(|&s| s == 0.25));

    // Rejected: out of range and wrong size
    osc.replace_section(4, 4, &[1.0; 4]);
    osc.replace_section(0, 4, &[1.0; 5]);
    assert!(osc.table().iter().all(|&s| s == 0.25));
    assert_eq!(osc.next_sample(), 0.25);
}

#[test]
fn noise_bank_switches_sources() {
    let mut bank = Noise::<SR>::with_seed(9);
    for noise_type in NoiseType::ALL {
        bank.set_type(noise_type);
        let mut block = [0.0; 1024];
        bank.process(&mut block);
        assert!(block.iter().all(|s| s.is_finite()), "{noise_type:?}");
        assert!(block.iter().any(|&s| s != 0.0), "{noise_type:?}");
    }

    bank.set_type(NoiseType::Simplex);
    bank.simplex_mut().set_step(0.0005);
    let smooth: Vec<f64> = (0..256).map(|_| bank.next_sample()).collect();
    for pair in smooth.windows(2) {
        assert!((pair[1] - pair[0]).abs() < 0.05);
    }
}
