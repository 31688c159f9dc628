//! Phase cue playback.
//!
//! [`CueBank`] holds one decoded sample buffer per phase, either loaded from
//! the WAV files named in the config or synthesized in-process. [`CuePlayer`]
//! owns a single cpal output stream and mixes currently-playing cues in the
//! device callback; `play` is fire-and-forget and overlapping cues sum.
//!
//! Audio is strictly optional: any failure here is reported as an error and
//! the caller keeps running silent.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use cpal::SampleFormat;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use respira_core::session::Phase;
use tracing::warn;

/// Cue length when synthesizing tones.
const TONE_SECS: f32 = 0.4;

/// Sample rate used for synthesized cues.
const SYNTH_RATE: u32 = 44_100;

// Tone frequencies per phase: rising for inspire, sustained-high for hold,
// falling-low for expire.
const INSPIRE_HZ: f32 = 523.25; // C5
const HOLD_HZ: f32 = 659.25; // E5
const EXPIRE_HZ: f32 = 392.0; // G4

/// Decoded mono cues at a single sample rate, pre-scaled by the configured
/// volume.
pub struct CueBank {
    inspire: Arc<Vec<f32>>,
    hold: Arc<Vec<f32>>,
    expire: Arc<Vec<f32>>,
}

impl CueBank {
    /// Builds the bank at `sample_rate`, loading each configured WAV file and
    /// falling back to a synthesized tone for phases without one.
    pub fn load(config: &respira_core::config::Config, sample_rate: u32) -> Self {
        let volume = config.volume;
        let cue = |name: &str, freq: f32| -> Arc<Vec<f32>> {
            let samples = match config.cue_path(name) {
                Some(path) => match load_wav(path, sample_rate) {
                    Ok(samples) => samples,
                    Err(error) => {
                        warn!(cue = name, path = %path.display(), "failed to load cue, using tone: {error:#}");
                        synth_tone(freq, sample_rate)
                    }
                },
                None => synth_tone(freq, sample_rate),
            };
            Arc::new(samples.into_iter().map(|s| s * volume).collect())
        };

        Self {
            inspire: cue("inspire", INSPIRE_HZ),
            hold: cue("hold", HOLD_HZ),
            expire: cue("expire", EXPIRE_HZ),
        }
    }

    fn samples(&self, phase: Phase) -> Arc<Vec<f32>> {
        match phase {
            Phase::Inspire => Arc::clone(&self.inspire),
            Phase::Hold => Arc::clone(&self.hold),
            Phase::Expire => Arc::clone(&self.expire),
        }
    }
}

/// A cue currently being mixed into the output.
struct Voice {
    samples: Arc<Vec<f32>>,
    pos: usize,
}

/// Owns the output stream. Not `Send`: lives on the UI thread for the whole
/// run, like the terminal.
pub struct CuePlayer {
    bank: CueBank,
    voices: Arc<Mutex<Vec<Voice>>>,
    _stream: cpal::Stream,
}

impl CuePlayer {
    /// Opens the default output device and starts a silent stream.
    pub fn new(config: &respira_core::config::Config) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("no audio output device available"))?;
        let supported = device
            .default_output_config()
            .context("failed to query default output config")?;
        if supported.sample_format() != SampleFormat::F32 {
            return Err(anyhow!(
                "unsupported output sample format: {}",
                supported.sample_format()
            ));
        }

        let stream_config: cpal::StreamConfig = supported.config();
        let channels = stream_config.channels as usize;
        let bank = CueBank::load(config, stream_config.sample_rate.0);

        let voices: Arc<Mutex<Vec<Voice>>> = Arc::new(Mutex::new(Vec::new()));
        let callback_voices = Arc::clone(&voices);

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    mix_into(&callback_voices, data, channels);
                },
                |error| warn!("audio stream error: {error}"),
                None,
            )
            .context("failed to open audio output stream")?;
        stream.play().context("failed to start audio stream")?;

        Ok(Self {
            bank,
            voices,
            _stream: stream,
        })
    }

    /// Starts the cue for `phase`. Overlapping cues mix.
    pub fn play(&self, phase: Phase) {
        let samples = self.bank.samples(phase);
        if let Ok(mut voices) = self.voices.lock() {
            voices.push(Voice { samples, pos: 0 });
        }
    }
}

/// Sums active voices into an interleaved output buffer, dropping finished
/// ones. A poisoned lock yields silence.
fn mix_into(voices: &Mutex<Vec<Voice>>, data: &mut [f32], channels: usize) {
    data.fill(0.0);
    let Ok(mut voices) = voices.lock() else {
        return;
    };

    for frame in data.chunks_mut(channels.max(1)) {
        let mut sum = 0.0f32;
        for voice in voices.iter_mut() {
            if let Some(sample) = voice.samples.get(voice.pos) {
                sum += sample;
                voice.pos += 1;
            }
        }
        let sample = sum.clamp(-1.0, 1.0);
        for out in frame {
            *out = sample;
        }
    }

    voices.retain(|voice| voice.pos < voice.samples.len());
}

/// Short sine tone with a hann envelope so cues start and end without clicks.
fn synth_tone(freq: f32, sample_rate: u32) -> Vec<f32> {
    let rate = if sample_rate == 0 { SYNTH_RATE } else { sample_rate };
    let len = (rate as f32 * TONE_SECS) as usize;
    (0..len)
        .map(|i| {
            let t = i as f32 / rate as f32;
            let envelope = {
                let x = i as f32 / len.max(1) as f32;
                0.5 - 0.5 * (std::f32::consts::TAU * x).cos()
            };
            (std::f32::consts::TAU * freq * t).sin() * envelope
        })
        .collect()
}

/// Decodes a WAV file to mono f32 at `target_rate` (nearest-sample resample).
fn load_wav(path: &Path, target_rate: u32) -> Result<Vec<f32>> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .context("bad float sample")?,
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample.clamp(8, 32) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<Result<_, _>>()
                .context("bad int sample")?
        }
    };

    // Mix down to mono.
    let mono: Vec<f32> = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();

    if spec.sample_rate == target_rate || spec.sample_rate == 0 || target_rate == 0 {
        return Ok(mono);
    }

    // Nearest-sample resample. Good enough for sub-second chimes.
    let ratio = f64::from(spec.sample_rate) / f64::from(target_rate);
    let out_len = (mono.len() as f64 / ratio) as usize;
    Ok((0..out_len)
        .map(|i| {
            let src = ((i as f64 * ratio) as usize).min(mono.len().saturating_sub(1));
            mono[src]
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use respira_core::config::Config;

    use super::*;

    #[test]
    fn synth_tone_is_bounded_and_click_free() {
        let tone = synth_tone(INSPIRE_HZ, SYNTH_RATE);
        assert_eq!(tone.len(), (SYNTH_RATE as f32 * TONE_SECS) as usize);
        assert!(tone.iter().all(|s| s.abs() <= 1.0));
        // Envelope silences the endpoints.
        assert!(tone[0].abs() < 1e-3);
        assert!(tone[tone.len() - 1].abs() < 1e-2);
        // And there is actual signal in the middle.
        assert!(tone[tone.len() / 2].abs() + tone[tone.len() / 2 + 20].abs() > 0.01);
    }

    #[test]
    fn bank_scales_by_volume() {
        let mut config = Config::default();
        config.volume = 0.0;
        let bank = CueBank::load(&config, SYNTH_RATE);
        assert!(bank.inspire.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn bank_falls_back_to_tone_for_missing_file() {
        let mut config = Config::default();
        config.cues.hold = Some(std::path::PathBuf::from("/nonexistent/hold.wav"));
        let bank = CueBank::load(&config, SYNTH_RATE);
        assert!(!bank.hold.is_empty());
    }

    #[test]
    fn load_wav_resamples_and_mixes_to_mono() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cue.wav");

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22_050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).expect("writer");
        for _ in 0..2_205 {
            writer.write_sample(8_192i16).expect("sample");
            writer.write_sample(-8_192i16).expect("sample");
        }
        writer.finalize().expect("finalize");

        let samples = load_wav(&path, SYNTH_RATE).expect("load");
        // 0.1s of audio at the target rate, stereo averaged to ~0.
        assert!((samples.len() as i64 - 4_410).abs() <= 2);
        assert!(samples.iter().all(|s| s.abs() < 1e-3));
    }

    #[test]
    fn mixer_sums_voices_and_drops_finished_ones() {
        let voices = Mutex::new(vec![
            Voice {
                samples: Arc::new(vec![0.25, 0.25]),
                pos: 0,
            },
            Voice {
                samples: Arc::new(vec![0.5]),
                pos: 0,
            },
        ]);

        let mut out = [1.0f32; 6]; // stereo, 3 frames
        mix_into(&voices, &mut out, 2);

        assert_eq!(out, [0.75, 0.75, 0.25, 0.25, 0.0, 0.0]);
        assert!(voices.lock().expect("lock").is_empty());
    }
}
