//! WAV file audio source.

use crate::audio::source::{AudioSource, sample_range};
use crate::defaults::SAMPLE_RATE;
use crate::error::{ChunkscribeError, Result};
use crate::pipeline::planner::ChunkDescriptor;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Audio source that decodes a whole WAV file up front.
/// Supports arbitrary sample rates and channel counts, resampling to 16kHz mono.
#[derive(Debug, Clone)]
pub struct WavAudioSource {
    samples: Vec<i16>,
}

impl WavAudioSource {
    /// Open and decode a WAV file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ChunkscribeError::AudioOpen {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_reader(Box::new(BufReader::new(file)))
    }

    /// Create from any reader (for testing/flexibility).
    pub fn from_reader(reader: Box<dyn Read + Send>) -> Result<Self> {
        let wav_reader =
            hound::WavReader::new(reader).map_err(|e| ChunkscribeError::AudioDecode {
                message: format!("Failed to parse WAV file: {}", e),
            })?;

        let spec = wav_reader.spec();
        if spec.channels == 0 {
            return Err(ChunkscribeError::AudioDecode {
                message: "WAV file declares zero channels".to_string(),
            });
        }

        let raw_samples = read_samples(wav_reader)?;
        let mono_samples = downmix(raw_samples, spec.channels);

        let samples = if spec.sample_rate != SAMPLE_RATE {
            resample(&mono_samples, spec.sample_rate, SAMPLE_RATE)
        } else {
            mono_samples
        };

        Ok(Self { samples })
    }

    /// Number of 16kHz mono samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consume the source and return all samples as a single buffer.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

impl AudioSource for WavAudioSource {
    fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / SAMPLE_RATE as f64
    }

    fn segment(&self, chunk: &ChunkDescriptor) -> Result<Vec<i16>> {
        let (start, end) = sample_range(chunk, self.samples.len());
        Ok(self.samples[start..end].to_vec())
    }
}

/// Read every sample as 16-bit PCM, converting float WAVs.
fn read_samples<R: Read>(mut reader: hound::WavReader<R>) -> Result<Vec<i16>> {
    let spec = reader.spec();
    let decoded = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, _) => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
            .collect::<std::result::Result<Vec<_>, _>>(),
        (hound::SampleFormat::Int, bits) if bits <= 16 => {
            // Narrow formats are widened to full 16-bit scale.
            let shift = 16 - bits;
            reader
                .samples::<i16>()
                .map(|s| s.map(|v| v << shift))
                .collect::<std::result::Result<Vec<_>, _>>()
        }
        (hound::SampleFormat::Int, bits) => {
            let shift = bits - 16;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| (v >> shift) as i16))
                .collect::<std::result::Result<Vec<_>, _>>()
        }
    };

    decoded.map_err(|e| ChunkscribeError::AudioDecode {
        message: format!("Failed to read WAV samples: {}", e),
    })
}

/// Average interleaved channels into one.
fn downmix(samples: Vec<i16>, channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples;
    }
    samples
        .chunks_exact(channels as usize)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}

/// Simple linear interpolation resampling.
fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = (source_pos.floor() as usize).min(samples.len() - 1);
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}
