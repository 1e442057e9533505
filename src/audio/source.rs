use crate::defaults;
use crate::error::Result;
use crate::pipeline::planner::ChunkDescriptor;

/// A decoded recording that can be cut into chunk segments.
///
/// This trait allows swapping implementations (WAV file vs in-memory samples).
/// Sources are immutable once opened: the duration never changes and the same
/// descriptor always yields the same samples.
pub trait AudioSource: Send {
    /// Total duration of the recording in seconds.
    fn duration_secs(&self) -> f64;

    /// Extract the samples covered by `chunk` (16-bit PCM, 16kHz mono).
    ///
    /// A zero-length chunk yields an empty buffer.
    fn segment(&self, chunk: &ChunkDescriptor) -> Result<Vec<i16>>;
}

/// Sample range `[start, end)` covered by `chunk`, clamped to `total_samples`.
pub fn sample_range(chunk: &ChunkDescriptor, total_samples: usize) -> (usize, usize) {
    let rate = defaults::SAMPLE_RATE as f64;
    let start = ((chunk.start_offset * rate).round() as usize).min(total_samples);
    let end = ((chunk.end_offset() * rate).round() as usize).clamp(start, total_samples);
    (start, end)
}

/// Audio source over samples already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAudioSource {
    samples: Vec<i16>,
}

impl MemoryAudioSource {
    /// Wrap 16kHz mono samples.
    pub fn new(samples: Vec<i16>) -> Self {
        Self { samples }
    }
}

impl AudioSource for MemoryAudioSource {
    fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / defaults::SAMPLE_RATE as f64
    }

    fn segment(&self, chunk: &ChunkDescriptor) -> Result<Vec<i16>> {
        let (start, end) = sample_range(chunk, self.samples.len());
        Ok(self.samples[start..end].to_vec())
    }
}
