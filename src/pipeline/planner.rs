//! Duration-based chunk planning.
//!
//! Splits a recording of known duration into contiguous, fixed-size chunks.
//! The chunk size is picked from [`defaults::CHUNK_SIZE_TIERS`] so long
//! recordings produce a manageable number of backend calls.
//!
//! The chunk count is `floor(duration / chunk_size) + 1`. When the duration
//! is an exact multiple of the chunk size this yields one trailing
//! zero-length chunk; the plan keeps it so chunk numbering stays stable, and
//! the worker pool completes it without calling the backend.

use crate::defaults;
use crate::error::{ChunkscribeError, Result};

/// One contiguous span of the recording.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkDescriptor {
    /// Zero-based position in the plan.
    pub index: usize,
    /// Start of the chunk in seconds from the beginning of the recording.
    pub start_offset: f64,
    /// Length of the chunk in seconds.
    pub length: f64,
}

impl ChunkDescriptor {
    /// End of the chunk in seconds (exclusive).
    pub fn end_offset(&self) -> f64 {
        self.start_offset + self.length
    }

    /// True for the trailing boundary chunk that covers no audio.
    pub fn is_empty(&self) -> bool {
        self.length <= 0.0
    }
}

/// Ordered chunk boundaries for one recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkPlan {
    total_duration: f64,
    chunk_size: f64,
    chunks: Vec<ChunkDescriptor>,
}

impl ChunkPlan {
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Nominal chunk size in seconds.
    pub fn chunk_size(&self) -> f64 {
        self.chunk_size
    }

    pub fn chunks(&self) -> &[ChunkDescriptor] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Always false: every plan has at least one chunk.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChunkPlan {
    type Item = &'a ChunkDescriptor;
    type IntoIter = std::slice::Iter<'a, ChunkDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

/// Upper bound on chunks in one plan (about nine years of audio).
pub const MAX_CHUNKS: usize = 1_000_000;

/// Chunk size in seconds for a recording of `total_duration` seconds.
pub fn chunk_size_for(total_duration: f64) -> f64 {
    defaults::CHUNK_SIZE_TIERS
        .iter()
        .find(|(bound, _)| total_duration <= *bound)
        .map(|&(_, size)| size)
        .unwrap_or(defaults::LONG_RECORDING_CHUNK_SECS)
}

/// Plan the chunks for a recording of `total_duration` seconds.
///
/// # Errors
/// Returns `ChunkscribeError::InvalidDuration` for negative or non-finite
/// durations, and for durations that would need more than [`MAX_CHUNKS`].
pub fn plan(total_duration: f64) -> Result<ChunkPlan> {
    if !total_duration.is_finite() || total_duration < 0.0 {
        return Err(ChunkscribeError::InvalidDuration {
            duration: total_duration,
        });
    }

    let chunk_size = chunk_size_for(total_duration);
    let full_chunks = (total_duration / chunk_size).floor();
    let count = if full_chunks < MAX_CHUNKS as f64 {
        (full_chunks as usize).checked_add(1)
    } else {
        None
    }
    .ok_or(ChunkscribeError::InvalidDuration {
        duration: total_duration,
    })?;

    let chunks = (0..count)
        .map(|index| {
            let start_offset = index as f64 * chunk_size;
            let length = chunk_size.min(total_duration - start_offset).max(0.0);
            ChunkDescriptor {
                index,
                start_offset,
                length,
            }
        })
        .collect();

    Ok(ChunkPlan {
        total_duration,
        chunk_size,
        chunks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(plan: &ChunkPlan) -> Vec<f64> {
        plan.chunks().iter().map(|c| c.length).collect()
    }

    /// Chunks must tile [0, duration) with no gaps or overlaps.
    fn assert_partitions(plan: &ChunkPlan) {
        let mut cursor = 0.0;
        for (i, chunk) in plan.chunks().iter().enumerate() {
            assert_eq!(chunk.index, i, "indices must be sequential");
            assert!(
                (chunk.start_offset - cursor).abs() < 1e-9,
                "gap or overlap before chunk {}: expected start {}, got {}",
                i,
                cursor,
                chunk.start_offset
            );
            assert!(chunk.length >= 0.0);
            assert!(chunk.length <= plan.chunk_size());
            cursor = chunk.end_offset();
        }
        assert!(
            (cursor - plan.total_duration()).abs() < 1e-9,
            "plan ends at {} but duration is {}",
            cursor,
            plan.total_duration()
        );
    }

    #[test]
    fn test_chunk_size_tiers_have_exact_breakpoints() {
        assert_eq!(chunk_size_for(0.0), 30.0);
        assert_eq!(chunk_size_for(300.0), 30.0);
        assert_eq!(chunk_size_for(300.5), 60.0);
        assert_eq!(chunk_size_for(900.0), 60.0);
        assert_eq!(chunk_size_for(900.1), 120.0);
        assert_eq!(chunk_size_for(1800.0), 120.0);
        assert_eq!(chunk_size_for(1800.1), 300.0);
        assert_eq!(chunk_size_for(36_000.0), 300.0);
    }

    #[test]
    fn test_ninety_five_seconds_gives_four_chunks() {
        let plan = plan(95.0).unwrap();
        assert_eq!(plan.chunk_size(), 30.0);
        assert_eq!(plan.len(), 4);
        assert_eq!(lengths(&plan), vec![30.0, 30.0, 30.0, 5.0]);
        assert_partitions(&plan);
    }

    #[test]
    fn test_zero_duration_gives_one_empty_chunk() {
        let plan = plan(0.0).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.chunks()[0].start_offset, 0.0);
        assert!(plan.chunks()[0].is_empty());
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_exact_multiple_keeps_trailing_zero_length_chunk() {
        let plan = plan(90.0).unwrap();
        assert_eq!(plan.len(), 4);
        assert_eq!(lengths(&plan), vec![30.0, 30.0, 30.0, 0.0]);
        assert!(plan.chunks()[3].is_empty());
        assert_eq!(plan.chunks()[3].start_offset, 90.0);
        assert_partitions(&plan);
    }

    #[test]
    fn test_only_the_boundary_chunk_can_be_empty() {
        for duration in [1.0, 29.9, 30.0, 95.0, 299.0, 300.0, 301.0, 899.5, 1799.0, 4000.0] {
            let plan = plan(duration).unwrap();
            assert_partitions(&plan);
            let (last, rest) = plan.chunks().split_last().unwrap();
            assert!(rest.iter().all(|c| c.length > 0.0), "duration {}", duration);
            assert!(last.length <= plan.chunk_size());
            assert_eq!(
                plan.len(),
                (duration / plan.chunk_size()).floor() as usize + 1,
                "duration {}",
                duration
            );
        }
    }

    #[test]
    fn test_long_recording_uses_five_minute_chunks() {
        let plan = plan(3700.0).unwrap();
        assert_eq!(plan.chunk_size(), 300.0);
        assert_eq!(plan.len(), 13);
        assert_eq!(plan.chunks()[12].length, 100.0);
        assert_partitions(&plan);
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        match plan(-1.0) {
            Err(ChunkscribeError::InvalidDuration { duration }) => assert_eq!(duration, -1.0),
            other => panic!("Expected InvalidDuration, got {:?}", other),
        }
    }

    #[test]
    fn test_unrepresentable_duration_is_rejected() {
        for duration in [f64::MAX, 1e300, MAX_CHUNKS as f64 * 300.0] {
            match plan(duration) {
                Err(ChunkscribeError::InvalidDuration { duration: d }) => assert_eq!(d, duration),
                other => panic!("Expected InvalidDuration for {}, got {:?}", duration, other),
            }
        }
    }

    #[test]
    fn test_largest_supported_duration_plans_max_chunks() {
        let plan = plan((MAX_CHUNKS - 1) as f64 * 300.0 + 12.0).unwrap();
        assert_eq!(plan.len(), MAX_CHUNKS);
        assert_eq!(plan.chunks()[MAX_CHUNKS - 1].length, 12.0);
    }

    #[test]
    fn test_non_finite_duration_is_rejected() {
        assert!(plan(f64::NAN).is_err());
        assert!(plan(f64::INFINITY).is_err());
    }

    #[test]
    fn test_plan_iterates_in_index_order() {
        let plan = plan(200.0).unwrap();
        let indices: Vec<usize> = (&plan).into_iter().map(|c| c.index).collect();
        assert_eq!(indices, (0..plan.len()).collect::<Vec<_>>());
    }
}
