//! Reassembles chunk results into chronological order.
//!
//! The assembler owns one write-once slot per planned chunk. Results may be
//! recorded in any order; [`ResultAssembler::finalize`] always joins them by
//! chunk index.

use crate::error::{ChunkscribeError, Result};
use crate::pipeline::types::{ChunkOutcome, ChunkResult};
use serde::{Deserialize, Serialize};

/// What to put in the transcript for a chunk whose backend call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Leave failed chunks out of the transcript.
    #[default]
    Omit,
    /// Insert a bracketed marker such as `[chunk 3: backend error: timeout]`.
    Placeholder,
}

/// Fixed-size, write-once slot storage keyed by chunk index.
#[derive(Debug, Clone)]
pub struct ResultAssembler {
    slots: Vec<Option<ChunkOutcome>>,
    policy: FailurePolicy,
}

impl ResultAssembler {
    /// Create an assembler with exactly `chunk_count` empty slots.
    pub fn new(chunk_count: usize, policy: FailurePolicy) -> Self {
        Self {
            slots: vec![None; chunk_count],
            policy,
        }
    }

    /// Store `result` in its slot.
    ///
    /// # Errors
    /// `SlotOutOfRange` if the index is past the planned chunk count,
    /// `SlotAlreadyFilled` if the slot was written before.
    pub fn record(&mut self, result: ChunkResult) -> Result<()> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(result.index)
            .ok_or(ChunkscribeError::SlotOutOfRange {
                index: result.index,
                len,
            })?;

        if slot.is_some() {
            return Err(ChunkscribeError::SlotAlreadyFilled {
                index: result.index,
            });
        }
        *slot = Some(result.outcome);
        Ok(())
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots that have been written.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Number of chunks that produced text.
    pub fn succeeded(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|outcome| outcome.is_success())
            .count()
    }

    /// Every recorded non-success outcome, in chunk order.
    pub fn failures(&self) -> Vec<(usize, &ChunkOutcome)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|outcome| (index, outcome)))
            .filter(|(_, outcome)| !outcome.is_success())
            .collect()
    }

    /// Join slot texts in index order with single spaces.
    ///
    /// Unfilled slots, empty texts and unrecognized chunks are skipped.
    /// Backend and unexpected errors follow the [`FailurePolicy`].
    pub fn finalize(&self) -> String {
        let pieces: Vec<String> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot.as_ref()? {
                ChunkOutcome::Success(text) if !text.is_empty() => Some(text.clone()),
                ChunkOutcome::Success(_) | ChunkOutcome::Unrecognized => None,
                failure => match self.policy {
                    FailurePolicy::Omit => None,
                    FailurePolicy::Placeholder => Some(format!("[chunk {}: {}]", index + 1, failure)),
                },
            })
            .collect();

        pieces.join(" ")
    }
}
