//! Data types shared by the chunk pipeline.

use crate::pipeline::planner::ChunkDescriptor;
use crate::stt::transcriber::{TranscribeError, TranscribeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How chunks are dispatched to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SchedulingMode {
    /// One chunk in flight at a time; results arrive in chunk order.
    Sequential,
    /// Several chunks in flight; results arrive in any order.
    #[default]
    Concurrent,
}

impl fmt::Display for SchedulingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingMode::Sequential => write!(f, "sequential"),
            SchedulingMode::Concurrent => write!(f, "concurrent"),
        }
    }
}

impl FromStr for SchedulingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(SchedulingMode::Sequential),
            "concurrent" => Ok(SchedulingMode::Concurrent),
            other => Err(format!(
                "unknown scheduling mode '{}' (expected 'sequential' or 'concurrent')",
                other
            )),
        }
    }
}

/// An extracted segment waiting for a worker.
#[derive(Debug, Clone)]
pub struct ChunkJob {
    pub descriptor: ChunkDescriptor,
    /// 16-bit PCM at 16kHz mono.
    pub samples: Vec<i16>,
}

/// What happened to one chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkOutcome {
    Success(String),
    Unrecognized,
    BackendError(String),
    UnexpectedError(String),
}

impl ChunkOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ChunkOutcome::Success(_))
    }

    /// Text for the success case.
    pub fn text(&self) -> Option<&str> {
        match self {
            ChunkOutcome::Success(text) => Some(text),
            _ => None,
        }
    }
}

impl From<TranscribeResult> for ChunkOutcome {
    fn from(result: TranscribeResult) -> Self {
        match result {
            Ok(text) => ChunkOutcome::Success(text.trim().to_string()),
            Err(TranscribeError::Unrecognized) => ChunkOutcome::Unrecognized,
            Err(TranscribeError::Backend { message }) => ChunkOutcome::BackendError(message),
            Err(TranscribeError::Unexpected { message }) => ChunkOutcome::UnexpectedError(message),
        }
    }
}

impl fmt::Display for ChunkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkOutcome::Success(text) => write!(f, "{}", text),
            ChunkOutcome::Unrecognized => write!(f, "could not understand the audio"),
            ChunkOutcome::BackendError(message) => write!(f, "backend error: {}", message),
            ChunkOutcome::UnexpectedError(message) => write!(f, "unexpected error: {}", message),
        }
    }
}

/// Result of transcribing one chunk, produced by a worker.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkResult {
    pub index: usize,
    pub outcome: ChunkOutcome,
    /// Wall-clock time the worker spent on this chunk.
    pub elapsed: Duration,
}

impl ChunkResult {
    pub fn new(index: usize, outcome: ChunkOutcome) -> Self {
        Self {
            index,
            outcome,
            elapsed: Duration::ZERO,
        }
    }
}
