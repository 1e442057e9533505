//! chunkscribe - Chunked transcription of long recordings
//!
//! Splits audio into duration-tiered chunks, transcribes them sequentially
//! or concurrently, and reassembles the text in chronological order.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod stt;

// Composition root - needs everything
#[cfg(feature = "cli")]
pub mod app;

// Core traits (source → transcribe → report)
pub use audio::source::AudioSource;
pub use output::StatusReporter;
pub use stt::transcriber::Transcriber;

// Pipeline
pub use pipeline::assembler::FailurePolicy;
pub use pipeline::orchestrator::{Pipeline, PipelineConfig, TranscriptionOutcome};
pub use pipeline::types::SchedulingMode;

// Error handling
pub use error::{ChunkscribeError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
