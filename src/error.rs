//! Error types for chunkscribe.
//!
//! These are the fatal (run-aborting) errors. Per-chunk backend failures
//! live in [`crate::stt::transcriber::TranscribeError`] and never surface
//! here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkscribeError {
    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    // Audio source errors
    #[error("Failed to open audio file {path}: {message}")]
    AudioOpen { path: String, message: String },

    #[error("Failed to decode audio: {message}")]
    AudioDecode { message: String },

    #[error("Invalid audio duration: {duration}")]
    InvalidDuration { duration: f64 },

    // Transcription backend setup errors
    #[error("Transcription model not found at {path}")]
    TranscriptionModelNotFound { path: String },

    #[error("Transcription inference failed: {message}")]
    TranscriptionInferenceFailed { message: String },

    // Result assembly errors
    #[error("Result slot {index} was already filled")]
    SlotAlreadyFilled { index: usize },

    #[error("Result slot {index} is out of range (run has {len} chunks)")]
    SlotOutOfRange { index: usize, len: usize },

    // Output errors
    #[error("Failed to write transcription to {path}: {message}")]
    OutputWrite { path: String, message: String },
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ChunkscribeError>;
