//! Speech-to-text backends.

pub mod transcriber;
pub mod whisper;

pub use transcriber::{FnTranscriber, MockTranscriber, TranscribeError, TranscribeResult, Transcriber};
pub use whisper::{WhisperConfig, WhisperTranscriber};
