use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Ways a single backend call can fail.
///
/// These never abort a run: the worker pool turns them into a
/// [`ChunkOutcome`](crate::pipeline::types::ChunkOutcome) for the chunk's slot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscribeError {
    /// Audio was decoded fine but nothing was recognized.
    #[error("could not understand the audio")]
    Unrecognized,

    /// The backend or the service behind it failed.
    #[error("backend request failed: {message}")]
    Backend { message: String },

    /// Any other fault while processing the chunk.
    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

pub type TranscribeResult = std::result::Result<String, TranscribeError>;

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real Whisper vs mock).
/// Implementations are shared across worker threads, so they must be
/// `Send + Sync` and must not rely on process-wide mutable state.
pub trait Transcriber: Send + Sync {
    /// Transcribe audio samples to text.
    ///
    /// # Arguments
    /// * `audio` - Audio samples as 16-bit PCM at 16kHz mono
    ///
    /// # Returns
    /// Transcribed text, or the kind of failure that occurred
    fn transcribe(&self, audio: &[i16]) -> TranscribeResult;

    /// Get the name of the loaded model
    fn model_name(&self) -> &str;

    /// Check if the transcriber is ready
    fn is_ready(&self) -> bool;
}

/// Implement Transcriber for Arc<T> to allow sharing across runs.
impl<T: Transcriber + ?Sized> Transcriber for Arc<T> {
    fn transcribe(&self, audio: &[i16]) -> TranscribeResult {
        (**self).transcribe(audio)
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

/// Mock transcriber for testing
#[derive(Debug)]
pub struct MockTranscriber {
    model_name: String,
    response: String,
    failure: Option<TranscribeError>,
    calls: AtomicUsize,
}

impl MockTranscriber {
    /// Create a new mock transcriber with default settings
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            response: "mock transcription".to_string(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Configure the mock to return a specific response
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to fail every call with a backend error
    pub fn with_failure(self) -> Self {
        self.with_error(TranscribeError::Backend {
            message: "mock transcription failure".to_string(),
        })
    }

    /// Configure the mock to fail every call with `error`
    pub fn with_error(mut self, error: TranscribeError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Number of times `transcribe` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, _audio: &[i16]) -> TranscribeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(self.response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        self.failure.is_none()
    }
}

/// Transcriber backed by a closure.
///
/// Handy for tests and benchmarks that need the response to depend on the
/// audio it receives (e.g. failing only one particular chunk).
pub struct FnTranscriber<F> {
    model_name: String,
    func: F,
}

impl<F> FnTranscriber<F>
where
    F: Fn(&[i16]) -> TranscribeResult + Send + Sync,
{
    pub fn new(model_name: &str, func: F) -> Self {
        Self {
            model_name: model_name.to_string(),
            func,
        }
    }
}

impl<F> Transcriber for FnTranscriber<F>
where
    F: Fn(&[i16]) -> TranscribeResult + Send + Sync,
{
    fn transcribe(&self, audio: &[i16]) -> TranscribeResult {
        (self.func)(audio)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        true
    }
}
