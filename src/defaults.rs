//! Default configuration constants for chunkscribe.
//!
//! Shared by the config layer, the chunk planner and the audio decoder so
//! every part of a run agrees on the same numbers.

/// Audio sample rate in Hz that every backend receives.
///
/// 16kHz is the standard for speech recognition; decoded audio is resampled
/// to this rate before it is segmented.
pub const SAMPLE_RATE: u32 = 16000;

/// Chunk-size tiers as `(max_total_duration_secs, chunk_size_secs)`.
///
/// The first tier whose bound is `>=` the recording's duration wins.
/// Recordings longer than the last bound use [`LONG_RECORDING_CHUNK_SECS`].
pub const CHUNK_SIZE_TIERS: &[(f64, f64)] = &[
    // 5 minutes or less
    (300.0, 30.0),
    // up to 15 minutes
    (900.0, 60.0),
    // up to 30 minutes
    (1800.0, 120.0),
];

/// Chunk size for recordings longer than every tier in [`CHUNK_SIZE_TIERS`].
pub const LONG_RECORDING_CHUNK_SECS: f64 = 300.0;

/// Default Whisper model path.
pub const DEFAULT_MODEL: &str = "models/ggml-base.bin";

/// Default language code for transcription.
///
/// "auto" lets Whisper detect the spoken language automatically.
pub const DEFAULT_LANGUAGE: &str = "auto";

/// Language value that triggers automatic language detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Extension used for the output artifact when no output path is given.
pub const OUTPUT_EXTENSION: &str = "txt";

/// Report the GPU backend compiled into this build.
///
/// Returns a human-readable name based on the compile-time feature flags.
/// If no GPU backend is enabled, returns "CPU".
pub fn gpu_backend() -> &'static str {
    if cfg!(feature = "cuda") {
        "CUDA"
    } else if cfg!(feature = "vulkan") {
        "Vulkan"
    } else if cfg!(feature = "hipblas") {
        "HipBLAS (AMD)"
    } else if cfg!(feature = "openblas") {
        "OpenBLAS"
    } else {
        "CPU"
    }
}
