//! Command-line interface for chunkscribe
//!
//! Provides argument parsing using clap derive macros.

use crate::pipeline::types::SchedulingMode;
use clap::Parser;
use std::path::PathBuf;

/// Transcribe long recordings chunk by chunk
#[derive(Parser, Debug)]
#[command(
    name = "chunkscribe",
    version,
    about = "Transcribe long recordings chunk by chunk"
)]
pub struct Cli {
    /// WAV file to transcribe
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the transcript (default: INPUT with a .txt extension)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dispatch chunks one at a time or concurrently
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<SchedulingMode>,

    /// Maximum number of chunks transcribed at once (concurrent mode)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: Option<u64>,

    /// Path to the Whisper model file
    #[arg(long, value_name = "PATH")]
    pub model: Option<String>,

    /// Language code for transcription (default: auto-detect). Examples: auto, en, de, es, fr
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Inference threads per chunk
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: Option<u64>,

    /// Mark failed chunks in the transcript instead of leaving them out
    #[arg(long)]
    pub placeholder_failures: bool,

    /// Suppress output (quiet mode)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (-v: per-chunk text and summary)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
