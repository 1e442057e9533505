//! Chunked transcription pipeline.
//!
//! plan → extract segments → worker pool → ordered assembler → output file,
//! with a progress reporter observing every completion.

pub mod assembler;
pub mod orchestrator;
pub mod planner;
pub mod progress;
pub mod types;
pub mod worker_pool;

pub use assembler::{FailurePolicy, ResultAssembler};
pub use orchestrator::{Pipeline, PipelineConfig, TranscriptionOutcome};
pub use planner::{ChunkDescriptor, ChunkPlan, chunk_size_for, plan};
pub use progress::{ProgressReporter, ProgressUpdate, format_time};
pub use types::{ChunkJob, ChunkOutcome, ChunkResult, SchedulingMode};
pub use worker_pool::WorkerPool;
