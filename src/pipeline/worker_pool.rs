//! Bounded worker pool that runs one backend call per chunk.
//!
//! Workers are scoped threads pulling [`ChunkJob`]s from a shared crossbeam
//! queue and pushing [`ChunkResult`]s back to the calling thread, which is
//! the only place results are consumed. Sequential mode is the same pool
//! with a single worker, so results arrive strictly in chunk order.
//!
//! Each chunk is isolated: backend errors become a [`ChunkOutcome`], and a
//! panic inside the backend is caught and recorded as
//! [`ChunkOutcome::UnexpectedError`] without disturbing other chunks.

use crate::error::Result;
use crate::pipeline::types::{ChunkJob, ChunkOutcome, ChunkResult, SchedulingMode};
use crate::stt::transcriber::Transcriber;
use crossbeam_channel::{Receiver, Sender};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Instant;

/// Dispatches chunk jobs to worker threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    mode: SchedulingMode,
    max_workers: Option<usize>,
}

impl WorkerPool {
    /// Create a pool. `max_workers` only applies in concurrent mode;
    /// `None` means one worker per chunk.
    pub fn new(mode: SchedulingMode, max_workers: Option<usize>) -> Self {
        Self { mode, max_workers }
    }

    pub fn sequential() -> Self {
        Self::new(SchedulingMode::Sequential, None)
    }

    pub fn concurrent(max_workers: Option<usize>) -> Self {
        Self::new(SchedulingMode::Concurrent, max_workers)
    }

    pub fn mode(&self) -> SchedulingMode {
        self.mode
    }

    /// Number of threads used for `chunk_count` chunks (at least 1).
    pub fn worker_count(&self, chunk_count: usize) -> usize {
        let wanted = match self.mode {
            SchedulingMode::Sequential => 1,
            SchedulingMode::Concurrent => self.max_workers.unwrap_or(chunk_count),
        };
        wanted.clamp(1, chunk_count.max(1))
    }

    /// Transcribe every job, calling `on_result` on the current thread as
    /// each result arrives.
    ///
    /// Returns once every job has produced a result. If `on_result` returns
    /// an error, no further results are delivered: in-flight chunks finish,
    /// queued chunks are abandoned, and the error is returned.
    pub fn run<F>(&self, jobs: Vec<ChunkJob>, transcriber: &dyn Transcriber, mut on_result: F) -> Result<()>
    where
        F: FnMut(ChunkResult) -> Result<()>,
    {
        let workers = self.worker_count(jobs.len());
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<ChunkJob>();
        let (result_tx, result_rx) = crossbeam_channel::unbounded::<ChunkResult>();

        for job in jobs {
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx);

        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || worker_loop(transcriber, job_rx, result_tx));
            }
            drop(result_tx);

            // Owned by the closure so an early return hangs up on the workers.
            let results = result_rx;
            for result in results.iter() {
                on_result(result)?;
            }
            Ok(())
        })
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::concurrent(None)
    }
}

fn worker_loop(transcriber: &dyn Transcriber, jobs: Receiver<ChunkJob>, results: Sender<ChunkResult>) {
    for job in jobs.iter() {
        let result = transcribe_chunk(transcriber, &job);
        if results.send(result).is_err() {
            // Coordinator stopped listening.
            break;
        }
    }
}

/// Run the backend for one chunk, converting every failure into an outcome.
pub fn transcribe_chunk(transcriber: &dyn Transcriber, job: &ChunkJob) -> ChunkResult {
    let index = job.descriptor.index;
    let start = Instant::now();

    // Nothing to recognize in a zero-length boundary chunk.
    let outcome = if job.samples.is_empty() {
        ChunkOutcome::Unrecognized
    } else {
        match panic::catch_unwind(AssertUnwindSafe(|| transcriber.transcribe(&job.samples))) {
            Ok(result) => ChunkOutcome::from(result),
            Err(payload) => ChunkOutcome::UnexpectedError(panic_message(payload.as_ref())),
        }
    };

    ChunkResult {
        index,
        outcome,
        elapsed: start.elapsed(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("backend panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("backend panicked: {}", message)
    } else {
        "backend panicked".to_string()
    }
}
