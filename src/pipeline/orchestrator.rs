//! End-to-end transcription run: source → plan → pool → assembler → file.

use crate::audio::source::AudioSource;
use crate::audio::wav::WavAudioSource;
use crate::error::{ChunkscribeError, Result};
use crate::output::{RunEvent, StatusReporter};
use crate::pipeline::assembler::{FailurePolicy, ResultAssembler};
use crate::pipeline::planner::{self, ChunkPlan};
use crate::pipeline::progress::ProgressReporter;
use crate::pipeline::types::{ChunkJob, ChunkOutcome, ChunkResult, SchedulingMode};
use crate::pipeline::worker_pool::WorkerPool;
use crate::stt::transcriber::Transcriber;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Configuration for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// Sequential or concurrent dispatch
    pub mode: SchedulingMode,
    /// Upper bound on concurrent workers (None = one per chunk)
    pub workers: Option<usize>,
    /// What failed chunks contribute to the transcript
    pub failure_policy: FailurePolicy,
}

impl PipelineConfig {
    pub fn pool(&self) -> WorkerPool {
        WorkerPool::new(self.mode, self.workers)
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionOutcome {
    /// Joined transcript (possibly empty).
    pub text: String,
    pub total_chunks: usize,
    pub succeeded: usize,
    /// Non-success outcomes by chunk index, in index order.
    pub failures: Vec<(usize, ChunkOutcome)>,
    /// Where the transcript was written, if it was non-empty.
    pub output_written: Option<PathBuf>,
    pub elapsed: Duration,
}

/// Drives one transcription run.
///
/// The backend and reporter are injected, so no state is shared between
/// runs other than what the caller passes in.
pub struct Pipeline<'a> {
    transcriber: &'a dyn Transcriber,
    reporter: &'a dyn StatusReporter,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        transcriber: &'a dyn Transcriber,
        reporter: &'a dyn StatusReporter,
        config: PipelineConfig,
    ) -> Self {
        Self {
            transcriber,
            reporter,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Transcribe the WAV file at `input` into `output`.
    pub fn run(&self, input: &Path, output: &Path) -> Result<TranscriptionOutcome> {
        let source = WavAudioSource::open(input)?;
        self.run_source(&source, &display_name(input), output)
    }

    /// Transcribe an already opened source into `output`.
    ///
    /// `input_name` is only used for reporting.
    pub fn run_source(
        &self,
        source: &dyn AudioSource,
        input_name: &str,
        output: &Path,
    ) -> Result<TranscriptionOutcome> {
        check_output_writable(output)?;
        let started = Instant::now();

        let plan = planner::plan(source.duration_secs())?;
        let jobs = extract_jobs(source, &plan)?;
        let pool = self.config.pool();

        self.reporter.report(&RunEvent::Started {
            input: input_name.to_string(),
            output: display_name(output),
            total_chunks: plan.len(),
            mode: pool.mode(),
            workers: pool.worker_count(plan.len()),
        });

        let mut assembler = ResultAssembler::new(plan.len(), self.config.failure_policy);
        let mut progress = ProgressReporter::started_at(pool.mode(), plan.len(), started);

        pool.run(jobs, self.transcriber, |result| {
            self.report_chunk(&result);
            let index = result.index;
            assembler.record(result)?;
            let update = progress.on_chunk_complete(index);
            self.reporter.report(&RunEvent::Progress(update));
            Ok(())
        })?;

        let text = assembler.finalize();
        let output_written = if text.is_empty() {
            self.reporter.report(&RunEvent::NothingToWrite);
            None
        } else {
            write_transcript(output, &text)?;
            self.reporter.report(&RunEvent::Saved {
                path: output.to_path_buf(),
            });
            Some(output.to_path_buf())
        };

        let failures: Vec<(usize, ChunkOutcome)> = assembler
            .failures()
            .into_iter()
            .map(|(index, outcome)| (index, outcome.clone()))
            .collect();
        let elapsed = started.elapsed();

        self.reporter.report(&RunEvent::Summary {
            succeeded: assembler.succeeded(),
            failed: failures.len(),
            elapsed,
        });

        Ok(TranscriptionOutcome {
            text,
            total_chunks: plan.len(),
            succeeded: assembler.succeeded(),
            failures,
            output_written,
            elapsed,
        })
    }

    fn report_chunk(&self, result: &ChunkResult) {
        match &result.outcome {
            ChunkOutcome::Success(text) => self.reporter.report(&RunEvent::ChunkTranscribed {
                index: result.index,
                text: text.clone(),
                elapsed: result.elapsed,
            }),
            failure => self.reporter.report(&RunEvent::ChunkFailed {
                index: result.index,
                outcome: failure.clone(),
            }),
        }
    }
}

/// Cut every planned chunk out of the source, in order, on the calling thread.
pub fn extract_jobs(source: &dyn AudioSource, plan: &ChunkPlan) -> Result<Vec<ChunkJob>> {
    plan.chunks()
        .iter()
        .map(|descriptor| {
            Ok(ChunkJob {
                descriptor: *descriptor,
                samples: source.segment(descriptor)?,
            })
        })
        .collect()
}

/// Write (or overwrite) the transcript file.
pub fn write_transcript(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|e| ChunkscribeError::OutputWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Default output path: the input path with a `.txt` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(crate::defaults::OUTPUT_EXTENSION)
}

/// Fail before any transcription work if `output` cannot be written.
///
/// An existing file is opened for append so its contents stay intact until
/// the transcript replaces them. A new file is created and removed again.
fn check_output_writable(output: &Path) -> Result<()> {
    let unwritable = |message: String| ChunkscribeError::OutputWrite {
        path: output.display().to_string(),
        message,
    };

    if output.is_dir() {
        return Err(unwritable("path is a directory".to_string()));
    }

    if output.exists() {
        return OpenOptions::new()
            .append(true)
            .create(false)
            .open(output)
            .map(|_| ())
            .map_err(|e| unwritable(e.to_string()));
    }

    if let Some(dir) = output.parent().filter(|p| !p.as_os_str().is_empty())
        && !dir.is_dir()
    {
        return Err(unwritable(format!("directory {} does not exist", dir.display())));
    }

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(output)
        .map_err(|e| unwritable(e.to_string()))?;
    fs::remove_file(output).map_err(|e| unwritable(e.to_string()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
