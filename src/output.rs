//! Console rendering of run events.
//!
//! The orchestrator never prints directly; it emits [`RunEvent`]s to a
//! [`StatusReporter`]. The binary uses [`StderrReporter`], tests use
//! [`CollectorReporter`].

use crate::pipeline::progress::ProgressUpdate;
use crate::pipeline::types::{ChunkOutcome, SchedulingMode};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// Everything a run reports to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Started {
        input: String,
        output: String,
        total_chunks: usize,
        mode: SchedulingMode,
        workers: usize,
    },
    Progress(ProgressUpdate),
    /// A chunk produced text (shown in verbose mode only).
    ChunkTranscribed {
        index: usize,
        text: String,
        elapsed: Duration,
    },
    ChunkFailed {
        index: usize,
        outcome: ChunkOutcome,
    },
    Saved {
        path: PathBuf,
    },
    NothingToWrite,
    Summary {
        succeeded: usize,
        failed: usize,
        elapsed: Duration,
    },
}

/// Trait for receiving run events.
pub trait StatusReporter: Send + Sync {
    fn report(&self, event: &RunEvent);
}

/// One-line message for a failed chunk (1-based chunk numbers).
pub fn failure_line(index: usize, outcome: &ChunkOutcome) -> String {
    let number = index + 1;
    match outcome {
        ChunkOutcome::Unrecognized => format!("Chunk {}: could not understand the audio", number),
        ChunkOutcome::BackendError(message) => {
            format!("Chunk {}: backend request failed; {}", number, message)
        }
        ChunkOutcome::UnexpectedError(message) => format!("Error in chunk {}: {}", number, message),
        ChunkOutcome::Success(_) => format!("Chunk {}: transcribed", number),
    }
}

/// Renders events to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter {
    quiet: bool,
    verbose: u8,
}

impl StderrReporter {
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Plain-text rendering, or `None` when the event is hidden at this verbosity.
    pub fn render(&self, event: &RunEvent) -> Option<String> {
        match event {
            // Failures are always shown, even in quiet mode.
            RunEvent::ChunkFailed { index, outcome } => Some(failure_line(*index, outcome)),
            _ if self.quiet => None,
            RunEvent::Started {
                input,
                output,
                total_chunks,
                mode,
                workers,
            } => {
                let mut text = format!(
                    "\nBeginning transcription of file: {}\nTranscription will be saved to: {}\nTotal Chunks: {}",
                    input, output, total_chunks
                );
                if self.verbose > 0 {
                    text.push_str(&format!("\nScheduling: {} ({} workers)", mode, workers));
                }
                text.push_str("\n\nBeginning...\n\nProgress: 0.00%");
                Some(text)
            }
            RunEvent::Progress(update) => Some(update.to_string()),
            RunEvent::ChunkTranscribed {
                index,
                text,
                elapsed,
            } => (self.verbose > 0).then(|| {
                format!(
                    "  [chunk {} in {:.1}s] {}",
                    index + 1,
                    elapsed.as_secs_f64(),
                    text
                )
            }),
            RunEvent::Saved { path } => Some(format!(
                "Transcription successfully saved to: {}",
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string())
            )),
            RunEvent::NothingToWrite => Some("No transcription available.".to_string()),
            RunEvent::Summary {
                succeeded,
                failed,
                elapsed,
            } => (self.verbose > 0).then(|| {
                format!(
                    "{} chunks transcribed, {} failed in {:.1}s",
                    succeeded,
                    failed,
                    elapsed.as_secs_f64()
                )
            }),
        }
    }
}

impl StatusReporter for StderrReporter {
    fn report(&self, event: &RunEvent) {
        let Some(line) = self.render(event) else {
            return;
        };
        match event {
            RunEvent::ChunkFailed { .. } => eprintln!("{}", line.red()),
            RunEvent::Saved { .. } => eprintln!("{}", line.green()),
            RunEvent::NothingToWrite => eprintln!("{}", line.yellow()),
            RunEvent::ChunkTranscribed { .. } | RunEvent::Summary { .. } => {
                eprintln!("{}", line.dimmed())
            }
            _ => eprintln!("{}", line),
        }
    }
}

/// Reporter that stores events (for testing).
#[derive(Debug, Default)]
pub struct CollectorReporter {
    events: Mutex<Vec<RunEvent>>,
}

impl CollectorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event reported so far.
    pub fn events(&self) -> Vec<RunEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Progress updates in the order they were reported.
    pub fn progress(&self) -> Vec<ProgressUpdate> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                RunEvent::Progress(update) => Some(update),
                _ => None,
            })
            .collect()
    }
}

impl StatusReporter for CollectorReporter {
    fn report(&self, event: &RunEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> RunEvent {
        RunEvent::Started {
            input: "talk.wav".to_string(),
            output: "talk.txt".to_string(),
            total_chunks: 4,
            mode: SchedulingMode::Sequential,
            workers: 1,
        }
    }

    #[test]
    fn test_failure_lines_match_outcome_kind() {
        assert_eq!(
            failure_line(0, &ChunkOutcome::Unrecognized),
            "Chunk 1: could not understand the audio"
        );
        assert_eq!(
            failure_line(1, &ChunkOutcome::BackendError("503".to_string())),
            "Chunk 2: backend request failed; 503"
        );
        assert_eq!(
            failure_line(2, &ChunkOutcome::UnexpectedError("boom".to_string())),
            "Error in chunk 3: boom"
        );
    }

    #[test]
    fn test_started_lists_files_and_chunk_count() {
        let text = StderrReporter::new(false, 0).render(&started()).unwrap();
        assert!(text.contains("Beginning transcription of file: talk.wav"));
        assert!(text.contains("Transcription will be saved to: talk.txt"));
        assert!(text.contains("Total Chunks: 4"));
        assert!(text.ends_with("Progress: 0.00%"));
        assert!(!text.contains("Scheduling"));
    }

    #[test]
    fn test_verbose_started_shows_scheduling() {
        let text = StderrReporter::new(false, 1).render(&started()).unwrap();
        assert!(text.contains("Scheduling: sequential (1 workers)"));
    }

    #[test]
    fn test_quiet_hides_everything_but_failures() {
        let reporter = StderrReporter::new(true, 0);
        assert_eq!(reporter.render(&started()), None);
        assert_eq!(reporter.render(&RunEvent::NothingToWrite), None);
        assert!(
            reporter
                .render(&RunEvent::ChunkFailed {
                    index: 0,
                    outcome: ChunkOutcome::Unrecognized,
                })
                .is_some()
        );
    }

    #[test]
    fn test_chunk_text_only_in_verbose_mode() {
        let event = RunEvent::ChunkTranscribed {
            index: 0,
            text: "hello".to_string(),
            elapsed: Duration::from_millis(1500),
        };
        assert_eq!(StderrReporter::new(false, 0).render(&event), None);
        assert_eq!(
            StderrReporter::new(false, 1).render(&event),
            Some("  [chunk 1 in 1.5s] hello".to_string())
        );
    }

    #[test]
    fn test_saved_shows_file_name_only() {
        let event = RunEvent::Saved {
            path: PathBuf::from("/tmp/out/notes.txt"),
        };
        assert_eq!(
            StderrReporter::new(false, 0).render(&event),
            Some("Transcription successfully saved to: notes.txt".to_string())
        );
    }

    #[test]
    fn test_collector_keeps_events_in_order() {
        let collector = CollectorReporter::new();
        collector.report(&started());
        collector.report(&RunEvent::NothingToWrite);

        let events = collector.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], RunEvent::NothingToWrite);
        assert!(collector.progress().is_empty());
    }
}
