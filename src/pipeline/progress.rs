//! Progress and ETA reporting for a transcription run.

use crate::pipeline::types::SchedulingMode;
use std::fmt;
use std::time::{Duration, Instant};

const SECS_PER_DAY: u64 = 24 * 3600;

/// Snapshot of run progress after a chunk completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Index of the chunk that just completed.
    pub index: usize,
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
    /// Estimated time remaining (sequential mode, from the second chunk on).
    pub eta: Option<Duration>,
}

impl ProgressUpdate {
    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }
}

impl fmt::Display for ProgressUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Progress: {:.2}%", self.percent)?;
        if let Some(eta) = self.eta {
            write!(f, " - {}", format_time(eta.as_secs_f64()))?;
        }
        Ok(())
    }
}

/// Percentage of chunks completed. Reaches exactly 100 only when all are done.
pub fn percent_complete(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    completed.min(total) as f64 / total as f64 * 100.0
}

/// Remaining time extrapolated from the average time per completed chunk.
///
/// `None` until at least two chunks have completed.
pub fn estimate_remaining(completed: usize, total: usize, elapsed: Duration) -> Option<Duration> {
    if completed < 2 {
        return None;
    }
    let average = elapsed.as_secs_f64() / completed as f64;
    let remaining = total.saturating_sub(completed) as f64;
    Some(Duration::from_secs_f64(average * remaining))
}

/// Progress status for one completion event.
///
/// Concurrent runs report percentage only: completion order there says
/// nothing stable about the rate of the remaining chunks.
pub fn progress_status(
    mode: SchedulingMode,
    index: usize,
    completed: usize,
    total: usize,
    elapsed: Duration,
) -> ProgressUpdate {
    let eta = match mode {
        SchedulingMode::Sequential => estimate_remaining(completed, total, elapsed),
        SchedulingMode::Concurrent => None,
    };
    ProgressUpdate {
        index,
        completed,
        total,
        percent: percent_complete(completed, total),
        eta,
    }
}

/// Format seconds as `Estimated remaining: [N days] HH:MM:SS`.
///
/// Seconds are rounded to the nearest whole second before being split, so
/// the seconds field never reads `60`. The days field is omitted when zero.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };

    let days = total / SECS_PER_DAY;
    let rest = total % SECS_PER_DAY;
    let hours = rest / 3600;
    let minutes = (rest % 3600) / 60;
    let secs = rest % 60;

    match days {
        0 => format!("Estimated remaining: {:02}:{:02}:{:02}", hours, minutes, secs),
        1 => format!("Estimated remaining: 1 day {:02}:{:02}:{:02}", hours, minutes, secs),
        n => format!(
            "Estimated remaining: {} days {:02}:{:02}:{:02}",
            n, hours, minutes, secs
        ),
    }
}

/// Tracks completions for one run and produces a [`ProgressUpdate`] per chunk.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    mode: SchedulingMode,
    total: usize,
    completed: usize,
    started: Instant,
}

impl ProgressReporter {
    /// Start tracking a run of `total` chunks now.
    pub fn new(mode: SchedulingMode, total: usize) -> Self {
        Self::started_at(mode, total, Instant::now())
    }

    pub fn started_at(mode: SchedulingMode, total: usize, started: Instant) -> Self {
        Self {
            mode,
            total,
            completed: 0,
            started,
        }
    }

    /// Record that chunk `index` finished and report progress.
    pub fn on_chunk_complete(&mut self, index: usize) -> ProgressUpdate {
        self.completed = (self.completed + 1).min(self.total);
        progress_status(
            self.mode,
            index,
            self.completed,
            self.total,
            self.started.elapsed(),
        )
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
