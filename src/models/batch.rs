// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Batch bookkeeping.
//!
//! Types that travel from the conversion worker back to the UI thread:
//! per-file progress events and the final batch report.

use std::path::{Path, PathBuf};

/// Number of failures listed individually in the completion summary.
pub const MAX_LISTED_FAILURES: usize = 5;

/// A single input file resolved against the active settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// A file that failed to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFile {
    pub file_name: String,
    pub message: String,
}

impl std::fmt::Display for FailedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file_name, self.message)
    }
}

/// Outcome of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub success_count: usize,
    pub failures: Vec<FailedFile>,
    /// The batch was stopped before every file was attempted.
    pub cancelled: bool,
}

impl BatchReport {
    pub fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, source: &Path, message: impl Into<String>) {
        self.failures.push(FailedFile {
            file_name: display_name(source),
            message: message.into(),
        });
    }

    /// Failures shown individually in the summary.
    pub fn listed_failures(&self) -> &[FailedFile] {
        let shown = self.failures.len().min(MAX_LISTED_FAILURES);
        &self.failures[..shown]
    }

    /// Number of failures folded into the "... and N more" line.
    pub fn hidden_failure_count(&self) -> usize {
        self.failures.len().saturating_sub(MAX_LISTED_FAILURES)
    }

    /// Human-readable completion message.
    pub fn summary(&self) -> String {
        let mut message = format!("Conversion finished.\nSucceeded: {}", self.success_count);

        if self.cancelled {
            message.push_str("\nCancelled before all files were converted.");
        }

        if !self.failures.is_empty() {
            message.push_str(&format!("\nFailed: {}\n\nFailed files:\n", self.failures.len()));
            let lines: Vec<String> = self.listed_failures().iter().map(|f| f.to_string()).collect();
            message.push_str(&lines.join("\n"));

            let hidden = self.hidden_failure_count();
            if hidden > 0 {
                message.push_str(&format!("\n... and {} more", hidden));
            }
        }

        message
    }
}

/// Progress notification sent from the worker thread.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Conversion of file `index` (0-based) is starting.
    Started {
        index: usize,
        total: usize,
        file_name: String,
    },
    /// File `index` is done, successfully or not.
    Finished {
        index: usize,
        total: usize,
        outcome: Result<PathBuf, String>,
    },
    /// The batch is over; no further events follow.
    Completed(BatchReport),
}

/// File name component of `path` for display, or the whole path if it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(successes: usize, failures: usize) -> BatchReport {
        let mut report = BatchReport::default();
        for _ in 0..successes {
            report.record_success();
        }
        for i in 0..failures {
            report.record_failure(Path::new(&format!("/music/track{}.mp3", i)), "boom");
        }
        report
    }

    #[test]
    fn test_summary_without_failures() {
        let report = report_with(3, 0);
        assert_eq!(report.summary(), "Conversion finished.\nSucceeded: 3");
    }

    #[test]
    fn test_summary_lists_at_most_five_failures() {
        let report = report_with(1, 7);
        assert_eq!(report.listed_failures().len(), 5);
        assert_eq!(report.hidden_failure_count(), 2);

        let summary = report.summary();
        assert!(summary.contains("Failed: 7"));
        assert!(summary.contains("track0.mp3: boom"));
        assert!(summary.contains("track4.mp3: boom"));
        assert!(!summary.contains("track5.mp3"));
        assert!(summary.ends_with("... and 2 more"));
    }

    #[test]
    fn test_summary_exactly_five_failures_has_no_overflow_line() {
        let report = report_with(0, 5);
        assert_eq!(report.listed_failures().len(), 5);
        assert!(!report.summary().contains("more"));
    }

    #[test]
    fn test_failure_records_file_name_only() {
        let mut report = BatchReport::default();
        report.record_failure(Path::new("/a/b/song.mp3"), "bad header");
        assert_eq!(report.failures[0].file_name, "song.mp3");
        assert_eq!(report.failures[0].to_string(), "song.mp3: bad header");
    }
}
