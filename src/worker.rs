// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background batch conversion.
//!
//! A batch runs on its own thread, converting files one after another and
//! reporting back to the UI thread through a channel of [`BatchEvent`]s.
//! The UI can request cancellation, which takes effect before the next file.

use crate::error::ConvertResult;
use crate::models::batch::{display_name, BatchEvent, BatchReport};
use crate::models::settings::Settings;
use crate::pipeline::Converter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Convert `files` in order, sending progress over `events`.
///
/// Every file is attempted unless `cancel` is set; a failure is recorded and
/// the batch moves on. The final report is both sent as
/// [`BatchEvent::Completed`] and returned.
pub fn run_batch<F>(
    files: &[PathBuf],
    settings: &Settings,
    cancel: &AtomicBool,
    events: &Sender<BatchEvent>,
    mut convert: F,
) -> BatchReport
where
    F: FnMut(&Path, &Settings) -> ConvertResult<PathBuf>,
{
    let total = files.len();
    let mut report = BatchReport::default();

    log::info!("Starting batch of {} file(s)", total);

    for (index, source) in files.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            log::info!("Batch cancelled after {} of {} file(s)", index, total);
            report.cancelled = true;
            break;
        }

        // A closed channel just means nobody is watching any more.
        let _ = events.send(BatchEvent::Started {
            index,
            total,
            file_name: display_name(source),
        });

        let outcome = match convert(source, settings) {
            Ok(output) => {
                report.record_success();
                Ok(output)
            }
            Err(e) => {
                log::error!("Failed to convert {}: {}", source.display(), e);
                let message = e.to_string();
                report.record_failure(source, message.clone());
                Err(message)
            }
        };

        let _ = events.send(BatchEvent::Finished {
            index,
            total,
            outcome,
        });
    }

    log::info!(
        "Batch finished: {} succeeded, {} failed",
        report.success_count,
        report.failures.len()
    );

    let _ = events.send(BatchEvent::Completed(report.clone()));
    report
}

/// A batch running on a background thread.
pub struct BatchHandle {
    events: Receiver<BatchEvent>,
    cancel: Arc<AtomicBool>,
    _thread: JoinHandle<()>,
}

impl BatchHandle {
    /// Spawn a worker thread converting `files` with `converter`.
    pub fn spawn(files: Vec<PathBuf>, settings: Settings, converter: Converter) -> Self {
        let (sender, receiver) = channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let worker_cancel = Arc::clone(&cancel);

        let thread = thread::spawn(move || {
            run_batch(&files, &settings, &worker_cancel, &sender, |source, settings| {
                converter.convert(source, settings)
            });
        });

        Self {
            events: receiver,
            cancel,
            _thread: thread,
        }
    }

    /// Ask the worker to stop before starting the next file.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelling(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Events received since the last call, without blocking.
    pub fn drain(&self) -> Vec<BatchEvent> {
        self.events.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::models::batch::MAX_LISTED_FAILURES;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| PathBuf::from(format!("/music/{}", n))).collect()
    }

    /// Fails every file whose name contains "bad".
    fn fake_convert(source: &Path, _settings: &Settings) -> ConvertResult<PathBuf> {
        if source.to_string_lossy().contains("bad") {
            Err(ConvertError::Encode("corrupt stream".to_string()))
        } else {
            Ok(source.with_extension("mp4"))
        }
    }

    #[test]
    fn test_counts_successes_and_failures() {
        let files = paths(&["a.mp3", "bad1.mp3", "b.mp3", "bad2.mp3", "c.mp3"]);
        let (sender, receiver) = channel();
        let cancel = AtomicBool::new(false);

        let report = run_batch(&files, &Settings::default(), &cancel, &sender, fake_convert);

        assert_eq!(report.success_count, 3);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].file_name, "bad1.mp3");
        assert_eq!(report.failures[1].message, "Encoding failed: corrupt stream");
        assert!(!report.cancelled);

        let events: Vec<BatchEvent> = receiver.try_iter().collect();
        // Started + Finished per file, then Completed.
        assert_eq!(events.len(), files.len() * 2 + 1);
        assert!(matches!(events.last(), Some(BatchEvent::Completed(r)) if *r == report));
    }

    #[test]
    fn test_failure_does_not_stop_later_files() {
        let files = paths(&["bad.mp3", "good.mp3"]);
        let (sender, receiver) = channel();
        let cancel = AtomicBool::new(false);

        let report = run_batch(&files, &Settings::default(), &cancel, &sender, fake_convert);
        assert_eq!(report.success_count, 1);

        let finished: Vec<Result<PathBuf, String>> = receiver
            .try_iter()
            .filter_map(|e| match e {
                BatchEvent::Finished { outcome, .. } => Some(outcome),
                _ => None,
            })
            .collect();
        assert!(finished[0].is_err());
        assert_eq!(finished[1], Ok(PathBuf::from("/music/good.mp4")));
    }

    #[test]
    fn test_many_failures_list_five() {
        let names: Vec<String> = (0..8).map(|i| format!("bad{}.mp3", i)).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut files = paths(&names);
        files.extend(paths(&["ok.mp3"]));

        let (sender, _receiver) = channel();
        let cancel = AtomicBool::new(false);
        let report = run_batch(&files, &Settings::default(), &cancel, &sender, fake_convert);

        assert_eq!(report.success_count, files.len() - 8);
        assert_eq!(report.failures.len(), 8);
        assert_eq!(report.listed_failures().len(), MAX_LISTED_FAILURES);
        assert_eq!(report.hidden_failure_count(), 3);
    }

    #[test]
    fn test_files_converted_in_order() {
        let files = paths(&["1.mp3", "2.mp3", "3.mp3"]);
        let (sender, _receiver) = channel();
        let cancel = AtomicBool::new(false);
        let mut seen = Vec::new();

        run_batch(&files, &Settings::default(), &cancel, &sender, |source, _| {
            seen.push(source.to_path_buf());
            Ok(source.with_extension("mp4"))
        });

        assert_eq!(seen, files);
    }

    #[test]
    fn test_cancel_stops_before_next_file() {
        let files = paths(&["a.mp3", "b.mp3", "c.mp3"]);
        let (sender, _receiver) = channel();
        let cancel = AtomicBool::new(false);
        let mut attempted = 0;

        let report = run_batch(&files, &Settings::default(), &cancel, &sender, |source, _| {
            attempted += 1;
            // Cancellation requested while the first file is converting.
            cancel.store(true, Ordering::Relaxed);
            Ok(source.with_extension("mp4"))
        });

        assert_eq!(attempted, 1);
        assert_eq!(report.success_count, 1);
        assert!(report.cancelled);
    }

    #[test]
    fn test_empty_batch_completes() {
        let (sender, receiver) = channel();
        let cancel = AtomicBool::new(false);
        let report = run_batch(&[], &Settings::default(), &cancel, &sender, fake_convert);

        assert_eq!(report, BatchReport::default());
        let events: Vec<BatchEvent> = receiver.try_iter().collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_spawned_batch_reports_completion() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.mp3");

        let handle = BatchHandle::spawn(
            vec![missing],
            Settings::default(),
            Converter::new(Default::default()),
        );

        let mut report = None;
        for _ in 0..500 {
            for event in handle.drain() {
                if let BatchEvent::Completed(r) = event {
                    report = Some(r);
                }
            }
            if report.is_some() {
                break;
            }
            thread::sleep(std::time::Duration::from_millis(10));
        }

        let report = report.expect("batch completed");
        assert_eq!(report.success_count, 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file_name, "missing.mp3");
    }
}
