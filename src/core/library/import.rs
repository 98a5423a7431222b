//! Import results, progress callbacks and cancellation.

use crate::core::hasher::ContentDigest;
use crate::core::selection::Image;
use crate::error::ImportError;
use crate::events::{EventSender, ImportEvent, ImportSummary};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// What happened to a successfully processed source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    /// New asset: copied, developed and recorded
    Imported,
    /// Digest already indexed; nothing was touched
    AlreadyInLibrary,
    /// Digest already indexed, but a missing library copy, developed image
    /// or sidecar was restored
    Repaired,
    /// Not indexed, but a sidecar from an earlier run was found on disk and
    /// reused
    RecoveredSidecar,
}

/// A source file that made it into the library
#[derive(Debug, Clone)]
pub struct ImportedFile {
    /// Where the file was imported from
    pub source: PathBuf,
    pub digest: ContentDigest,
    pub outcome: ImportOutcome,
    /// The indexed asset
    pub image: Image,
}

/// A source file that could not be imported
#[derive(Debug)]
pub struct ImportFailure {
    pub source: PathBuf,
    pub error: ImportError,
}

/// Outcome of an import batch
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Files processed successfully, in discovery order
    pub imported: Vec<ImportedFile>,
    /// Files that failed, each with its own error
    pub failures: Vec<ImportFailure>,
    /// Number of raw files discovered in the source
    pub total_files: usize,
    /// Whether the batch stopped early on request
    pub cancelled: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ImportReport {
    /// Count of successes with the given outcome
    pub fn count(&self, outcome: ImportOutcome) -> usize {
        self.imported.iter().filter(|f| f.outcome == outcome).count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            total_files: self.total_files,
            imported: self.count(ImportOutcome::Imported),
            already_in_library: self.count(ImportOutcome::AlreadyInLibrary),
            repaired: self.count(ImportOutcome::Repaired),
            recovered: self.count(ImportOutcome::RecoveredSidecar),
            failed: self.failures.len(),
            cancelled: self.cancelled,
            duration_ms: self.duration_ms,
        }
    }
}

/// Cooperative cancellation flag for an import.
///
/// Checked before each file; the file in progress always finishes.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

type FileStart<'a> = Box<dyn FnMut(&str) + 'a>;
type FileDone<'a> = Box<dyn FnMut(&ContentDigest, f64) + 'a>;
type FileFailed<'a> = Box<dyn FnMut(&Path, &ImportError) + 'a>;
type BatchStart<'a> = Box<dyn FnMut(usize) + 'a>;
type BatchDone<'a> = Box<dyn FnMut(&ImportReport) + 'a>;

/// Optional hooks invoked synchronously on the importing thread
#[derive(Default)]
pub struct ImportCallbacks<'a> {
    batch_start: Option<BatchStart<'a>>,
    file_start: Option<FileStart<'a>>,
    file_done: Option<FileDone<'a>>,
    file_failed: Option<FileFailed<'a>>,
    batch_done: Option<BatchDone<'a>>,
    cancel: Option<CancellationToken>,
}

impl<'a> ImportCallbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks that forward every hook to an event channel
    pub fn with_events(events: &'a EventSender) -> Self {
        Self::new()
            .on_batch_start(move |total_files| {
                events.send(ImportEvent::Discovered { total_files })
            })
            .on_file_start(move |file_name| {
                events.send(ImportEvent::FileStarted {
                    file_name: file_name.to_string(),
                })
            })
            .on_file_done(move |digest, progress| {
                events.send(ImportEvent::FileDone {
                    digest: digest.clone(),
                    progress,
                })
            })
            .on_file_failed(move |path, error| {
                events.send(ImportEvent::FileFailed {
                    path: path.to_path_buf(),
                    message: error.to_string(),
                })
            })
            .on_batch_done(move |report| {
                events.send(ImportEvent::Completed {
                    summary: report.summary(),
                })
            })
    }

    /// Called once discovery finishes, with the number of raw files found
    pub fn on_batch_start(mut self, f: impl FnMut(usize) + 'a) -> Self {
        self.batch_start = Some(Box::new(f));
        self
    }

    /// Called with the file name when a file starts processing
    pub fn on_file_start(mut self, f: impl FnMut(&str) + 'a) -> Self {
        self.file_start = Some(Box::new(f));
        self
    }

    /// Called with the digest and the fraction of the batch processed so far
    /// when a file completes
    pub fn on_file_done(mut self, f: impl FnMut(&ContentDigest, f64) + 'a) -> Self {
        self.file_done = Some(Box::new(f));
        self
    }

    /// Called when a file fails; the batch continues
    pub fn on_file_failed(mut self, f: impl FnMut(&Path, &ImportError) + 'a) -> Self {
        self.file_failed = Some(Box::new(f));
        self
    }

    /// Called with the final report
    pub fn on_batch_done(mut self, f: impl FnMut(&ImportReport) + 'a) -> Self {
        self.batch_done = Some(Box::new(f));
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    pub(crate) fn batch_started(&mut self, total_files: usize) {
        if let Some(f) = self.batch_start.as_mut() {
            f(total_files);
        }
    }

    pub(crate) fn file_started(&mut self, file_name: &str) {
        if let Some(f) = self.file_start.as_mut() {
            f(file_name);
        }
    }

    pub(crate) fn file_done(&mut self, digest: &ContentDigest, progress: f64) {
        if let Some(f) = self.file_done.as_mut() {
            f(digest, progress);
        }
    }

    pub(crate) fn file_failed(&mut self, path: &Path, error: &ImportError) {
        if let Some(f) = self.file_failed.as_mut() {
            f(path, error);
        }
    }

    pub(crate) fn batch_done(&mut self, report: &ImportReport) {
        if let Some(f) = self.batch_done.as_mut() {
            f(report);
        }
    }
}
