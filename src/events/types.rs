//! Event type definitions for progress reporting.

use crate::core::hasher::ContentDigest;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Events emitted while importing into a library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ImportEvent {
    /// Import of a source directory has started
    Started { source: PathBuf },
    /// Discovery finished
    Discovered { total_files: usize },
    /// A file started processing
    FileStarted { file_name: String },
    /// A file is in the library. `progress` is the fraction of the batch
    /// processed so far, in `0.0..=1.0`.
    FileDone { digest: ContentDigest, progress: f64 },
    /// A file could not be imported; the batch continues
    FileFailed { path: PathBuf, message: String },
    /// Import finished
    Completed { summary: ImportSummary },
    /// Import aborted with a batch-level error
    Error { message: String },
}

/// Summary of an import batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Raw files discovered in the source
    pub total_files: usize,
    /// New photos added
    pub imported: usize,
    /// Photos that were already in the library
    pub already_in_library: usize,
    /// Already-imported photos with restored files
    pub repaired: usize,
    /// Photos re-indexed from a sidecar left by an earlier run
    pub recovered: usize,
    /// Files that failed
    pub failed: usize,
    /// Whether the import stopped early
    pub cancelled: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = ImportEvent::FileDone {
            digest: ContentDigest::from_bytes(&[0xde, 0xad]),
            progress: 0.5,
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: ImportEvent = serde_json::from_str(&json).unwrap();

        match deserialized {
            ImportEvent::FileDone { digest, progress } => {
                assert_eq!(digest.as_str(), "dead");
                assert_eq!(progress, 0.5);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn import_summary_is_serializable() {
        let summary = ImportSummary {
            total_files: 120,
            imported: 100,
            already_in_library: 15,
            failed: 5,
            duration_ms: 5000,
            ..ImportSummary::default()
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"already_in_library\":15"));
    }
}
