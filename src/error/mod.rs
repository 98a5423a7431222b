//! # Error Module
//!
//! Error types for the photo library core.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, digests, the tool that failed
//! - **Per-file failures are values** - an import batch collects them in its
//!   report instead of bailing out
//! - **Open-time failures are fatal** - a corrupt index is unsafe to use

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum PhotoshellError {
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Sidecar error: {0}")]
    Sidecar(#[from] SidecarError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while discovering raw files in a source directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Path the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanError::DirectoryNotFound { path }
            | ScanError::PermissionDenied { path }
            | ScanError::ReadDirectory { path, .. } => path,
        }
    }
}

/// Errors that occur while computing content digests
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Failed to read {path} for hashing: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur reading or writing sidecar metadata
#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("Failed to read sidecar {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write sidecar {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed sidecar {path}: {reason}. The library index cannot be trusted until this file is fixed or removed.")]
    Malformed { path: PathBuf, reason: String },

    #[error("No sidecar found for {digest}")]
    NotFound { digest: String },

    #[error("Failed to walk library directory {path}: {reason}")]
    Walk { path: PathBuf, reason: String },
}

/// Errors raised while developing a raw file into a derived image.
///
/// Every variant is recoverable at the batch level: the import reports it for
/// the offending file and moves on.
#[derive(Error, Debug)]
pub enum DevelopError {
    #[error("Raw decoder `{program}` could not be started: {source}. Is it installed and on PATH?")]
    ToolUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Raw decoder `{program}` failed on {path} ({status}): {stderr}")]
    ToolFailed {
        program: String,
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Raw decoder `{program}` timed out after {timeout:?} on {path}")]
    TimedOut {
        program: String,
        path: PathBuf,
        timeout: Duration,
    },

    #[error("Raw decoder `{program}` produced no image data for {path}")]
    EmptyOutput { program: String, path: PathBuf },

    #[error("Failed to convert {path}: {reason}")]
    ConversionFailed { path: PathBuf, reason: String },

    #[error("I/O error while developing into {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur during an import batch.
///
/// A missing source directory and a poisoned import lock abort the whole
/// batch; the others are attached to a single source file in the report.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("Failed to copy {from} into the library at {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Develop(#[from] DevelopError),

    #[error(transparent)]
    Sidecar(#[from] SidecarError),

    #[error("Library index lock was poisoned by a panicking thread")]
    LockPoisoned,
}

impl ImportError {
    /// Whether this error ends the whole batch rather than a single file
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ImportError::Scan(ScanError::DirectoryNotFound { .. }) | ImportError::LockPoisoned
        )
    }
}

/// Errors that occur while opening a library
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Failed to create library directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Sidecar(#[from] SidecarError),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PhotoshellError>;
