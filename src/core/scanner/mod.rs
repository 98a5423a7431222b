//! # Scanner Module
//!
//! Discovers raw camera files in a source directory (a memory card, a folder
//! of downloads, or the library itself).
//!
//! ## Supported Formats
//! - Canon RAW (.CR2) by default; any extension can be configured
//!
//! Matching is case-sensitive on the extension.
//!
//! ## Example
//! ```rust,ignore
//! use photoshell::core::scanner::{ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(Path::new("/media/card"))?;
//! ```

mod filter;
mod walker;

pub use filter::{RawFilter, DEFAULT_RAW_EXTENSIONS};
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use std::path::PathBuf;

/// A raw file discovered in a source directory
#[derive(Debug, Clone)]
pub struct RawFile {
    /// Path to the raw file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl RawFile {
    /// File name for progress display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Raw files, in discovery order
    pub files: Vec<RawFile>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}
