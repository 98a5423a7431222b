//! Directory walking implementation using walkdir.

use super::filter::{is_hidden, RawFilter, DEFAULT_RAW_EXTENSIONS};
use super::{RawFile, ScanResult};
use crate::error::ScanError;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Raw file extensions to import (case-sensitive)
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: false,
            max_depth: None,
            extensions: DEFAULT_RAW_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Scanner implementation using the walkdir crate.
///
/// Entries are visited in file-name order so that discovery order, and with
/// it the library index order, is stable across runs.
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: RawFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let filter = RawFilter::new()
            .with_hidden(config.include_hidden)
            .with_extensions(config.extensions.clone());

        Self { config, filter }
    }

    /// Discover raw files under `root`.
    ///
    /// A missing root is an error; unreadable entries below it are collected
    /// in [`ScanResult::errors`] and the walk continues.
    pub fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        let mut errors = Vec::new();

        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(|entry| include_hidden || entry.depth() == 0 || !is_hidden_dir(entry));

        for entry_result in entries {
            match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() && !entry.path().is_file() {
                        continue;
                    }

                    if !self.filter.should_include(entry.path()) {
                        continue;
                    }

                    match entry.metadata() {
                        Ok(metadata) => files.push(RawFile {
                            path: entry.path().to_path_buf(),
                            size: metadata.len(),
                        }),
                        Err(e) => errors.push(ScanError::ReadDirectory {
                            path: entry.path().to_path_buf(),
                            source: std::io::Error::other(e.to_string()),
                        }),
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path }
                    } else {
                        ScanError::ReadDirectory {
                            path,
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    tracing::warn!(error = %error, "Skipping unreadable entry");
                    errors.push(error);
                }
            }
        }

        tracing::debug!(root = %root.display(), found = files.len(), "Scan complete");

        Ok(ScanResult { files, errors })
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && is_hidden(entry.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_raw(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(b"II*\0raw sensor data").unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = WalkDirScanner::new(ScanConfig::default());

        let result = scanner.scan(temp_dir.path()).unwrap();

        assert!(result.files.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_finds_raw_and_ignores_text() {
        let temp_dir = TempDir::new().unwrap();
        create_raw(temp_dir.path(), "IMG_0001.CR2");
        fs::write(temp_dir.path().join("notes.txt"), "shot list").unwrap();

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("IMG_0001.CR2"));
        assert_eq!(result.files[0].size, 19);
    }

    #[test]
    fn scan_traverses_nested_directories_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("DCIM").join("100CANON");
        fs::create_dir_all(&nested).unwrap();

        create_raw(&nested, "IMG_0002.CR2");
        create_raw(&nested, "IMG_0001.CR2");
        create_raw(temp_dir.path(), "A_first.CR2");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        let names: Vec<_> = result.files.iter().map(|f| f.file_name()).collect();
        assert_eq!(names, vec!["A_first.CR2", "IMG_0001.CR2", "IMG_0002.CR2"]);
    }

    #[test]
    fn scan_skips_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let hidden = temp_dir.path().join(".cache");
        fs::create_dir(&hidden).unwrap();
        create_raw(&hidden, "IMG_0001.CR2");
        create_raw(temp_dir.path(), "IMG_0002.CR2");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("IMG_0002.CR2"));
    }

    #[test]
    fn scan_can_include_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let hidden = temp_dir.path().join(".trash");
        fs::create_dir(&hidden).unwrap();
        create_raw(&hidden, "IMG_0001.CR2");

        let config = ScanConfig {
            include_hidden: true,
            ..Default::default()
        };
        let result = WalkDirScanner::new(config).scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn scan_respects_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("DCIM");
        fs::create_dir(&nested).unwrap();
        create_raw(&nested, "IMG_0001.CR2");
        create_raw(temp_dir.path(), "IMG_0002.CR2");

        let config = ScanConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let result = WalkDirScanner::new(config).scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("IMG_0002.CR2"));
    }

    #[test]
    fn scan_nonexistent_directory_returns_error() {
        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/path/12345"));

        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }
}
