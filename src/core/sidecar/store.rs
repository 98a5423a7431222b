//! Filesystem persistence for sidecar records.

use super::SidecarRecord;
use crate::core::hasher::ContentDigest;
use crate::error::SidecarError;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Extension of sidecar files
pub const SIDECAR_EXTENSION: &str = "json";

/// Reads and writes `<digest>.json` sidecar files under a library root.
///
/// Writes go through a temp file in the same directory followed by a rename,
/// so a crash leaves either no sidecar or a complete one.
#[derive(Debug, Clone)]
pub struct SidecarStore {
    root: PathBuf,
}

impl SidecarStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the sidecar for a digest
    pub fn path_for(&self, digest: &ContentDigest) -> PathBuf {
        self.root
            .join(format!("{}.{}", digest, SIDECAR_EXTENSION))
    }

    /// Whether a sidecar file exists on disk for this digest
    pub fn contains(&self, digest: &ContentDigest) -> bool {
        self.path_for(digest).is_file()
    }

    /// Load every sidecar below the root, in file-name order.
    ///
    /// Any unparsable sidecar fails the whole load, as does a sidecar whose
    /// `hash` disagrees with its file name or a second sidecar for a digest
    /// already loaded: the store refuses to build an index from a corrupt
    /// directory.
    pub fn load_all(&self) -> Result<Vec<SidecarRecord>, SidecarError> {
        let mut records = Vec::new();
        let mut seen: HashMap<ContentDigest, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| SidecarError::Walk {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                reason: e.to_string(),
            })?;

            if !entry.file_type().is_file() || !is_sidecar(entry.path()) {
                continue;
            }

            let record = Self::parse(entry.path())?;
            Self::check_identity(entry.path(), &record)?;

            if let Some(first) = seen.insert(record.hash.clone(), entry.path().to_path_buf()) {
                return Err(SidecarError::Malformed {
                    path: entry.path().to_path_buf(),
                    reason: format!(
                        "duplicate sidecar for {} (also at {})",
                        record.hash,
                        first.display()
                    ),
                });
            }

            records.push(record);
        }

        tracing::debug!(root = %self.root.display(), count = records.len(), "Loaded sidecars");
        Ok(records)
    }

    /// Read the persisted record for a digest
    pub fn read(&self, digest: &ContentDigest) -> Result<SidecarRecord, SidecarError> {
        let path = self.path_for(digest);
        if !path.is_file() {
            return Err(SidecarError::NotFound {
                digest: digest.to_string(),
            });
        }
        Self::parse(&path)
    }

    /// Persist a record.
    ///
    /// Returns `false` when an identical sidecar is already on disk and nothing
    /// was written.
    pub fn write(&self, record: &SidecarRecord) -> Result<bool, SidecarError> {
        let path = self.path_for(&record.hash);

        if path.is_file() {
            if let Ok(existing) = Self::parse(&path) {
                if &existing == record {
                    return Ok(false);
                }
            }
        }

        let write_error = |source| SidecarError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(write_error)?;
        let mut staging = NamedTempFile::new_in(&self.root).map_err(write_error)?;
        serde_json::to_writer_pretty(&mut staging, record)
            .map_err(|e| write_error(std::io::Error::other(e)))?;
        staging.write_all(b"\n").map_err(write_error)?;
        staging.as_file().sync_all().map_err(write_error)?;
        staging.persist(&path).map_err(|e| write_error(e.error))?;

        tracing::debug!(path = %path.display(), "Wrote sidecar");
        Ok(true)
    }

    /// A sidecar is named after the digest it records
    fn check_identity(path: &Path, record: &SidecarRecord) -> Result<(), SidecarError> {
        let stem = path.file_stem().map(|s| s.to_string_lossy());
        if stem.as_deref() == Some(record.hash.as_str()) {
            return Ok(());
        }
        Err(SidecarError::Malformed {
            path: path.to_path_buf(),
            reason: format!("records hash {} but is not named after it", record.hash),
        })
    }

    fn parse(path: &Path) -> Result<SidecarRecord, SidecarError> {
        let file = File::open(path).map_err(|source| SidecarError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| SidecarError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

fn is_sidecar(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == SIDECAR_EXTENSION)
        .unwrap_or(false)
}
