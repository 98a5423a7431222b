//! # Library Module
//!
//! Owns everything a photo library persists and orchestrates import.
//!
//! ## Import Flow
//! ```text
//! source dir → Scan → Hash → (known?) → Copy → Develop → Sidecar → Index
//!                               │
//!                               └─ yes: verify and repair, or skip
//! ```
//!
//! Imports are sequential and serialized by a lock held for the whole batch.
//! The index sits behind a `RwLock`, so queries made while an import runs see
//! every file completed so far.
//!
//! ## Example
//! ```rust,ignore
//! let library = Library::open("/home/me/Pictures/photoshell")?;
//! let report = library.import_from(Path::new("/media/card"), ImportCallbacks::new())?;
//! let mut selection = library.query_all();
//! ```

mod config;
mod import;

pub use config::{LibraryBuilder, LibraryConfig, CACHE_DIR_NAME};
pub use import::{
    CancellationToken, ImportCallbacks, ImportFailure, ImportOutcome, ImportReport, ImportedFile,
};

use crate::core::develop::DevelopmentPipeline;
use crate::core::hasher::{ContentDigest, ContentHasher};
use crate::core::scanner::{RawFile, WalkDirScanner};
use crate::core::selection::{Image, Predicate, Selection, SharedSelection};
use crate::core::sidecar::{SidecarIndex, SidecarRecord, SidecarStore};
use crate::error::{ImportError, LibraryError};
use crate::events::{EventSender, ImportEvent};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A content-addressed photo library rooted at one directory
pub struct Library {
    config: LibraryConfig,
    hasher: Box<dyn ContentHasher>,
    sidecars: SidecarStore,
    pipeline: DevelopmentPipeline,
    index: RwLock<SidecarIndex>,
    import_lock: Mutex<()>,
}

impl Library {
    /// Open the library at `root` with default settings
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        LibraryBuilder::new(root).open()
    }

    /// Open a library from an explicit configuration
    pub fn open_with(config: LibraryConfig) -> Result<Self, LibraryError> {
        LibraryBuilder::from_config(config).open()
    }

    /// Create a builder for the library at `root`
    pub fn builder(root: impl Into<PathBuf>) -> LibraryBuilder {
        LibraryBuilder::new(root)
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub fn cache_dir(&self) -> &Path {
        self.pipeline.cache_dir()
    }

    /// Number of indexed photos
    pub fn len(&self) -> usize {
        self.read_index().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_index().is_empty()
    }

    /// Look up a photo by digest
    pub fn find(&self, digest: &ContentDigest) -> Option<Image> {
        self.read_index()
            .find(digest)
            .map(|record| Image::new(Arc::clone(record)))
    }

    /// Selection over every indexed photo
    pub fn query_all(&self) -> Selection {
        self.query(|_| true)
    }

    /// Selection over the photos matching `predicate`, in index order
    pub fn query<F>(&self, predicate: F) -> Selection
    where
        F: Fn(&Image) -> bool + Send + Sync + 'static,
    {
        self.query_with(Arc::new(predicate))
    }

    /// Like [`Library::query`], for an already shared predicate
    pub fn query_with(&self, predicate: Predicate) -> Selection {
        // Snapshot first so the predicate runs without holding the index lock
        let images: Vec<Image> = self
            .read_index()
            .iter()
            .map(|record| Image::new(Arc::clone(record)))
            .collect();

        let mut selection = Selection::new(Arc::clone(&predicate));
        for image in images {
            if predicate(&image) {
                selection.append(image);
            }
        }
        selection
    }

    /// Re-run the selection's query against the current index.
    ///
    /// The cursor stays on the same photo when it still matches; otherwise
    /// it starts at the first photo.
    pub fn refresh(&self, selection: &Selection) -> Selection {
        let mut refreshed = self.query_with(Arc::clone(selection.query()));
        if let Some(current) = selection.current() {
            refreshed.jump(current.digest());
        }
        refreshed
    }

    /// Refresh a shared selection in place
    pub fn refresh_shared(&self, selection: &SharedSelection) {
        selection.update(|current| self.refresh(current));
    }

    /// Import every raw file under `source`.
    ///
    /// Per-file failures are collected in the report and the batch carries
    /// on. A missing source directory or a poisoned import lock fails the
    /// whole call.
    pub fn import_from(
        &self,
        source: &Path,
        mut callbacks: ImportCallbacks<'_>,
    ) -> Result<ImportReport, ImportError> {
        let _guard = self
            .import_lock
            .lock()
            .map_err(|_| ImportError::LockPoisoned)?;
        let start = Instant::now();

        let scanner = WalkDirScanner::new(self.config.scan.clone());
        let scan = scanner.scan(source)?;
        let total = scan.files.len();

        info!(
            source = %source.display(),
            files = total,
            "Starting import"
        );

        let mut report = ImportReport {
            total_files: total,
            ..ImportReport::default()
        };

        for error in scan.errors {
            let path = error.path().to_path_buf();
            let error = ImportError::from(error);
            warn!(path = %path.display(), error = %error, "Skipping unreadable entry");
            callbacks.file_failed(&path, &error);
            report.failures.push(ImportFailure {
                source: path,
                error,
            });
        }

        callbacks.batch_started(total);

        for (i, file) in scan.files.iter().enumerate() {
            if callbacks.is_cancelled() {
                info!(remaining = total - i, "Import cancelled");
                report.cancelled = true;
                break;
            }

            callbacks.file_started(&file.file_name());

            match self.import_file(file) {
                Ok(imported) => {
                    callbacks.file_done(&imported.digest, (i + 1) as f64 / total as f64);
                    report.imported.push(imported);
                }
                Err(error) if error.is_fatal() => return Err(error),
                Err(error) => {
                    warn!(path = %file.path.display(), error = %error, "Import failed");
                    callbacks.file_failed(&file.path, &error);
                    report.failures.push(ImportFailure {
                        source: file.path.clone(),
                        error,
                    });
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            imported = report.count(ImportOutcome::Imported),
            skipped = report.count(ImportOutcome::AlreadyInLibrary),
            repaired = report.count(ImportOutcome::Repaired),
            failed = report.failures.len(),
            duration_ms = report.duration_ms,
            "Import finished"
        );

        callbacks.batch_done(&report);
        Ok(report)
    }

    /// Import with progress reported as events instead of callbacks
    pub fn import_with_events(
        &self,
        source: &Path,
        events: &EventSender,
    ) -> Result<ImportReport, ImportError> {
        self.import_with_events_cancellable(source, events, CancellationToken::new())
    }

    /// Import with events, stopping between files once `cancel` fires
    pub fn import_with_events_cancellable(
        &self,
        source: &Path,
        events: &EventSender,
        cancel: CancellationToken,
    ) -> Result<ImportReport, ImportError> {
        events.send(ImportEvent::Started {
            source: source.to_path_buf(),
        });

        let callbacks = ImportCallbacks::with_events(events).cancel_token(cancel);
        let result = self.import_from(source, callbacks);

        if let Err(ref error) = result {
            events.send(ImportEvent::Error {
                message: error.to_string(),
            });
        }
        result
    }

    fn import_file(&self, file: &RawFile) -> Result<ImportedFile, ImportError> {
        let source = file.path.as_path();
        let digest = self.hasher.hash_file(source)?;

        let existing = self.read_index().find(&digest).cloned();
        if let Some(record) = existing {
            let (record, outcome) = if self.config.verify_existing {
                match self.repair(&digest, file, record)? {
                    (record, true) => (record, ImportOutcome::Repaired),
                    (record, false) => (record, ImportOutcome::AlreadyInLibrary),
                }
            } else {
                (record, ImportOutcome::AlreadyInLibrary)
            };
            if outcome == ImportOutcome::AlreadyInLibrary {
                debug!(digest = %digest.short(), path = %source.display(), "Already in library");
            }
            return Ok(ImportedFile {
                source: source.to_path_buf(),
                digest,
                outcome,
                image: Image::new(record),
            });
        }

        let stored = self.store_raw(&digest, file)?;
        let developed = self.pipeline.develop(&digest, &stored)?;

        let (record, outcome) = if self.sidecars.contains(&digest) {
            let mut record = self.sidecars.read(&digest)?;
            if record.developed_path() != developed.as_path() {
                warn!(
                    digest = %digest.short(),
                    recorded = %record.developed_path().display(),
                    "Recovered sidecar points outside the cache, rewriting"
                );
                record = SidecarRecord::new(digest.clone(), developed);
                self.sidecars.write(&record)?;
            }
            (record, ImportOutcome::RecoveredSidecar)
        } else {
            let record = SidecarRecord::new(digest.clone(), developed);
            self.sidecars.write(&record)?;
            (record, ImportOutcome::Imported)
        };

        let record = self.write_index().insert(record);

        debug!(
            digest = %digest.short(),
            path = %source.display(),
            outcome = ?outcome,
            "Imported"
        );

        Ok(ImportedFile {
            source: source.to_path_buf(),
            digest,
            outcome,
            image: Image::new(record),
        })
    }

    /// Restore whatever an indexed photo is missing on disk.
    ///
    /// The cache path is authoritative for the developed image: a record
    /// pointing anywhere else is rewritten. Returns the record now indexed
    /// and whether anything was restored.
    fn repair(
        &self,
        digest: &ContentDigest,
        file: &RawFile,
        record: Arc<SidecarRecord>,
    ) -> Result<(Arc<SidecarRecord>, bool), ImportError> {
        let mut repaired = false;

        let stored = self.raw_path(digest, &file.path);
        if !stored.is_file() {
            warn!(digest = %digest.short(), path = %stored.display(), "Library copy missing, restoring");
            self.store_raw(digest, file)?;
            repaired = true;
        }

        let expected = self.pipeline.cache_path(digest);
        let stale = record.developed_path() != expected.as_path();
        if stale || !expected.is_file() {
            if stale {
                warn!(
                    digest = %digest.short(),
                    recorded = %record.developed_path().display(),
                    expected = %expected.display(),
                    "Sidecar points outside the cache, correcting"
                );
            } else {
                warn!(
                    digest = %digest.short(),
                    path = %expected.display(),
                    "Developed image missing, redeveloping"
                );
            }
            let developed = self.pipeline.develop(digest, &stored)?;
            let corrected = SidecarRecord::new(digest.clone(), developed);
            self.sidecars.write(&corrected)?;
            let record = self.write_index().replace(corrected);
            return Ok((record, true));
        }

        if !self.sidecars.contains(digest) {
            warn!(digest = %digest.short(), "Sidecar missing, rewriting");
            self.sidecars.write(&record)?;
            repaired = true;
        }

        Ok((record, repaired))
    }

    /// Where the library copy of a raw file lives: `<root>/<digest>.<ext>`
    fn raw_path(&self, digest: &ContentDigest, source: &Path) -> PathBuf {
        let name = match source.extension() {
            Some(ext) => format!("{}.{}", digest, ext.to_string_lossy()),
            None => digest.to_string(),
        };
        self.config.root.join(name)
    }

    /// Copy a raw file into the library unless an equivalent copy is there.
    fn store_raw(&self, digest: &ContentDigest, file: &RawFile) -> Result<PathBuf, ImportError> {
        let source = file.path.as_path();
        let destination = self.raw_path(digest, source);

        if same_file(source, &destination) {
            return Ok(destination);
        }

        if let Ok(existing) = fs::metadata(&destination) {
            if existing.is_file() && existing.len() == file.size {
                debug!(path = %destination.display(), "Library copy already present");
                return Ok(destination);
            }
        }

        let copy_error = |e: io::Error| ImportError::Copy {
            from: source.to_path_buf(),
            to: destination.clone(),
            source: e,
        };

        let mut staging = tempfile::Builder::new()
            .prefix(".import-")
            .tempfile_in(&self.config.root)
            .map_err(copy_error)?;
        let mut reader = File::open(source).map_err(copy_error)?;
        io::copy(&mut reader, staging.as_file_mut()).map_err(copy_error)?;
        staging.as_file().sync_all().map_err(copy_error)?;
        staging
            .persist(&destination)
            .map_err(|e| copy_error(e.error))?;

        Ok(destination)
    }

    fn read_index(&self) -> RwLockReadGuard<'_, SidecarIndex> {
        // Inserts cannot leave the index half-updated, so a poisoned lock
        // still guards consistent data
        self.index.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_index(&self) -> RwLockWriteGuard<'_, SidecarIndex> {
        self.index.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("root", &self.config.root)
            .field("records", &self.len())
            .finish()
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::develop::RawDecoder;
    use crate::error::DevelopError;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Decoder that ignores the raw file and returns a tiny PNG
    struct PngDecoder {
        calls: Arc<AtomicUsize>,
    }

    impl RawDecoder for PngDecoder {
        fn decode(&self, _raw: &Path) -> Result<Vec<u8>, DevelopError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut bytes = Vec::new();
            RgbImage::from_pixel(4, 4, Rgb([200, 40, 40]))
                .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                .unwrap();
            Ok(bytes)
        }
    }

    fn open(root: &Path) -> (Library, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let library = Library::builder(root)
            .raw_decoder(Box::new(PngDecoder {
                calls: Arc::clone(&calls),
            }))
            .open()
            .unwrap();
        (library, calls)
    }

    fn write_raw(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn open_creates_root_and_cache() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("library");

        let (library, _) = open(&root);

        assert!(root.is_dir());
        assert!(root.join(CACHE_DIR_NAME).is_dir());
        assert!(library.is_empty());
        assert!(library.query_all().current().is_none());
    }

    #[test]
    fn import_copies_develops_and_records() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "IMG_0001.CR2", b"raw one");
        let (library, calls) = open(&temp.path().join("library"));

        let report = library.import_from(&source, ImportCallbacks::new()).unwrap();

        assert_eq!(report.total_files, 1);
        assert_eq!(report.count(ImportOutcome::Imported), 1);
        let imported = &report.imported[0];
        assert!(library.root().join(format!("{}.CR2", imported.digest)).is_file());
        assert!(library.root().join(format!("{}.json", imported.digest)).is_file());
        assert!(imported.image.derived_path().is_file());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn reimport_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "IMG_0001.CR2", b"raw one");
        let (library, calls) = open(&temp.path().join("library"));

        library.import_from(&source, ImportCallbacks::new()).unwrap();
        let second = library.import_from(&source, ImportCallbacks::new()).unwrap();

        assert_eq!(second.count(ImportOutcome::AlreadyInLibrary), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn identical_files_share_one_record() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "IMG_0001.CR2", b"same bytes");
        write_raw(&source, "IMG_0002.CR2", b"same bytes");
        let (library, _) = open(&temp.path().join("library"));

        let report = library.import_from(&source, ImportCallbacks::new()).unwrap();

        assert_eq!(report.count(ImportOutcome::Imported), 1);
        assert_eq!(report.count(ImportOutcome::AlreadyInLibrary), 1);
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn missing_source_is_a_batch_error() {
        let temp = TempDir::new().unwrap();
        let (library, _) = open(&temp.path().join("library"));

        let result = library.import_from(&temp.path().join("nowhere"), ImportCallbacks::new());

        assert!(matches!(result, Err(ref e) if e.is_fatal()));
    }

    #[test]
    fn reopen_loads_existing_records() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "IMG_0001.CR2", b"raw one");
        let root = temp.path().join("library");

        let digest = {
            let (library, _) = open(&root);
            let report = library.import_from(&source, ImportCallbacks::new()).unwrap();
            report.imported[0].digest.clone()
        };

        let (reopened, _) = open(&root);
        assert_eq!(reopened.len(), 1);
        assert!(reopened.find(&digest).is_some());
    }

    #[test]
    fn missing_sidecar_is_rewritten_on_reimport() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "IMG_0001.CR2", b"raw one");
        let (library, _) = open(&temp.path().join("library"));

        let report = library.import_from(&source, ImportCallbacks::new()).unwrap();
        let sidecar = library
            .root()
            .join(format!("{}.json", report.imported[0].digest));
        fs::remove_file(&sidecar).unwrap();

        let second = library.import_from(&source, ImportCallbacks::new()).unwrap();

        assert_eq!(second.count(ImportOutcome::Repaired), 1);
        assert!(sidecar.is_file());
    }

    #[test]
    fn stale_developed_path_is_corrected_once() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "IMG_0001.CR2", b"raw one");
        let (library, calls) = open(&temp.path().join("library"));
        let report = library.import_from(&source, ImportCallbacks::new()).unwrap();
        let digest = report.imported[0].digest.clone();
        let stale = SidecarRecord::new(digest.clone(), PathBuf::from("library/.cache/moved.jpg"));
        library.sidecars.write(&stale).unwrap();
        library.write_index().replace(stale);

        let second = library.import_from(&source, ImportCallbacks::new()).unwrap();
        let third = library.import_from(&source, ImportCallbacks::new()).unwrap();

        assert_eq!(second.count(ImportOutcome::Repaired), 1);
        assert_eq!(third.count(ImportOutcome::AlreadyInLibrary), 1);
        let expected = library.cache_dir().join(format!("{}.jpg", digest));
        assert_eq!(second.imported[0].image.derived_path(), expected.as_path());
        assert_eq!(library.find(&digest).unwrap().derived_path(), expected.as_path());
        assert_eq!(
            library.sidecars.read(&digest).unwrap().developed_path(),
            expected.as_path()
        );
        // The cached image was still there, so nothing was redeveloped
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn verification_can_be_disabled() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "IMG_0001.CR2", b"raw one");
        let library = Library::builder(temp.path().join("library"))
            .raw_decoder(Box::new(PngDecoder {
                calls: Arc::new(AtomicUsize::new(0)),
            }))
            .verify_existing(false)
            .open()
            .unwrap();

        let report = library.import_from(&source, ImportCallbacks::new()).unwrap();
        fs::remove_file(report.imported[0].image.derived_path()).unwrap();

        let second = library.import_from(&source, ImportCallbacks::new()).unwrap();

        assert_eq!(second.count(ImportOutcome::AlreadyInLibrary), 1);
        assert!(!report.imported[0].image.derived_path().exists());
    }

    #[test]
    fn importing_the_library_into_itself_changes_nothing() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "IMG_0001.CR2", b"raw one");
        let (library, calls) = open(&temp.path().join("library"));
        library.import_from(&source, ImportCallbacks::new()).unwrap();

        let report = library
            .import_from(library.root(), ImportCallbacks::new())
            .unwrap();

        assert_eq!(report.total_files, 1);
        assert_eq!(report.count(ImportOutcome::AlreadyInLibrary), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn library_copy_of_the_scanned_size_is_kept() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "IMG_0001.CR2", b"raw one");
        let root = temp.path().join("library");
        let digest = crate::core::hasher::Sha256Hasher::new().hash_bytes(b"raw one");
        fs::create_dir(&root).unwrap();
        let copy = write_raw(&root, &format!("{}.CR2", digest), b"raw two");
        let (library, _) = open(&root);

        let report = library.import_from(&source, ImportCallbacks::new()).unwrap();

        assert_eq!(report.count(ImportOutcome::Imported), 1);
        assert_eq!(fs::read(&copy).unwrap(), b"raw two");
    }

    #[test]
    fn query_filters_in_index_order() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        write_raw(&source, "A.CR2", b"a");
        write_raw(&source, "B.CR2", b"b");
        write_raw(&source, "C.CR2", b"c");
        let (library, _) = open(&temp.path().join("library"));
        let report = library.import_from(&source, ImportCallbacks::new()).unwrap();
        let skipped = report.imported[1].digest.clone();

        let selection = library.query(move |image| image.digest() != &skipped);

        let digests: Vec<_> = selection.iter().map(|i| i.digest().clone()).collect();
        assert_eq!(
            digests,
            vec![report.imported[0].digest.clone(), report.imported[2].digest.clone()]
        );
    }

    #[test]
    fn refresh_keeps_cursor_on_same_photo() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        fs::create_dir(&first).unwrap();
        fs::create_dir(&second).unwrap();
        write_raw(&first, "A.CR2", b"a");
        write_raw(&first, "B.CR2", b"b");
        write_raw(&second, "C.CR2", b"c");
        let (library, _) = open(&temp.path().join("library"));
        library.import_from(&first, ImportCallbacks::new()).unwrap();

        let mut selection = library.query_all();
        let target = selection.next().unwrap().digest().clone();
        library.import_from(&second, ImportCallbacks::new()).unwrap();

        let refreshed = library.refresh(&selection);

        assert_eq!(refreshed.len(), 3);
        assert_eq!(refreshed.current().unwrap().digest(), &target);
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn refresh_shared_updates_in_place() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("card");
        fs::create_dir(&source).unwrap();
        let (library, _) = open(&temp.path().join("library"));
        let shared = SharedSelection::new(library.query_all());

        write_raw(&source, "A.CR2", b"a");
        library.import_from(&source, ImportCallbacks::new()).unwrap();
        library.refresh_shared(&shared);

        assert_eq!(shared.len(), 1);
        assert!(shared.current().is_some());
    }
}
