//! # Develop Module
//!
//! Turns raw camera files into display-ready images, at most once per asset.
//!
//! ## Stages
//! 1. **Cache lookup** - `<cache>/<digest>.<ext>` already exists? Done.
//! 2. **Decode** - an external tool (`dcraw` by default) writes an
//!    intermediate image to stdout
//! 3. **Convert** - the intermediate image is encoded into the derived format
//!    in a temp file, which is renamed into place only on success
//!
//! A failed or interrupted development never leaves a partial file under the
//! cache name, so a cache hit always means a complete image.

mod converter;
mod decoder;

pub use converter::{FormatConverter, JpegConverter};
pub use decoder::{CommandDecoder, DecoderConfig, RawDecoder};

use crate::core::hasher::ContentDigest;
use crate::error::DevelopError;
use std::fs;
use std::path::{Path, PathBuf};

/// Produces and caches developed images keyed by content digest
pub struct DevelopmentPipeline {
    cache_dir: PathBuf,
    decoder: Box<dyn RawDecoder>,
    converter: Box<dyn FormatConverter>,
}

impl DevelopmentPipeline {
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        decoder: Box<dyn RawDecoder>,
        converter: Box<dyn FormatConverter>,
    ) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            decoder,
            converter,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Where the developed image for `digest` lives (whether or not it exists)
    pub fn cache_path(&self, digest: &ContentDigest) -> PathBuf {
        self.cache_dir
            .join(format!("{}.{}", digest, self.converter.extension()))
    }

    pub fn is_cached(&self, digest: &ContentDigest) -> bool {
        self.cache_path(digest).is_file()
    }

    /// Develop `raw_path`, returning the path of the derived image.
    ///
    /// Returns the cached file untouched when one exists.
    pub fn develop(&self, digest: &ContentDigest, raw_path: &Path) -> Result<PathBuf, DevelopError> {
        let destination = self.cache_path(digest);

        if destination.is_file() {
            tracing::debug!(digest = %digest.short(), "Developed image cache hit");
            return Ok(destination);
        }

        let io_error = |source| DevelopError::Io {
            path: destination.clone(),
            source,
        };

        let intermediate = self.decoder.decode(raw_path)?;

        fs::create_dir_all(&self.cache_dir).map_err(io_error)?;
        let staging = tempfile::Builder::new()
            .prefix(".develop-")
            .suffix(&format!(".{}", self.converter.extension()))
            .tempfile_in(&self.cache_dir)
            .map_err(io_error)?;

        // Dropping `staging` on error removes the partial file
        self.converter.convert(&intermediate, staging.path())?;
        staging.persist(&destination).map_err(|e| io_error(e.error))?;

        tracing::debug!(
            digest = %digest.short(),
            raw = %raw_path.display(),
            developed = %destination.display(),
            "Developed raw file"
        );

        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Decoder that ignores the raw file and returns a tiny PNG
    struct CountingDecoder {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl RawDecoder for CountingDecoder {
        fn decode(&self, raw_path: &Path) -> Result<Vec<u8>, DevelopError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DevelopError::EmptyOutput {
                    program: "fake".to_string(),
                    path: raw_path.to_path_buf(),
                });
            }
            let image = RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]));
            let mut bytes = Cursor::new(Vec::new());
            image.write_to(&mut bytes, ImageFormat::Png).unwrap();
            Ok(bytes.into_inner())
        }
    }

    fn pipeline(cache_dir: &Path, fail: bool) -> (DevelopmentPipeline, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let decoder = CountingDecoder {
            calls: Arc::clone(&calls),
            fail,
        };
        let pipeline = DevelopmentPipeline::new(
            cache_dir,
            Box::new(decoder),
            Box::new(JpegConverter::default()),
        );
        (pipeline, calls)
    }

    fn digest() -> ContentDigest {
        ContentDigest::from_bytes(&[0x42; 32])
    }

    #[test]
    fn cache_path_uses_digest_and_extension() {
        let temp_dir = TempDir::new().unwrap();
        let (pipeline, _) = pipeline(temp_dir.path(), false);

        let path = pipeline.cache_path(&digest());

        assert_eq!(path, temp_dir.path().join(format!("{}.jpg", digest())));
    }

    #[test]
    fn develop_writes_cache_entry() {
        let temp_dir = TempDir::new().unwrap();
        let (pipeline, calls) = pipeline(temp_dir.path(), false);

        let developed = pipeline
            .develop(&digest(), Path::new("/card/IMG_0001.CR2"))
            .unwrap();

        assert!(developed.is_file());
        assert!(pipeline.is_cached(&digest()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn second_develop_is_a_cache_hit() {
        let temp_dir = TempDir::new().unwrap();
        let (pipeline, calls) = pipeline(temp_dir.path(), false);

        let first = pipeline.develop(&digest(), Path::new("/card/a.CR2")).unwrap();
        let second = pipeline.develop(&digest(), Path::new("/card/b.CR2")).unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_develop_leaves_no_cache_entry() {
        let temp_dir = TempDir::new().unwrap();
        let (pipeline, _) = pipeline(temp_dir.path(), true);

        let result = pipeline.develop(&digest(), Path::new("/card/IMG_0001.CR2"));

        assert!(result.is_err());
        assert!(!pipeline.is_cached(&digest()));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_conversion_removes_staging_file() {
        struct GarbageDecoder;
        impl RawDecoder for GarbageDecoder {
            fn decode(&self, _: &Path) -> Result<Vec<u8>, DevelopError> {
                Ok(b"not an image".to_vec())
            }
        }

        let temp_dir = TempDir::new().unwrap();
        let pipeline = DevelopmentPipeline::new(
            temp_dir.path(),
            Box::new(GarbageDecoder),
            Box::new(JpegConverter::default()),
        );

        let result = pipeline.develop(&digest(), Path::new("/card/IMG_0001.CR2"));

        assert!(matches!(result, Err(DevelopError::ConversionFailed { .. })));
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
