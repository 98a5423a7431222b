//! Library configuration and builder.

use super::Library;
use crate::core::develop::{
    CommandDecoder, DecoderConfig, DevelopmentPipeline, FormatConverter, JpegConverter, RawDecoder,
};
use crate::core::hasher::{ContentHasher, Sha256Hasher};
use crate::core::scanner::ScanConfig;
use crate::core::sidecar::{SidecarIndex, SidecarStore};
use crate::error::LibraryError;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};
use std::time::Duration;

/// Name of the developed-image cache directory inside the library root
pub const CACHE_DIR_NAME: &str = ".cache";

/// Configuration for a library
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Library root: raw copies and sidecars live here
    pub root: PathBuf,
    /// How import sources are scanned (including the raw extension list)
    pub scan: ScanConfig,
    /// External decoder invocation
    pub decoder: DecoderConfig,
    /// JPEG quality of developed images
    pub jpeg_quality: u8,
    /// Re-check the library copy and developed image of already-imported
    /// assets, restoring whichever is missing
    pub verify_existing: bool,
}

impl LibraryConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scan: ScanConfig::default(),
            decoder: DecoderConfig::default(),
            jpeg_quality: 90,
            verify_existing: true,
        }
    }

    /// Directory holding developed images
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR_NAME)
    }
}

/// Builder for opening a library
pub struct LibraryBuilder {
    config: LibraryConfig,
    hasher: Option<Box<dyn ContentHasher>>,
    decoder: Option<Box<dyn RawDecoder>>,
    converter: Option<Box<dyn FormatConverter>>,
}

impl LibraryBuilder {
    /// Create a new builder for the library at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::from_config(LibraryConfig::new(root))
    }

    /// Start from an existing configuration
    pub fn from_config(config: LibraryConfig) -> Self {
        Self {
            config,
            hasher: None,
            decoder: None,
            converter: None,
        }
    }

    /// Raw file extensions to import (case-sensitive)
    pub fn raw_extensions(mut self, extensions: Vec<String>) -> Self {
        self.config.scan.extensions = extensions;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan = config;
        self
    }

    /// Include hidden files when scanning import sources
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan.include_hidden = include;
        self
    }

    /// Configure the external decoder
    pub fn decoder_config(mut self, config: DecoderConfig) -> Self {
        self.config.decoder = config;
        self
    }

    /// Time limit for a single decoder run
    pub fn decoder_timeout(mut self, timeout: Duration) -> Self {
        self.config.decoder.timeout = timeout;
        self
    }

    /// JPEG quality of developed images
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality;
        self
    }

    /// Whether re-imports check for and repair missing files
    pub fn verify_existing(mut self, verify: bool) -> Self {
        self.config.verify_existing = verify;
        self
    }

    /// Use a custom hasher
    pub fn hasher(mut self, hasher: Box<dyn ContentHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Use a custom raw decoder instead of the configured command
    pub fn raw_decoder(mut self, decoder: Box<dyn RawDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Use a custom format converter instead of JPEG
    pub fn converter(mut self, converter: Box<dyn FormatConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Create the library directories if needed and load every sidecar.
    ///
    /// The root is resolved to an absolute path. An empty or brand new
    /// library opens with zero records. A malformed sidecar aborts the open.
    pub fn open(self) -> Result<Library, LibraryError> {
        let mut config = self.config;

        for dir in [&config.root, &config.cache_dir()] {
            fs::create_dir_all(dir).map_err(|source| LibraryError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;
        }

        // Developed paths recorded in sidecars must not depend on the
        // working directory the library was opened from
        config.root =
            fs::canonicalize(&config.root).map_err(|source| LibraryError::CreateDirectory {
                path: config.root.clone(),
                source,
            })?;
        let cache_dir = config.cache_dir();

        let sidecars = SidecarStore::new(&config.root);
        let index = SidecarIndex::from_records(sidecars.load_all()?);

        tracing::info!(
            root = %config.root.display(),
            records = index.len(),
            "Opened library"
        );

        let decoder = self
            .decoder
            .unwrap_or_else(|| Box::new(CommandDecoder::new(config.decoder.clone())));
        let converter = self
            .converter
            .unwrap_or_else(|| Box::new(JpegConverter::new(config.jpeg_quality)));
        let pipeline = DevelopmentPipeline::new(cache_dir, decoder, converter);

        Ok(Library {
            hasher: self.hasher.unwrap_or_else(|| Box::new(Sha256Hasher::new())),
            sidecars,
            pipeline,
            index: RwLock::new(index),
            import_lock: Mutex::new(()),
            config,
        })
    }
}
