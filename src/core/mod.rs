//! # Core Module
//!
//! The GUI-agnostic photo library engine.
//!
//! ## Modules
//! - `scanner` - Discovers raw files in directories
//! - `hasher` - Computes content digests
//! - `sidecar` - Persists per-photo metadata next to the library copy
//! - `develop` - Turns raw files into cached, displayable images
//! - `library` - Owns the index and orchestrates import
//! - `selection` - Filtered, navigable views over the library

pub mod develop;
pub mod hasher;
pub mod library;
pub mod scanner;
pub mod selection;
pub mod sidecar;

// Re-export commonly used types
pub use hasher::ContentDigest;
pub use library::{ImportCallbacks, ImportOutcome, ImportReport, Library, LibraryBuilder};
pub use selection::{Image, Selection, SharedSelection};
pub use sidecar::SidecarRecord;
