//! # Sidecar Module
//!
//! Durable per-asset metadata. Every imported photo gets one small JSON file
//! next to its library copy, named after its content digest:
//!
//! ```text
//! <library>/
//! ├── 3f2a…c9.CR2      raw copy
//! ├── 3f2a…c9.json     sidecar {"hash": "3f2a…c9", "developed_path": "…"}
//! └── .cache/
//!     └── 3f2a…c9.jpg  developed image
//! ```
//!
//! ## Types
//! - `SidecarRecord` - the persisted record, immutable once written
//! - `SidecarStore` - reads and writes sidecar files
//! - `SidecarIndex` - in-memory, digest-addressable view of all records

mod index;
mod store;

pub use index::SidecarIndex;
pub use store::{SidecarStore, SIDECAR_EXTENSION};

use crate::core::hasher::ContentDigest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata persisted for one imported photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarRecord {
    /// Content digest of the raw file
    pub hash: ContentDigest,
    /// Where the developed image lives
    pub developed_path: PathBuf,
}

impl SidecarRecord {
    pub fn new(hash: ContentDigest, developed_path: PathBuf) -> Self {
        Self {
            hash,
            developed_path,
        }
    }

    pub fn digest(&self) -> &ContentDigest {
        &self.hash
    }

    pub fn developed_path(&self) -> &Path {
        &self.developed_path
    }
}
