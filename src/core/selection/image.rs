//! Read-only view of a library asset.

use crate::core::hasher::ContentDigest;
use crate::core::sidecar::SidecarRecord;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// What the presentation layer sees of a photo: its identity and the path of
/// the developed image to display.
///
/// Clones share the underlying record with the library index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    #[serde(flatten)]
    record: Arc<SidecarRecord>,
}

impl Image {
    pub fn new(record: Arc<SidecarRecord>) -> Self {
        Self { record }
    }

    pub fn digest(&self) -> &ContentDigest {
        &self.record.hash
    }

    pub fn derived_path(&self) -> &Path {
        &self.record.developed_path
    }

    pub fn record(&self) -> &SidecarRecord {
        &self.record
    }
}

impl From<SidecarRecord> for Image {
    fn from(record: SidecarRecord) -> Self {
        Self::new(Arc::new(record))
    }
}
