//! In-memory index of sidecar records.

use super::SidecarRecord;
use crate::core::hasher::ContentDigest;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered, digest-addressable collection of every record in a library.
///
/// Order is insertion order: load order at open time, then import order.
/// A digest appears at most once.
#[derive(Debug, Default)]
pub struct SidecarIndex {
    records: Vec<Arc<SidecarRecord>>,
    positions: HashMap<ContentDigest, usize>,
}

impl SidecarIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from loaded records. Later duplicates of a digest are
    /// dropped.
    pub fn from_records(records: impl IntoIterator<Item = SidecarRecord>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Add a record, returning the indexed one.
    ///
    /// If the digest is already indexed the existing record wins and is
    /// returned unchanged.
    pub fn insert(&mut self, record: SidecarRecord) -> Arc<SidecarRecord> {
        if let Some(existing) = self.find(&record.hash) {
            return Arc::clone(existing);
        }

        let record = Arc::new(record);
        self.positions
            .insert(record.hash.clone(), self.records.len());
        self.records.push(Arc::clone(&record));
        record
    }

    /// Swap in a corrected record for its digest, keeping its position.
    /// Unknown digests are appended.
    pub fn replace(&mut self, record: SidecarRecord) -> Arc<SidecarRecord> {
        let record = Arc::new(record);
        match self.positions.get(&record.hash) {
            Some(&i) => self.records[i] = Arc::clone(&record),
            None => {
                self.positions
                    .insert(record.hash.clone(), self.records.len());
                self.records.push(Arc::clone(&record));
            }
        }
        record
    }

    pub fn exists(&self, digest: &ContentDigest) -> bool {
        self.positions.contains_key(digest)
    }

    pub fn find(&self, digest: &ContentDigest) -> Option<&Arc<SidecarRecord>> {
        self.positions.get(digest).map(|&i| &self.records[i])
    }

    /// Records in index order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<SidecarRecord>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
