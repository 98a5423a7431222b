//! # Selection Module
//!
//! A filtered, ordered, cursor-addressable view over the library.
//!
//! A `Selection` is a snapshot: it is built by `Library::query` and never
//! changes when the library grows. Call `Library::refresh` to get a new
//! snapshot that keeps the same photo under the cursor.
//!
//! ## Example
//! ```rust,ignore
//! let mut selection = library.query(|image| image.derived_path().exists());
//! while let Some(image) = selection.current() {
//!     show(image.derived_path());
//!     selection.next();
//! }
//! ```

mod image;

pub use image::Image;

use crate::core::hasher::ContentDigest;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Filter applied by a query. Kept by the selection so it can be re-run.
pub type Predicate = Arc<dyn Fn(&Image) -> bool + Send + Sync>;

/// Ordered images plus a navigation cursor.
///
/// Invariant: `cursor < images.len()` whenever `images` is non-empty.
#[derive(Clone)]
pub struct Selection {
    query: Predicate,
    images: Vec<Image>,
    cursor: usize,
}

impl Selection {
    /// Create an empty selection for a query
    pub fn new(query: Predicate) -> Self {
        Self {
            query,
            images: Vec::new(),
            cursor: 0,
        }
    }

    /// The predicate this selection was built from
    pub fn query(&self) -> &Predicate {
        &self.query
    }

    /// Add an image at the end. The cursor stays where it is.
    pub fn append(&mut self, image: Image) {
        self.images.push(image);
    }

    /// Image under the cursor, `None` when empty
    pub fn current(&self) -> Option<&Image> {
        self.images.get(self.cursor)
    }

    /// Cursor position, `None` when empty
    pub fn position(&self) -> Option<usize> {
        (!self.images.is_empty()).then_some(self.cursor)
    }

    /// Advance, wrapping to the start
    pub fn next(&mut self) -> Option<&Image> {
        let len = self.images.len();
        if len > 1 {
            self.cursor = (self.cursor + 1) % len;
        }
        self.current()
    }

    /// Step back, wrapping to the end
    pub fn prev(&mut self) -> Option<&Image> {
        let len = self.images.len();
        if len > 1 {
            self.cursor = (self.cursor + len - 1) % len;
        }
        self.current()
    }

    /// Move the cursor to the first image with `digest`.
    ///
    /// Leaves the cursor alone when no image matches.
    pub fn jump(&mut self, digest: &ContentDigest) -> Option<&Image> {
        if let Some(position) = self.images.iter().position(|i| i.digest() == digest) {
            self.cursor = position;
        }
        self.current()
    }

    /// Traverse every image in order. Independent of the cursor; each call
    /// starts from the beginning.
    pub fn iter(&self) -> std::slice::Iter<'_, Image> {
        self.images.iter()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Image;
    type IntoIter = std::slice::Iter<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("len", &self.images.len())
            .field("cursor", &self.position())
            .field("current", &self.current().map(|i| i.digest().short()))
            .finish()
    }
}

/// A selection shared between threads.
///
/// Every read and cursor move takes the lock, so a UI thread stepping
/// through photos never observes a half-applied refresh. Accessors return
/// owned images because the lock is released before they return.
#[derive(Debug, Clone)]
pub struct SharedSelection {
    inner: Arc<Mutex<Selection>>,
}

impl SharedSelection {
    pub fn new(selection: Selection) -> Self {
        Self {
            inner: Arc::new(Mutex::new(selection)),
        }
    }

    pub fn current(&self) -> Option<Image> {
        self.lock().current().cloned()
    }

    pub fn next(&self) -> Option<Image> {
        self.lock().next().cloned()
    }

    pub fn prev(&self) -> Option<Image> {
        self.lock().prev().cloned()
    }

    pub fn jump(&self, digest: &ContentDigest) -> Option<Image> {
        self.lock().jump(digest).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Replace the selection with the result of `update`, computed while the
    /// lock is held
    pub fn update<F>(&self, update: F)
    where
        F: FnOnce(&Selection) -> Selection,
    {
        let mut guard = self.lock();
        let replacement = update(&guard);
        *guard = replacement;
    }

    fn lock(&self) -> MutexGuard<'_, Selection> {
        // Every mutation keeps the cursor valid, so a poisoned lock still
        // guards a consistent selection
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
