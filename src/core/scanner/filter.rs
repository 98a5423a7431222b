//! File filtering logic for the scanner.

use std::collections::HashSet;
use std::path::Path;

/// Raw formats imported when nothing else is configured
pub const DEFAULT_RAW_EXTENSIONS: &[&str] = &["CR2"];

/// Decides which files are raw camera files worth importing.
///
/// Extension matching is case-sensitive: `IMG_0001.CR2` is accepted by the
/// default filter, `IMG_0001.cr2` is not.
pub struct RawFilter {
    /// File extensions to include, compared verbatim
    extensions: HashSet<String>,
    /// Whether to include hidden files
    include_hidden: bool,
}

impl RawFilter {
    /// Create a new filter accepting the default raw formats
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_RAW_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().collect();
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden && is_hidden(path) {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(ext))
            .unwrap_or(false)
    }
}

impl Default for RawFilter {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
