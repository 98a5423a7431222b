//! Trait and value type for content digests.

use crate::error::HashError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Stable identity of an imported asset: the hex digest of its bytes.
///
/// Two byte-identical raw files always share a digest, so the digest names the
/// library copy, the sidecar and the developed image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Build a digest from raw hash output
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// The full lowercase hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display (first 12 characters)
    pub fn short(&self) -> &str {
        let end = self.0.len().min(12);
        &self.0[..end]
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error returned when parsing a digest from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDigest(pub String);

impl fmt::Display for InvalidDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a hex content digest: {:?}", self.0)
    }
}

impl std::error::Error for InvalidDigest {}

impl FromStr for ContentDigest {
    type Err = InvalidDigest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidDigest(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

/// Computes content digests.
///
/// Implementations must be deterministic and collision resistant; the library
/// treats equal digests as the same photo.
pub trait ContentHasher: Send + Sync {
    /// Digest an in-memory buffer
    fn hash_bytes(&self, bytes: &[u8]) -> ContentDigest;

    /// Digest a file's contents. Fails only if the file can't be read.
    fn hash_file(&self, path: &Path) -> Result<ContentDigest, HashError>;
}
