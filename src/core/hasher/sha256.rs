//! SHA-256 content hasher.

use super::traits::{ContentDigest, ContentHasher};
use crate::error::HashError;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read buffer size for streaming file hashes
const BLOCK_SIZE: usize = 64 * 1024;

/// Default hasher: SHA-256 over the raw file bytes (256-bit digests)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Sha256Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl ContentHasher for Sha256Hasher {
    fn hash_bytes(&self, bytes: &[u8]) -> ContentDigest {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        ContentDigest::from_bytes(&hasher.finalize())
    }

    fn hash_file(&self, path: &Path) -> Result<ContentDigest, HashError> {
        let io_error = |source| HashError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let mut reader = BufReader::with_capacity(BLOCK_SIZE, file);
        let mut hasher = Sha256::new();
        let mut block = vec![0u8; BLOCK_SIZE];

        loop {
            let read = reader.read(&mut block).map_err(io_error)?;
            if read == 0 {
                break;
            }
            hasher.update(&block[..read]);
        }

        Ok(ContentDigest::from_bytes(&hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn hashes_known_vector() {
        let digest = Sha256Hasher.hash_bytes(b"abc");
        assert_eq!(
            digest.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn file_hash_matches_byte_hash() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("IMG_0001.CR2");
        // Larger than one block so the streaming loop runs more than once
        let content: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        File::create(&path).unwrap().write_all(&content).unwrap();

        let from_file = Sha256Hasher.hash_file(&path).unwrap();
        let from_bytes = Sha256Hasher.hash_bytes(&content);

        assert_eq!(from_file, from_bytes);
    }

    #[test]
    fn identical_files_share_a_digest() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.CR2");
        let b = temp_dir.path().join("b.CR2");
        File::create(&a).unwrap().write_all(b"same sensor data").unwrap();
        File::create(&b).unwrap().write_all(b"same sensor data").unwrap();

        assert_eq!(
            Sha256Hasher.hash_file(&a).unwrap(),
            Sha256Hasher.hash_file(&b).unwrap()
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let error = Sha256Hasher
            .hash_file(Path::new("/nonexistent/IMG_0001.CR2"))
            .unwrap_err();
        assert!(error.to_string().contains("IMG_0001.CR2"));
    }
}
