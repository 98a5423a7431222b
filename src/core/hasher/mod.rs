//! # Hasher Module
//!
//! Computes content digests for raw files.
//!
//! The digest is the identity of every asset in the library: the library copy,
//! the sidecar and the developed image are all named after it. Importing the
//! same bytes twice therefore lands on the same files.
//!
//! ## Example
//! ```rust,ignore
//! use photoshell::core::hasher::{ContentHasher, Sha256Hasher};
//!
//! let digest = Sha256Hasher.hash_file(&path)?;
//! println!("{}", digest.short());
//! ```

mod sha256;
mod traits;

pub use sha256::Sha256Hasher;
pub use traits::{ContentDigest, ContentHasher, InvalidDigest};
