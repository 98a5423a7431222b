//! # Photoshell
//!
//! A content-addressed photo library: import raw camera files once, develop
//! them once, browse them forever.
//!
//! ## Core Philosophy
//! - **Content is identity** - a photo is its bytes; importing it twice is a no-op
//! - **Never lose work** - every file lands via temp-then-rename
//! - **Sidecars are the truth** - the index is rebuilt from them on every open
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - Import, development cache and selections
//! - `events` - Event-driven progress reporting (GUI-ready)
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{PhotoshellError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
/// Filtering follows `RUST_LOG`; output goes to stderr so it never mixes
/// with JSON on stdout. Calling it twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
