//! # photoshell CLI
//!
//! Command-line interface for the photo library.
//!
//! ## Usage
//! ```bash
//! photoshell import /media/card
//! photoshell list --output json
//! photoshell show 3f2a9c
//! ```

mod cli;

use photoshell::Result;

fn main() -> Result<()> {
    photoshell::init_tracing();
    cli::run()
}
