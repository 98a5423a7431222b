//! # Events Module
//!
//! Channel-based progress reporting for UI layers that would rather consume
//! a stream than register callbacks.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             ImportEvent::FileDone { progress, .. } => println!("{:.0}%", progress * 100.0),
//!             ImportEvent::Completed { summary } => println!("{} new", summary.imported),
//!             _ => {}
//!         }
//!     }
//! });
//!
//! library.import_with_events(source, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
