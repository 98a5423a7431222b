//! Event channel implementation using crossbeam-channel.
//!
//! Carries import progress from the importing thread to any UI layer.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};

use super::ImportEvent;

/// Sends import events from the library.
///
/// Thin wrapper around crossbeam's Sender; cheap to clone and `Send`.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<ImportEvent>,
}

impl EventSender {
    /// Send an event. Non-blocking unless a bounded channel is full.
    ///
    /// Events sent after the receiver is dropped are discarded.
    pub fn send(&self, event: ImportEvent) {
        let _ = self.inner.send(event);
    }
}

/// Receives import events, typically on a UI thread
pub struct EventReceiver {
    inner: Receiver<ImportEvent>,
}

impl EventReceiver {
    /// Block until the next event is received
    pub fn recv(&self) -> Option<ImportEvent> {
        self.inner.recv().ok()
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<ImportEvent> {
        self.inner.try_recv().ok()
    }

    /// Returns an iterator over received events
    pub fn iter(&self) -> impl Iterator<Item = ImportEvent> + '_ {
        self.inner.iter()
    }
}

/// Constructors for sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// Create an unbounded event channel
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }

    /// Create a bounded event channel. The importing thread blocks when a
    /// slow consumer lets it fill up.
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A sender whose events go nowhere
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}
