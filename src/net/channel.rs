//! Activity Channel
//!
//! Narrow seam over the external pub/sub transport so the engine never
//! depends on a concrete backend. The contract matches what the managed
//! realtime service provides: fire-and-forget publish, at-most-once
//! delivery, no ordering guarantee, and self-delivery.
//!
//! [`LocalChannel`] is the in-process implementation used by the demo
//! binary and the tests; a production backend wraps its own client behind
//! the same trait.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::net::wire::WireMessage;

/// Errors from the transport seam.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChannelError {
    /// The channel was closed; the activity is over.
    #[error("activity channel is closed")]
    Closed,
}

/// The pub/sub channel the activity runs over.
///
/// `publish` is fire-and-forget: implementations must not block on network
/// I/O and callers never await delivery. Subscribers receive every kind of
/// message, including their own publishes.
pub trait ActivityChannel: Send + Sync {
    /// Publish a message to every subscriber (including the publisher).
    fn publish(&self, msg: WireMessage) -> Result<(), ChannelError>;

    /// Subscribe to the message stream from this point on.
    fn subscribe(&self) -> broadcast::Receiver<WireMessage>;

    /// Close the channel; subscribers see the stream end. Idempotent.
    fn close(&self);
}

impl<C: ActivityChannel + ?Sized> ActivityChannel for std::sync::Arc<C> {
    fn publish(&self, msg: WireMessage) -> Result<(), ChannelError> {
        (**self).publish(msg)
    }

    fn subscribe(&self) -> broadcast::Receiver<WireMessage> {
        (**self).subscribe()
    }

    fn close(&self) {
        (**self).close()
    }
}

// =============================================================================
// LOCAL CHANNEL
// =============================================================================

/// In-process channel over `tokio::sync::broadcast`.
///
/// Slow subscribers that lag past the buffer lose the oldest messages,
/// which matches the at-most-once contract - a participant that misses a
/// snapshot simply renders the next one.
pub struct LocalChannel {
    tx: Mutex<Option<broadcast::Sender<WireMessage>>>,
}

impl LocalChannel {
    /// Create a channel with the given per-subscriber buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }
}

impl ActivityChannel for LocalChannel {
    fn publish(&self, msg: WireMessage) -> Result<(), ChannelError> {
        let guard = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            // send only fails with zero subscribers; fire-and-forget
            Some(tx) => {
                let _ = tx.send(msg);
                Ok(())
            }
            None => Err(ChannelError::Closed),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<WireMessage> {
        let guard = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(tx) => tx.subscribe(),
            None => {
                // Already closed: hand back a receiver whose stream has ended
                let (tx, rx) = broadcast::channel(1);
                drop(tx);
                rx
            }
        }
    }

    fn close(&self) {
        let mut guard = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        guard.take();
    }
}

// =============================================================================
// LOSSY WRAPPER
// =============================================================================

/// Wrapper that deterministically drops every Nth publish.
///
/// Exercises the loss tolerance of the protocol: the simulation must
/// converge even when an arbitrary subset of messages never arrives.
pub struct LossyChannel<C> {
    inner: C,
    drop_every: u64,
    sent: AtomicU64,
}

impl<C: ActivityChannel> LossyChannel<C> {
    /// Drop every `drop_every`-th message (1 drops everything).
    pub fn new(inner: C, drop_every: u64) -> Self {
        Self {
            inner,
            drop_every: drop_every.max(1),
            sent: AtomicU64::new(0),
        }
    }
}

impl<C: ActivityChannel> ActivityChannel for LossyChannel<C> {
    fn publish(&self, msg: WireMessage) -> Result<(), ChannelError> {
        let n = self.sent.fetch_add(1, Ordering::Relaxed) + 1;
        if n % self.drop_every == 0 {
            // Dropped on the floor: at-most-once permits this
            return Ok(());
        }
        self.inner.publish(msg)
    }

    fn subscribe(&self) -> broadcast::Receiver<WireMessage> {
        self.inner.subscribe()
    }

    fn close(&self) {
        self.inner.close();
    }
}
