//! Ready-listener registration and delivery
//!
//! The managed side registers a single `DtlsRtpCallback` whose
//! `onReady(dtlsJson, rtpJson)` receives the producer announcement. The slot
//! holds at most one live listener; installing a new one (or clearing)
//! drops the previous listener, which on the JNI side releases its global
//! reference.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// Delivery failure raised by a [`ReadyListener`] implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// The listener object has no resolvable `onReady(String, String)` method
    #[error("listener has no onReady(String, String) method")]
    MethodMissing,

    /// The listener was reached but the invocation failed
    #[error("listener callback failed: {0}")]
    Callback(String),
}

/// Outcome of one delivery attempt through the slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The listener received both payloads
    Delivered,
    /// No listener registered; the notification was skipped
    NoListener,
    /// A listener is registered but delivery failed
    Failed(NotifyError),
}

/// Receiver for the DTLS/RTP ready notification
pub trait ReadyListener: Send + Sync {
    /// Handle the wire pair, DTLS descriptor first.
    fn on_ready(&self, dtls_json: &str, rtp_json: &str) -> std::result::Result<(), NotifyError>;
}

/// Holder for at most one live [`ReadyListener`]
///
/// The listener is invoked outside the lock, so a callback that re-enters
/// the slot (replacing or clearing itself) cannot deadlock.
#[derive(Default)]
pub struct ListenerSlot {
    inner: Mutex<Option<Arc<dyn ReadyListener>>>,
}

impl ListenerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `listener`, dropping any previous one. `None` clears the slot.
    pub fn replace(&self, listener: Option<Arc<dyn ReadyListener>>) {
        *self.inner.lock() = listener;
    }

    /// Drop the stored listener, if any.
    pub fn clear(&self) {
        *self.inner.lock() = None;
    }

    /// Whether a listener is currently registered.
    pub fn is_registered(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Deliver the wire pair to the stored listener.
    pub fn notify_ready(&self, dtls_json: &str, rtp_json: &str) -> Delivery {
        let listener = self.inner.lock().clone();
        match listener {
            None => Delivery::NoListener,
            Some(listener) => match listener.on_ready(dtls_json, rtp_json) {
                Ok(()) => Delivery::Delivered,
                Err(e) => Delivery::Failed(e),
            },
        }
    }
}
