//! # Telemetry Hub
//!
//! Single-writer, multi-reader access to the rolling store.
//!
//! Each append builds a new store from the current one and publishes it as an
//! immutable `Arc` snapshot over a `tokio::sync::watch` channel. Readers only
//! ever see whole ticks, and a snapshot a reader already holds never changes.
//! Writing needs `&mut TelemetryHub`, so there is exactly one writer.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use super::reading::Reading;
use super::store::RollingTelemetryStore;

/// Publishes store snapshots to any number of display clients
#[derive(Debug)]
pub struct TelemetryHub {
    tx: watch::Sender<Arc<RollingTelemetryStore>>,
}

impl TelemetryHub {
    /// Creates a hub around an empty store of the given capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_store(RollingTelemetryStore::new(capacity))
    }

    #[must_use]
    pub fn from_store(store: RollingTelemetryStore) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(store));
        Self { tx }
    }

    /// Appends a reading and publishes the resulting snapshot
    pub fn append(&mut self, reading: Reading) {
        let mut next = RollingTelemetryStore::clone(&self.tx.borrow());
        next.append(reading);
        let length = next.current_length();
        self.tx.send_replace(Arc::new(next));
        debug!("Published snapshot with {} ticks", length);
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<RollingTelemetryStore> {
        Arc::clone(&self.tx.borrow())
    }

    /// Receiver notified on every published snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<RollingTelemetryStore>> {
        self.tx.subscribe()
    }

    /// Publishes an empty store; the session clock restarts at the next reading
    pub fn reset(&mut self) {
        let mut next = RollingTelemetryStore::clone(&self.tx.borrow());
        next.reset();
        self.tx.send_replace(Arc::new(next));
        debug!("Telemetry session reset");
    }
}
