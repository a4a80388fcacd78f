//! # Snapshot View
//!
//! Read-only, display-ready view over a [`RollingTelemetryStore`].

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use super::channel::{Channel, ChannelValue};
use super::reading::{ConnectionStatus, Reading, StatusColor};
use super::store::RollingTelemetryStore;

/// Minimum number of ticks needed before a line chart is worth drawing
pub const MIN_CHART_TICKS: usize = 2;

/// Derived accessors for the renderer. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotView<'a> {
    store: &'a RollingTelemetryStore,
}

impl<'a> SnapshotView<'a> {
    #[must_use]
    pub fn new(store: &'a RollingTelemetryStore) -> Self {
        Self { store }
    }

    /// Most recent reading, or `None` before the first tick
    #[must_use]
    pub fn latest(&self) -> Option<&'a Reading> {
        self.store.latest()
    }

    #[must_use]
    pub fn current_length(&self) -> usize {
        self.store.current_length()
    }

    /// Time-aligned series for the requested channels.
    ///
    /// Every series has `current_length()` entries; index `i` of each series
    /// comes from the same tick.
    #[must_use]
    pub fn series(&self, channels: &[Channel]) -> BTreeMap<Channel, Vec<ChannelValue>> {
        channels
            .iter()
            .map(|&channel| (channel, self.store.channel_values(channel)))
            .collect()
    }

    /// Time spanned by the retained window (latest minus oldest timestamp).
    ///
    /// Once the window is full this stops growing and tracks the window
    /// length; see [`SnapshotView::session_elapsed`] for the full session.
    #[must_use]
    pub fn flight_duration(&self) -> Option<Duration> {
        let first = self.store.first()?;
        let latest = self.store.latest()?;
        Some(latest.timestamp - first.timestamp)
    }

    /// Time from session start to the latest reading. Never shrinks on eviction.
    #[must_use]
    pub fn session_elapsed(&self) -> Option<Duration> {
        let latest = self.store.latest()?;
        let elapsed = latest.timestamp - self.store.session_start()?;
        Some(elapsed.max(Duration::zero()))
    }

    /// Whether enough ticks are held to draw line charts
    #[must_use]
    pub fn has_chart_data(&self) -> bool {
        self.current_length() >= MIN_CHART_TICKS
    }

    /// Connection status per tick, with its timeline marker color
    #[must_use]
    pub fn status_timeline(&self) -> Vec<(DateTime<Utc>, ConnectionStatus, StatusColor)> {
        self.store
            .readings()
            .map(|r| (r.timestamp, r.connection_status, r.connection_status.color()))
            .collect()
    }
}

impl<'a> From<&'a RollingTelemetryStore> for SnapshotView<'a> {
    fn from(store: &'a RollingTelemetryStore) -> Self {
        Self::new(store)
    }
}
