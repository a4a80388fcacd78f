//! # Rolling Telemetry Store
//!
//! Bounded window of the most recent readings.
//!
//! Readings are stored whole, oldest first, and channels are derived on
//! demand. Append and eviction therefore always move every channel together:
//! the value at index `i` of any channel comes from the same reading.
//!
//! ## Usage
//!
//! ```
//! use drone_telemetry::telemetry::RollingTelemetryStore;
//!
//! let store = RollingTelemetryStore::new(20);
//! assert_eq!(store.current_length(), 0);
//! assert!(store.channel("bogus").is_err());
//! ```

use chrono::{DateTime, SubsecRound, Utc};
use std::collections::VecDeque;
use tracing::trace;

use super::channel::{Channel, ChannelValue};
use super::reading::Reading;
use crate::error::Result;

/// Default window capacity in ticks
pub const DEFAULT_CAPACITY: usize = 20;

/// Rolling window of the last `capacity` readings
#[derive(Debug, Clone)]
pub struct RollingTelemetryStore {
    readings: VecDeque<Reading>,
    capacity: usize,
    session_start: Option<DateTime<Utc>>,
}

impl Default for RollingTelemetryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RollingTelemetryStore {
    /// Creates an empty store.
    ///
    /// The session clock starts at the timestamp of the first appended
    /// reading, so recorded flights replay with their own timeline.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Window size in ticks. Zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
            session_start: None,
        }
    }

    /// Creates an empty store with an explicit session start time.
    #[must_use]
    pub fn with_session_start(capacity: usize, session_start: DateTime<Utc>) -> Self {
        Self {
            session_start: Some(session_start.trunc_subsecs(0)),
            ..Self::new(capacity)
        }
    }

    /// Appends a reading, evicting the oldest ones beyond capacity.
    pub fn append(&mut self, reading: Reading) {
        if self.session_start.is_none() {
            self.session_start = Some(reading.timestamp);
        }
        self.readings.push_back(reading);
        while self.readings.len() > self.capacity {
            if let Some(evicted) = self.readings.pop_front() {
                trace!("Evicted reading from {}", evicted.timestamp);
            }
        }
    }

    /// Number of ticks currently held (0 to capacity)
    #[must_use]
    pub fn current_length(&self) -> usize {
        self.readings.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Start of the session clock, `None` until the first reading after
    /// creation or reset (unless given explicitly)
    #[must_use]
    pub fn session_start(&self) -> Option<DateTime<Utc>> {
        self.session_start
    }

    /// History of one channel by name, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::UnknownChannel`](crate::error::TelemetryError::UnknownChannel)
    /// if `name` is not one of the fixed channel names.
    pub fn channel(&self, name: &str) -> Result<Vec<ChannelValue>> {
        let channel: Channel = name.parse()?;
        Ok(self.channel_values(channel))
    }

    /// History of one channel, oldest first
    #[must_use]
    pub fn channel_values(&self, channel: Channel) -> Vec<ChannelValue> {
        self.readings.iter().map(|r| channel.value_of(r)).collect()
    }

    /// Retained readings, oldest first
    pub fn readings(&self) -> impl ExactSizeIterator<Item = &Reading> + '_ {
        self.readings.iter()
    }

    /// Most recently appended reading
    #[must_use]
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    /// Oldest retained reading
    #[must_use]
    pub fn first(&self) -> Option<&Reading> {
        self.readings.front()
    }

    /// Drops all readings; the session clock restarts at the next reading.
    pub fn reset(&mut self) {
        self.readings.clear();
        self.session_start = None;
    }
}
