//! # Telemetry Session
//!
//! Owns the telemetry window for one display session and moves readings from
//! a [`TelemetrySource`] into it, one per tick.

use tracing::{debug, warn};

use crate::error::{Result, TelemetryError};
use crate::source::TelemetrySource;
use crate::telemetry::TelemetryHub;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A reading was appended; holds the resulting window length
    Appended(usize),
    /// The source produced a malformed reading, nothing was appended
    Skipped,
    /// The source has no more readings
    Exhausted,
}

/// One telemetry session: a source feeding a hub
pub struct TelemetrySession {
    hub: TelemetryHub,
    source: Box<dyn TelemetrySource>,
    ticks: u64,
    skipped: u64,
}

impl std::fmt::Debug for TelemetrySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetrySession")
            .field("hub", &self.hub)
            .field("ticks", &self.ticks)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

impl TelemetrySession {
    /// Starts a session with an empty window of `capacity` ticks
    #[must_use]
    pub fn new(capacity: usize, source: Box<dyn TelemetrySource>) -> Self {
        Self {
            hub: TelemetryHub::new(capacity),
            source,
            ticks: 0,
            skipped: 0,
        }
    }

    /// Pulls one reading from the source and appends it.
    ///
    /// Malformed readings are logged and skipped; the session carries on.
    ///
    /// # Errors
    ///
    /// Returns error if the source fails for any other reason (e.g. I/O)
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        match self.source.next_reading().await {
            Ok(Some(reading)) => {
                self.hub.append(reading);
                self.ticks += 1;
                let length = self.hub.snapshot().current_length();
                debug!("Tick {}: window holds {} readings", self.ticks, length);
                Ok(TickOutcome::Appended(length))
            }
            Ok(None) => Ok(TickOutcome::Exhausted),
            Err(TelemetryError::Json(e)) => {
                self.skipped += 1;
                warn!("Skipping malformed reading: {}", e);
                Ok(TickOutcome::Skipped)
            }
            Err(e) => Err(e),
        }
    }

    #[must_use]
    pub fn hub(&self) -> &TelemetryHub {
        &self.hub
    }

    /// Readings appended since the session started
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Malformed readings skipped since the session started
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::source_trait::MockTelemetrySource;
    use crate::telemetry::reading::fixtures::reading_at;
    use crate::telemetry::{Reading, SnapshotView};
    use mockall::Sequence;

    fn malformed() -> TelemetryError {
        TelemetryError::Json(serde_json::from_str::<Reading>("{").unwrap_err())
    }

    #[tokio::test]
    async fn test_tick_appends_reading() {
        let mut source = MockTelemetrySource::new();
        source
            .expect_next_reading()
            .times(1)
            .returning(|| Ok(Some(reading_at(1))));

        let mut session = TelemetrySession::new(3, Box::new(source));
        assert_eq!(session.tick().await.unwrap(), TickOutcome::Appended(1));
        assert_eq!(session.ticks(), 1);

        let snapshot = session.hub().snapshot();
        assert_eq!(SnapshotView::new(&snapshot).latest(), Some(&reading_at(1)));
    }

    #[tokio::test]
    async fn test_window_length_caps_at_capacity() {
        let mut source = MockTelemetrySource::new();
        let mut seq = Sequence::new();
        for s in 1..=5 {
            source
                .expect_next_reading()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move || Ok(Some(reading_at(s))));
        }

        let mut session = TelemetrySession::new(3, Box::new(source));
        let mut outcomes = Vec::new();
        for _ in 0..5 {
            outcomes.push(session.tick().await.unwrap());
        }

        assert_eq!(
            outcomes,
            vec![
                TickOutcome::Appended(1),
                TickOutcome::Appended(2),
                TickOutcome::Appended(3),
                TickOutcome::Appended(3),
                TickOutcome::Appended(3),
            ]
        );
        assert_eq!(session.hub().snapshot().first(), Some(&reading_at(3)));
    }

    #[tokio::test]
    async fn test_malformed_reading_is_skipped() {
        let mut source = MockTelemetrySource::new();
        let mut seq = Sequence::new();
        source
            .expect_next_reading()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(malformed()));
        source
            .expect_next_reading()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Some(reading_at(2))));

        let mut session = TelemetrySession::new(3, Box::new(source));
        assert_eq!(session.tick().await.unwrap(), TickOutcome::Skipped);
        assert_eq!(session.tick().await.unwrap(), TickOutcome::Appended(1));
        assert_eq!(session.skipped(), 1);
        assert_eq!(session.ticks(), 1);
    }

    #[test]
    fn test_exhausted_source() {
        let mut source = MockTelemetrySource::new();
        source.expect_next_reading().returning(|| Ok(None));

        let mut session = TelemetrySession::new(3, Box::new(source));
        let outcome = tokio_test::block_on(session.tick());
        assert_eq!(tokio_test::assert_ok!(outcome), TickOutcome::Exhausted);
        assert_eq!(session.hub().snapshot().current_length(), 0);
    }

    #[tokio::test]
    async fn test_replayed_flight_session_time_covers_window() {
        use crate::source::JsonLinesSource;
        use std::io::Cursor;

        let lines: String = (1..=5)
            .map(|s| format!("{}\n", serde_json::to_string(&reading_at(s)).unwrap()))
            .collect();
        let source = JsonLinesSource::new(Cursor::new(lines.into_bytes()), "replay");

        let mut session = TelemetrySession::new(3, Box::new(source));
        while session.tick().await.unwrap() != TickOutcome::Exhausted {
            let snapshot = session.hub().snapshot();
            let view = SnapshotView::new(&snapshot);
            assert!(view.session_elapsed() >= view.flight_duration());
        }

        let snapshot = session.hub().snapshot();
        let view = SnapshotView::new(&snapshot);
        assert_eq!(view.flight_duration(), Some(chrono::Duration::seconds(2)));
        assert_eq!(view.session_elapsed(), Some(chrono::Duration::seconds(4)));
    }

    #[tokio::test]
    async fn test_io_error_propagates() {
        let mut source = MockTelemetrySource::new();
        source.expect_next_reading().returning(|| {
            Err(TelemetryError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "link dropped",
            )))
        });

        let mut session = TelemetrySession::new(3, Box::new(source));
        assert!(matches!(session.tick().await, Err(TelemetryError::Io(_))));
    }
}
