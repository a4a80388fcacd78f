//! # Telemetry Source Module
//!
//! Input side of the telemetry pipeline.
//!
//! This module handles:
//! - The `TelemetrySource` trait the tick loop pulls readings from
//! - Reading JSON Lines telemetry (one `Reading` per line) from stdin or a file

pub mod source_trait;

pub use source_trait::TelemetrySource;

use async_trait::async_trait;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::telemetry::Reading;

/// JSON Lines telemetry reader
///
/// Blank lines are skipped. A malformed line is reported as
/// [`TelemetryError::Json`](crate::error::TelemetryError::Json) and consumed,
/// so the next call continues with the following line.
pub struct JsonLinesSource<R> {
    lines: Lines<R>,
    /// Where the lines come from (path or "stdin"), for log messages
    origin: String,
    line_number: usize,
}

impl<R> std::fmt::Debug for JsonLinesSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSource")
            .field("origin", &self.origin)
            .field("line_number", &self.line_number)
            .finish_non_exhaustive()
    }
}

impl JsonLinesSource<BufReader<Stdin>> {
    /// Reads telemetry from standard input
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), "stdin")
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Opens a JSON Lines telemetry file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use drone_telemetry::source::JsonLinesSource;
    ///
    /// # async fn run() -> drone_telemetry::error::Result<()> {
    /// let source = JsonLinesSource::open("flight.jsonl").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        info!("Reading telemetry from {}", path.display());
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: AsyncBufRead + Unpin> JsonLinesSource<R> {
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            origin: origin.into(),
            line_number: 0,
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> TelemetrySource for JsonLinesSource<R> {
    async fn next_reading(&mut self) -> Result<Option<Reading>> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_number += 1;

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let reading: Reading = serde_json::from_str(line).map_err(|e| {
                warn!("{}:{}: malformed reading: {}", self.origin, self.line_number, e);
                e
            })?;
            return Ok(Some(reading));
        }

        debug!("Telemetry source {} exhausted after {} lines", self.origin, self.line_number);
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TelemetryError;
    use crate::telemetry::ConnectionStatus;
    use std::io::Cursor;

    const LINE_1: &str = r#"{"timestamp":"2024-01-01T00:00:01Z","battery_voltage":12.1,"orientation":{"roll":1.0,"pitch":2.0,"yaw":3.0},"temperature":30.5,"location":{"latitude":13.0,"longitude":80.3},"altitude":120.0,"connection_status":"Good"}"#;
    const LINE_2: &str = r#"{"timestamp":"2024-01-01T00:00:02Z","battery_voltage":12.0,"orientation":{"roll":1.5,"pitch":2.5,"yaw":3.5},"temperature":30.7,"location":{"latitude":13.01,"longitude":80.31},"altitude":125.0,"connection_status":"No Signal"}"#;

    fn source_from(text: String) -> JsonLinesSource<Cursor<Vec<u8>>> {
        JsonLinesSource::new(Cursor::new(text.into_bytes()), "test")
    }

    #[tokio::test]
    async fn test_reads_lines_in_order() {
        let mut source = source_from(format!("{}\n{}\n", LINE_1, LINE_2));

        let first = source.next_reading().await.unwrap().unwrap();
        assert!((first.battery_voltage - 12.1).abs() < f64::EPSILON);
        assert_eq!(first.connection_status, ConnectionStatus::Good);

        let second = source.next_reading().await.unwrap().unwrap();
        assert_eq!(second.connection_status, ConnectionStatus::NoSignal);

        assert!(source.next_reading().await.unwrap().is_none());
        assert_eq!(source.line_number(), 2);
    }

    #[tokio::test]
    async fn test_skips_blank_lines() {
        let mut source = source_from(format!("\n   \n{}\n\n", LINE_1));

        assert!(source.next_reading().await.unwrap().is_some());
        assert!(source.next_reading().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_line_is_reported_then_skipped() {
        let mut source = source_from(format!("{{not json}}\n{}\n", LINE_1));

        match source.next_reading().await {
            Err(TelemetryError::Json(_)) => {}
            other => panic!("Expected Json error, got: {:?}", other),
        }
        assert!(source.next_reading().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_empty_input_is_exhausted() {
        let mut source = source_from(String::new());
        assert!(source.next_reading().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{}", LINE_1).unwrap();
        temp_file.flush().unwrap();

        let mut source = JsonLinesSource::open(temp_file.path()).await.unwrap();
        assert!(source.next_reading().await.unwrap().is_some());
        assert!(source.next_reading().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let result = JsonLinesSource::open("/nonexistent/telemetry.jsonl").await;
        assert!(matches!(result, Err(TelemetryError::Io(_))));
    }
}
