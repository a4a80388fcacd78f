//! # Error Types
//!
//! Custom error types for Drone Telemetry using `thiserror`.

use thiserror::Error;

/// Main error type for Drone Telemetry
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Channel name outside the fixed channel set
    #[error("Unknown telemetry channel: {0}")]
    UnknownChannel(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed reading from a telemetry source
    #[error("Malformed reading: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Drone Telemetry
pub type Result<T> = std::result::Result<T, TelemetryError>;
