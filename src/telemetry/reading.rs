//! # Telemetry Reading
//!
//! One complete telemetry sample across all channels for a single tick.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Attitude of the airframe in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Roll angle in degrees
    pub roll: f64,

    /// Pitch angle in degrees
    pub pitch: f64,

    /// Yaw (heading) angle in degrees
    pub yaw: f64,
}

/// GPS position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Radio link quality as reported by the drone link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionStatus {
    Excellent,
    Good,
    Poor,
    #[serde(rename = "No Signal")]
    NoSignal,
}

/// How urgently a connection status needs the operator's attention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Ok,
    Warning,
    Critical,
}

/// Marker color used for a connection status on timelines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Blue,
    Orange,
    Red,
}

impl StatusColor {
    /// Color name as understood by chart front-ends
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Green => "green",
            StatusColor::Blue => "blue",
            StatusColor::Orange => "orange",
            StatusColor::Red => "red",
        }
    }
}

impl ConnectionStatus {
    /// Human-readable status name (matches the wire name)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Excellent => "Excellent",
            ConnectionStatus::Good => "Good",
            ConnectionStatus::Poor => "Poor",
            ConnectionStatus::NoSignal => "No Signal",
        }
    }

    /// Severity of this status.
    ///
    /// Deliberately exhaustive: a new status variant must pick a severity.
    #[must_use]
    pub fn severity(&self) -> StatusSeverity {
        match self {
            ConnectionStatus::Excellent => StatusSeverity::Ok,
            ConnectionStatus::Good => StatusSeverity::Ok,
            ConnectionStatus::Poor => StatusSeverity::Warning,
            ConnectionStatus::NoSignal => StatusSeverity::Critical,
        }
    }

    /// Timeline marker color for this status
    #[must_use]
    pub fn color(&self) -> StatusColor {
        match self {
            ConnectionStatus::Excellent => StatusColor::Green,
            ConnectionStatus::Good => StatusColor::Blue,
            ConnectionStatus::Poor => StatusColor::Orange,
            ConnectionStatus::NoSignal => StatusColor::Red,
        }
    }

    /// Operator-facing alert text for this status
    ///
    /// # Examples
    ///
    /// ```
    /// use drone_telemetry::telemetry::ConnectionStatus;
    ///
    /// assert_eq!(ConnectionStatus::NoSignal.alert_message(), "Connection lost with drone!");
    /// assert_eq!(ConnectionStatus::Good.alert_message(), "Connection: Good");
    /// ```
    #[must_use]
    pub fn alert_message(&self) -> String {
        match self.severity() {
            StatusSeverity::Critical => "Connection lost with drone!".to_string(),
            StatusSeverity::Warning => "Poor signal detected.".to_string(),
            StatusSeverity::Ok => format!("Connection: {}", self.as_str()),
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One telemetry sample.
///
/// Timestamps carry second precision; sub-second parts are dropped both by
/// [`Reading::new`] and when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(deserialize_with = "deserialize_whole_seconds")]
    pub timestamp: DateTime<Utc>,

    /// Pack voltage in volts
    pub battery_voltage: f64,

    pub orientation: Orientation,

    /// Temperature in °C
    pub temperature: f64,

    pub location: Location,

    /// Altitude in meters
    pub altitude: f64,

    pub connection_status: ConnectionStatus,
}

impl Reading {
    /// Creates a reading, truncating the timestamp to whole seconds.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        battery_voltage: f64,
        orientation: Orientation,
        temperature: f64,
        location: Location,
        altitude: f64,
        connection_status: ConnectionStatus,
    ) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(0),
            battery_voltage,
            orientation,
            temperature,
            location,
            altitude,
            connection_status,
        }
    }
}

fn deserialize_whole_seconds<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    DateTime::<Utc>::deserialize(deserializer).map(|ts| ts.trunc_subsecs(0))
}
