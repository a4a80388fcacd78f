//! # Telemetry Channels
//!
//! Fixed set of named time series derived from [`Reading`]s.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use super::reading::{ConnectionStatus, Reading};
use crate::error::TelemetryError;

/// Identifier of one telemetry channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    Battery,
    Roll,
    Pitch,
    Yaw,
    Temperature,
    Latitude,
    Longitude,
    Altitude,
    Status,
    Timestamp,
}

impl Channel {
    /// Every channel, in display order
    pub const ALL: [Channel; 10] = [
        Channel::Battery,
        Channel::Roll,
        Channel::Pitch,
        Channel::Yaw,
        Channel::Temperature,
        Channel::Latitude,
        Channel::Longitude,
        Channel::Altitude,
        Channel::Status,
        Channel::Timestamp,
    ];

    /// Channel name as used by [`Channel::from_str`]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Battery => "battery",
            Channel::Roll => "roll",
            Channel::Pitch => "pitch",
            Channel::Yaw => "yaw",
            Channel::Temperature => "temperature",
            Channel::Latitude => "latitude",
            Channel::Longitude => "longitude",
            Channel::Altitude => "altitude",
            Channel::Status => "status",
            Channel::Timestamp => "timestamp",
        }
    }

    /// Extracts this channel's value from a reading
    #[must_use]
    pub fn value_of(&self, reading: &Reading) -> ChannelValue {
        match self {
            Channel::Battery => ChannelValue::Scalar(reading.battery_voltage),
            Channel::Roll => ChannelValue::Scalar(reading.orientation.roll),
            Channel::Pitch => ChannelValue::Scalar(reading.orientation.pitch),
            Channel::Yaw => ChannelValue::Scalar(reading.orientation.yaw),
            Channel::Temperature => ChannelValue::Scalar(reading.temperature),
            Channel::Latitude => ChannelValue::Scalar(reading.location.latitude),
            Channel::Longitude => ChannelValue::Scalar(reading.location.longitude),
            Channel::Altitude => ChannelValue::Scalar(reading.altitude),
            Channel::Status => ChannelValue::Status(reading.connection_status),
            Channel::Timestamp => ChannelValue::Timestamp(reading.timestamp),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .iter()
            .copied()
            .find(|channel| channel.name() == s)
            .ok_or_else(|| TelemetryError::UnknownChannel(s.to_string()))
    }
}

/// One sample of one channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelValue {
    Scalar(f64),
    Status(ConnectionStatus),
    Timestamp(DateTime<Utc>),
}

impl ChannelValue {
    /// Numeric value, if this is a scalar channel sample
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ChannelValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_status(&self) -> Option<ConnectionStatus> {
        match self {
            ChannelValue::Status(s) => Some(*s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            ChannelValue::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}
