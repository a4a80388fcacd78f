//! # Drone Telemetry Library
//!
//! Rolling telemetry window for live drone status displays.
//!
//! This library keeps the most recent readings (battery, orientation,
//! temperature, GPS, altitude, connection status) as time-aligned channels
//! and derives the data a display layer needs to draw metrics and charts.

pub mod config;
pub mod error;
pub mod session;
pub mod source;
pub mod telemetry;
