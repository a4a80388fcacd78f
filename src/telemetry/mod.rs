//! # Telemetry Module
//!
//! Rolling telemetry window and the views derived from it.
//!
//! This module handles:
//! - The `Reading` record and connection status display hints
//! - The fixed set of named channels
//! - Bounded, FIFO-evicting history of the last N readings
//! - Display-ready snapshot views (latest, series, flight duration)
//! - Publishing immutable snapshots to multiple readers

pub mod channel;
pub mod hub;
pub mod reading;
pub mod snapshot;
pub mod store;

pub use channel::{Channel, ChannelValue};
pub use hub::TelemetryHub;
pub use reading::{ConnectionStatus, Location, Orientation, Reading, StatusColor, StatusSeverity};
pub use snapshot::SnapshotView;
pub use store::{RollingTelemetryStore, DEFAULT_CAPACITY};
