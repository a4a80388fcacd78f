//! Trait abstraction for telemetry input to enable testing

use async_trait::async_trait;

use crate::error::Result;
use crate::telemetry::Reading;

/// Anything that yields one reading per tick
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelemetrySource: Send {
    /// Next reading, or `Ok(None)` once the source is exhausted
    async fn next_reading(&mut self) -> Result<Option<Reading>>;
}
