//! # Drone Telemetry
//!
//! Live status feed for drone sensor readings.
//!
//! Reads one telemetry reading per tick (JSON Lines from stdin or a file),
//! keeps the most recent readings in a rolling window, and logs a status
//! line plus connection alerts for every tick.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use drone_telemetry::config::{Config, LoggingConfig};
use drone_telemetry::session::{TelemetrySession, TickOutcome};
use drone_telemetry::source::{JsonLinesSource, TelemetrySource};
use drone_telemetry::telemetry::{
    ConnectionStatus, Reading, RollingTelemetryStore, SnapshotView, StatusSeverity,
};

/// File name prefix for rolling log files
const LOG_FILE_PREFIX: &str = "drone-telemetry.log";

/// Main entry point for Drone Telemetry
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Load configuration (first argument, or defaults)
///    - Set up logging with tracing subscriber
///    - Open the telemetry source
///
/// 2. **Main Loop**
///    - Pull one reading per tick and append it to the window
///    - A display task logs the derived view after every append
///    - Handle Ctrl+C for graceful shutdown
///
/// 3. **Shutdown**
///    - Stop on Ctrl+C or when the source is exhausted
///    - Log tick totals
///
/// # Examples
///
/// ```bash
/// cargo run --release -- config/default.toml < flight.jsonl
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => Config::default(),
    };

    let _log_guard = init_logging(&config.logging);

    info!("Drone Telemetry v{} starting...", env!("CARGO_PKG_VERSION"));

    let source: Box<dyn TelemetrySource> = if config.source.path.is_empty() {
        info!("Reading telemetry from stdin");
        Box::new(JsonLinesSource::stdin())
    } else {
        Box::new(
            JsonLinesSource::open(&config.source.path)
                .await
                .with_context(|| format!("Failed to open telemetry source {}", config.source.path))?,
        )
    };

    let mut session = TelemetrySession::new(config.window.capacity, source);
    let display = tokio::spawn(run_display(session.hub().subscribe()));

    let mut ticks = tick_interval(config.window.tick_interval_ms);

    info!(
        "Starting telemetry loop ({} ms ticks, {}-tick window)",
        config.window.tick_interval_ms, config.window.capacity
    );
    info!("Press Ctrl+C to exit");

    loop {
        tokio::select! {
            outcome = async {
                ticks.tick().await;
                session.tick().await
            } => {
                match outcome {
                    Ok(TickOutcome::Appended(_)) | Ok(TickOutcome::Skipped) => {}
                    Ok(TickOutcome::Exhausted) => {
                        info!("Telemetry source exhausted, shutting down...");
                        break;
                    }
                    Err(e) => {
                        error!("Telemetry source failed: {}", e);
                        return Err(e.into());
                    }
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    info!(
        "Total readings: {} ({} malformed skipped)",
        session.ticks(),
        session.skipped()
    );

    // Dropping the session closes the hub, which ends the display task
    drop(session);
    display.await.context("Display task failed")?;

    Ok(())
}

/// Sets up the tracing subscriber.
///
/// Returns the appender guard when logging to files; it must stay alive for
/// buffered lines to be flushed.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = log_level(config);
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    if config.log_dir.is_empty() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

/// Configured log level, falling back to INFO for unknown names
fn log_level(config: &LoggingConfig) -> tracing::Level {
    config.level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO)
}

/// Tick timer that waits a full period after a stall instead of bursting
fn tick_interval(period_ms: u64) -> Interval {
    let mut ticks = interval(Duration::from_millis(period_ms));
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticks
}

/// Whether a connection status should be announced
fn status_changed(last: Option<ConnectionStatus>, current: ConnectionStatus) -> bool {
    last != Some(current)
}

/// Display client: logs the view after every published snapshot
async fn run_display(mut rx: watch::Receiver<Arc<RollingTelemetryStore>>) {
    let mut last_status: Option<ConnectionStatus> = None;

    while rx.changed().await.is_ok() {
        let store = Arc::clone(&rx.borrow_and_update());
        let view = SnapshotView::new(&store);

        let Some(latest) = view.latest() else {
            last_status = None;
            continue;
        };

        info!("{}", status_line(&view, latest));

        let status = latest.connection_status;
        if status_changed(last_status, status) {
            match status.severity() {
                StatusSeverity::Critical => error!("{}", status.alert_message()),
                StatusSeverity::Warning => warn!("{}", status.alert_message()),
                StatusSeverity::Ok => info!("{}", status.alert_message()),
            }
            last_status = Some(status);
        }
    }
}

/// One-line summary of the latest reading and window timing
fn status_line(view: &SnapshotView<'_>, latest: &Reading) -> String {
    let o = &latest.orientation;
    let mut line = format!(
        "Battery {:.2} V | R/P/Y {:.2}° / {:.2}° / {:.2}° | Temp {:.2} °C | Alt {:.2} m | GPS {:.6}, {:.6} | {}",
        latest.battery_voltage,
        o.roll,
        o.pitch,
        o.yaw,
        latest.temperature,
        latest.altitude,
        latest.location.latitude,
        latest.location.longitude,
        latest.connection_status,
    );

    if let (Some(flight), Some(session)) = (view.flight_duration(), view.session_elapsed()) {
        line.push_str(&format!(
            " | flight {} (session {})",
            format_duration(flight),
            format_duration(session)
        ));
    }

    line
}

/// Formats a duration as `H:MM:SS`
fn format_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
