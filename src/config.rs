//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, TelemetryError};
use crate::telemetry::DEFAULT_CAPACITY;

/// Upper bound on the window capacity (one hour of 1 Hz ticks)
pub const MAX_WINDOW_CAPACITY: usize = 3600;

/// Log levels accepted by `logging.level`
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Rolling window configuration
#[derive(Debug, Deserialize, Clone)]
pub struct WindowConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

/// Telemetry input configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourceConfig {
    /// JSON Lines file to read; empty reads from stdin
    #[serde(default)]
    pub path: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files; empty logs to stderr only
    #[serde(default)]
    pub log_dir: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: String::new(),
        }
    }
}

// Default value functions
fn default_capacity() -> usize { DEFAULT_CAPACITY }
fn default_tick_interval_ms() -> u64 { 1000 }

fn default_log_level() -> String { "info".to_string() }

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use drone_telemetry::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.window.capacity == 0 || self.window.capacity > MAX_WINDOW_CAPACITY {
            return Err(TelemetryError::Config(toml::de::Error::custom(format!(
                "window capacity must be between 1 and {}",
                MAX_WINDOW_CAPACITY
            ))));
        }

        if self.window.tick_interval_ms == 0 || self.window.tick_interval_ms > 60000 {
            return Err(TelemetryError::Config(
                toml::de::Error::custom("tick_interval_ms must be between 1 and 60000")
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(TelemetryError::Config(toml::de::Error::custom(format!(
                "log level must be one of: {}",
                LOG_LEVELS.join(", ")
            ))));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.capacity, 20);
        assert_eq!(config.window.tick_interval_ms, 1000);
        assert!(config.source.path.is_empty());
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_dir.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[window]
capacity = 60
tick_interval_ms = 500

[source]
path = "flight.jsonl"

[logging]
level = "debug"
log_dir = "./logs"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.window.capacity, 60);
        assert_eq!(config.window.tick_interval_ms, 500);
        assert_eq!(config.source.path, "flight.jsonl");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.log_dir, "./logs");
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        use tempfile::NamedTempFile;

        let temp_file = NamedTempFile::new().unwrap();
        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.window.capacity, 20);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/drone-telemetry.toml");
        assert!(matches!(result, Err(TelemetryError::Io(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[window\ncapacity = ").unwrap();
        temp_file.flush().unwrap();

        assert!(matches!(Config::load(temp_file.path()), Err(TelemetryError::Config(_))));
    }

    #[test]
    fn test_capacity_zero() {
        let mut config = Config::default();
        config.window.capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_capacity_too_high() {
        let mut config = Config::default();
        config.window.capacity = MAX_WINDOW_CAPACITY + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_capacity_at_bounds() {
        for capacity in [1, MAX_WINDOW_CAPACITY] {
            let mut config = Config::default();
            config.window.capacity = capacity;
            assert!(config.validate().is_ok(), "Capacity {} should be valid", capacity);
        }
    }

    #[test]
    fn test_tick_interval_zero() {
        let mut config = Config::default();
        config.window.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_interval_too_high() {
        let mut config = Config::default();
        config.window.tick_interval_ms = 60001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_log_levels() {
        for &level in LOG_LEVELS {
            let mut config = Config::default();
            config.logging.level = level.to_string();
            assert!(config.validate().is_ok(), "Log level {} should be valid", level);
        }
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_capacity(), 20);
        assert_eq!(default_tick_interval_ms(), 1000);
        assert_eq!(default_log_level(), "info");
    }
}
