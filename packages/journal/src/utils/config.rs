// packages/journal/src/utils/config.rs
//! Journal configuration
//!
//! Values are layered: built-in defaults, then an optional
//! `event-journal.{toml,yaml,json}` file in the working directory, then
//! `EVENT_JOURNAL__*` environment variables (e.g. `EVENT_JOURNAL__SINK_DIR`,
//! `EVENT_JOURNAL__LOG__LEVEL`).
//!
//! The flush interval is not configurable.

use crate::utils::errors::{JournalError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Base name of the optional configuration file
pub const CONFIG_FILE: &str = "event-journal";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "EVENT_JOURNAL";

/// Top-level journal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Directory holding the log files. `None` means the user's downloads
    /// directory.
    pub sink_dir: Option<PathBuf>,

    /// Upper bound on a single write (milliseconds)
    pub write_timeout_ms: u64,

    /// Maximum number of records held in memory before the oldest is evicted
    pub max_buffered_events: usize,

    /// Logging settings
    pub log: LogSettings,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            sink_dir: None,
            write_timeout_ms: 10_000,
            max_buffered_events: 100_000,
            log: LogSettings::default(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,

    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl JournalConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let config: JournalConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration writing into an explicit directory
    pub fn with_sink_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            sink_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Reject values the journal cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.write_timeout_ms == 0 {
            return Err(JournalError::Config(
                "write_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.max_buffered_events == 0 {
            return Err(JournalError::Config(
                "max_buffered_events must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}
