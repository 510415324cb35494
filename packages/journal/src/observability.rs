// packages/journal/src/observability.rs
//! Tracing and metrics setup
//!
//! `RUST_LOG` takes precedence over the configured level. Metrics are
//! emitted through the `metrics` facade and stay no-ops until the embedding
//! application installs a recorder.

use crate::utils::config::LogSettings;
use crate::utils::errors::{JournalError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Install the global tracing subscriber
pub fn init_tracing(settings: &LogSettings) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| JournalError::Config(format!("invalid log level {:?}: {}", settings.level, e)))?;

    let json_layer = settings
        .json
        .then(|| fmt::layer().json().with_current_span(false));
    let text_layer = (!settings.json).then(|| fmt::layer().with_target(true));

    Registry::default()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| JournalError::Config(format!("tracing already initialised: {}", e)))
}

/// Register descriptions for the counters this crate emits
pub fn describe_metrics() {
    metrics::describe_counter!(
        "journal_events_recorded_total",
        "Events appended to a journal buffer"
    );
    metrics::describe_counter!(
        "journal_events_dropped_total",
        "Events evicted because a journal buffer was full"
    );
    metrics::describe_counter!(
        "journal_flushes_total",
        "Flush attempts, labelled by outcome"
    );
    metrics::describe_counter!(
        "journal_bytes_written_total",
        "Bytes appended to journal files"
    );
}
