// packages/journal/src/utils/errors.rs
//! Error types for the journal
//!
//! Every failure inside the durable writer surfaces as a [`JournalError`].
//! Callers log it and carry on; nothing here is fatal to the host.

use std::io;
use std::time::Duration;

/// Errors produced while configuring or flushing a journal
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// The sink rejected the write (missing file, permission denied, disk full)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The write could not be handed to storage at all
    #[error("Storage failed: {0}")]
    StorageFailed(String),

    /// The sink did not finish within the write deadline
    #[error("Write timed out after {0:?}")]
    WriteTimedOut(Duration),

    /// A previously timed-out write has not reported back yet
    #[error("Previous write of {0} records is still in flight")]
    WriteInFlight(usize),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JournalError {
    /// Whether the next scheduled cycle may succeed without intervention.
    ///
    /// Configuration errors are the only permanent kind.
    pub fn is_transient(&self) -> bool {
        !matches!(self, JournalError::Config(_))
    }

    /// Whether the failure was caused by missing access to the sink
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, JournalError::Io(e) if e.kind() == io::ErrorKind::PermissionDenied)
    }
}

impl From<config::ConfigError> for JournalError {
    fn from(err: config::ConfigError) -> Self {
        JournalError::Config(err.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, JournalError>;
