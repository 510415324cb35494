// packages/journal/src/recording/sink.rs
//! Durable sinks
//!
//! A sink appends an already rendered payload and reports success only once
//! the bytes have reached storage. The file sink never truncates.

use crate::utils::errors::{JournalError, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Log file written by the foreground (UI-bound) host
pub const FOREGROUND_LOG_FILE: &str = "event_logs.txt";

/// Log file written by the background (service-bound) host
pub const BACKGROUND_LOG_FILE: &str = "event_logs_from_service.txt";

/// Append-only destination for rendered records
pub trait LogSink: Send + Sync {
    /// Append the payload and make it durable before returning `Ok`
    fn append(&self, payload: &[u8]) -> io::Result<()>;

    /// Human readable location, for diagnostics
    fn location(&self) -> String;
}

/// Resolve the log file path inside `dir`, or the user's downloads directory
pub fn resolve_log_path(dir: Option<&Path>, file_name: &str) -> Result<PathBuf> {
    let base = match dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::download_dir().ok_or_else(|| {
            JournalError::Config("no downloads directory available; set sink_dir".to_string())
        })?,
    };
    Ok(base.join(file_name))
}

/// Plain-text file opened in append mode for every write
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn append(&self, payload: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(payload)?;
        writer.flush()?;
        writer.get_ref().sync_data()?;

        debug!("Appended {} bytes to {:?}", payload.len(), self.path);
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
