// packages/journal/src/lib.rs
//! Event Journal Library
//!
//! Captures discrete runtime events from a host application, buffers them
//! in memory and persists them to an append-only text log on a fixed
//! interval and at shutdown.
//!
//! # Architecture
//!
//! - **recording**: event records, buffer, recorder, durable writer, scheduler
//! - **runtime**: host lifecycle binding and event source adapters
//! - **observability**: tracing subscriber and metric descriptions
//! - **utils**: configuration and error types
//!
//! # Example
//!
//! ```no_run
//! use event_journal::{HostKind, JournalConfig, JournalHost};
//!
//! # async fn run() -> event_journal::Result<()> {
//! let config = JournalConfig::load()?;
//! let host = JournalHost::start(HostKind::Foreground, &config, vec![])?;
//! host.recorder().record("Button Clicked");
//! host.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod observability;
pub mod recording;
pub mod runtime;
pub mod utils;

// Re-export commonly used types
pub use recording::{EventRecord, EventRecorder, FlushReport, FLUSH_INTERVAL};
pub use runtime::{HostKind, JournalHost};
pub use utils::config::JournalConfig;
pub use utils::errors::{JournalError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
