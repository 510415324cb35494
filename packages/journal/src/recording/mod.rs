// packages/journal/src/recording/mod.rs
//! Event capture, buffering and persistence
//!
//! - **Event**: labeled record with a fixed UTC timestamp format
//! - **Buffer**: ordered, bounded, mutex-protected record buffer
//! - **Recorder**: `record(label)` entry point for event sources
//! - **Writer**: drain-and-persist with restore on failure
//! - **Sink**: append-only file destination
//! - **Scheduler**: fixed-period flush task
//!
//! # Architecture
//!
//! ```text
//! Source → record() → EventBuffer ──(tick / teardown)──→ DurableWriter
//!                     (in memory)                           ↓
//!                                                    spawn_blocking
//!                                                           ↓
//!                                                  FileSink (append + sync)
//!                                                           ↓
//!                                               ok: buffer stays drained
//!                                             err: snapshot restored
//! ```

pub mod buffer;
pub mod event;
pub mod recorder;
pub mod scheduler;
pub mod sink;
pub mod writer;

// Re-export commonly used types
pub use buffer::{BufferStats, EventBuffer};
pub use event::{EventRecord, TimestampPrecision};
pub use recorder::{EventNotifier, EventRecorder};
pub use scheduler::{FlushScheduler, FLUSH_INTERVAL};
pub use sink::{FileSink, LogSink, BACKGROUND_LOG_FILE, FOREGROUND_LOG_FILE};
pub use writer::{DurableWriter, FlushReport, WriterStats};
