// packages/journal/src/runtime/host.rs
//! Lifecycle binding for a journal host
//!
//! A host owns one buffer, recorder, writer and scheduler. Construction
//! attaches the event sources and starts the scheduler; shutdown detaches
//! the sources, stops the scheduler and then runs one final flush, so that
//! nothing recorded since the last periodic flush is lost.

use crate::recording::buffer::{BufferStats, EventBuffer};
use crate::recording::event::TimestampPrecision;
use crate::recording::recorder::{EventNotifier, EventRecorder};
use crate::recording::scheduler::FlushScheduler;
use crate::recording::sink::{
    resolve_log_path, FileSink, LogSink, BACKGROUND_LOG_FILE, FOREGROUND_LOG_FILE,
};
use crate::recording::writer::{DurableWriter, FlushReport, WriterStats};
use crate::runtime::sources::EventSource;
use crate::utils::config::JournalConfig;
use crate::utils::errors::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Which lifecycle a host is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    /// Tied to a foreground UI surface
    Foreground,

    /// Tied to a background service
    Background,
}

impl HostKind {
    pub fn log_file_name(self) -> &'static str {
        match self {
            HostKind::Foreground => FOREGROUND_LOG_FILE,
            HostKind::Background => BACKGROUND_LOG_FILE,
        }
    }

    pub fn precision(self) -> TimestampPrecision {
        match self {
            HostKind::Foreground => TimestampPrecision::Millis,
            HostKind::Background => TimestampPrecision::Seconds,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HostKind::Foreground => "foreground",
            HostKind::Background => "background",
        }
    }
}

/// A running journal bound to one host component
pub struct JournalHost {
    kind: HostKind,
    recorder: EventRecorder,
    writer: Arc<DurableWriter>,
    scheduler: FlushScheduler,
    sources: Vec<Arc<dyn EventSource>>,
    stopped: bool,
}

impl JournalHost {
    /// Start a host writing to its fixed file in the configured directory
    pub fn start(
        kind: HostKind,
        config: &JournalConfig,
        sources: Vec<Arc<dyn EventSource>>,
    ) -> Result<Self> {
        let path = resolve_log_path(config.sink_dir.as_deref(), kind.log_file_name())?;
        Self::start_with_sink(kind, config, Arc::new(FileSink::new(path)), sources)
    }

    /// Start a host over an explicit sink
    pub fn start_with_sink(
        kind: HostKind,
        config: &JournalConfig,
        sink: Arc<dyn LogSink>,
        sources: Vec<Arc<dyn EventSource>>,
    ) -> Result<Self> {
        config.validate()?;

        let buffer = Arc::new(EventBuffer::new(config.max_buffered_events));
        let recorder = EventRecorder::new(Arc::clone(&buffer), kind.precision());
        let writer = Arc::new(DurableWriter::new(buffer, sink, config.write_timeout()));
        let mut scheduler = FlushScheduler::new(Arc::clone(&writer));

        let notifier: Arc<dyn EventNotifier> = Arc::new(recorder.clone());
        for source in &sources {
            source.attach(Arc::clone(&notifier));
        }
        scheduler.start();

        info!(
            "Started {} journal ({} sources) writing to {}",
            kind.as_str(),
            sources.len(),
            writer.sink_location()
        );

        Ok(Self {
            kind,
            recorder,
            writer,
            scheduler,
            sources,
            stopped: false,
        })
    }

    /// Lifecycle this host is bound to
    pub fn kind(&self) -> HostKind {
        self.kind
    }

    /// Recorder for callers that report events directly
    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    /// Tear down: detach sources, stop the scheduler, flush what is left.
    ///
    /// Returns only after the final flush has finished. A failed final
    /// flush is logged and returned; the records it held stay in memory
    /// until the host is dropped.
    pub async fn shutdown(mut self) -> Result<FlushReport> {
        info!("Shutting down {} journal", self.kind.as_str());

        self.detach_sources();
        self.scheduler.stop().await;
        self.stopped = true;

        match self.writer.shutdown_flush().await {
            Ok(report) => {
                info!(
                    "{} journal stopped, final flush wrote {} records",
                    self.kind.as_str(),
                    report.records
                );
                Ok(report)
            }
            Err(e) => {
                error!(
                    "Final flush of {} journal failed, {} records unsaved: {}",
                    self.kind.as_str(),
                    self.recorder.buffered(),
                    e
                );
                Err(e)
            }
        }
    }

    fn detach_sources(&self) {
        for source in &self.sources {
            source.detach();
        }
    }

    /// Get host statistics
    pub fn stats(&self) -> HostStats {
        HostStats {
            buffer: self.recorder.stats(),
            writer: self.writer.stats(),
        }
    }
}

impl Drop for JournalHost {
    fn drop(&mut self) {
        if self.stopped {
            return;
        }
        self.detach_sources();
        let pending = self.recorder.buffered();
        if pending > 0 {
            warn!(
                "{} journal dropped without shutdown, {} records not flushed",
                self.kind.as_str(),
                pending
            );
        }
    }
}

/// Combined host statistics
#[derive(Debug, Clone)]
pub struct HostStats {
    pub buffer: BufferStats,
    pub writer: WriterStats,
}
