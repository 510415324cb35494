// packages/journal/src/recording/recorder.rs
//! Event recorder
//!
//! The recording side of the journal: timestamps a label, appends it to the
//! buffer and returns. It costs one in-memory append and never fails
//! visibly, so it is safe to call from UI and callback threads.

use crate::recording::buffer::{BufferStats, EventBuffer};
use crate::recording::event::{EventRecord, TimestampPrecision};
use std::sync::Arc;
use tracing::debug;

/// The single capability event sources depend on
pub trait EventNotifier: Send + Sync {
    /// Report that something happened
    fn notify(&self, label: &str);
}

/// Appends timestamped records to a buffer
#[derive(Clone)]
pub struct EventRecorder {
    buffer: Arc<EventBuffer>,
    precision: TimestampPrecision,
}

impl EventRecorder {
    /// Create a recorder over an existing buffer
    pub fn new(buffer: Arc<EventBuffer>, precision: TimestampPrecision) -> Self {
        Self { buffer, precision }
    }

    /// Record an event observed now
    pub fn record(&self, label: impl Into<String>) {
        let record = EventRecord::now(label, self.precision);
        debug!(target: "event_journal::events", "{}", record);
        self.buffer.push(record);
        metrics::counter!("journal_events_recorded_total").increment(1);
    }

    /// Number of records waiting for the next flush
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn precision(&self) -> TimestampPrecision {
        self.precision
    }

    pub fn buffer(&self) -> &Arc<EventBuffer> {
        &self.buffer
    }

    /// Get buffer statistics
    pub fn stats(&self) -> BufferStats {
        self.buffer.stats()
    }
}

impl EventNotifier for EventRecorder {
    fn notify(&self, label: &str) {
        self.record(label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_appends_rendered_line() {
        let recorder = EventRecorder::new(Arc::new(EventBuffer::new(16)), TimestampPrecision::Millis);
        recorder.record("Button Clicked");

        let lines = recorder.buffer().snapshot_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Button Clicked at "));
        assert_eq!(
            lines[0].len(),
            "Button Clicked at ".len() + TimestampPrecision::Millis.rendered_len()
        );
    }

    #[test]
    fn test_notify_through_trait_object() {
        let recorder = EventRecorder::new(Arc::new(EventBuffer::new(16)), TimestampPrecision::Seconds);
        let notifier: Arc<dyn EventNotifier> = Arc::new(recorder.clone());

        notifier.notify("Screen Touched");
        notifier.notify("");

        assert_eq!(recorder.buffered(), 2);
        assert_eq!(recorder.stats().push_count, 2);
    }

    #[test]
    fn test_records_keep_call_order() {
        let recorder = EventRecorder::new(Arc::new(EventBuffer::new(16)), TimestampPrecision::Millis);
        for i in 0..5 {
            recorder.record(format!("event {}", i));
        }

        let drained = recorder.buffer().drain();
        let labels: Vec<_> = drained.iter().map(|r| r.label().to_string()).collect();
        assert_eq!(labels, ["event 0", "event 1", "event 2", "event 3", "event 4"]);
        assert!(drained.windows(2).all(|w| w[0].timestamp() <= w[1].timestamp()));
    }
}
