// packages/journal/src/recording/writer.rs
//! Durable writer: drain the buffer and persist it
//!
//! A flush drains the buffer, renders one line per record and hands the
//! payload to the sink on the blocking pool. The buffer ends up empty only
//! when the sink reported success; on failure the snapshot goes back to the
//! front of the buffer.
//!
//! The drained snapshot is *parked* in the writer before the first await,
//! together with the blocking task's handle. Whatever happens to the flush
//! future afterwards (timeout, cancellation), the records stay owned by the
//! writer until the write reports. The next flush settles a parked write
//! first: success counts the records as written, failure restores them,
//! still running skips the cycle. At most one write is outstanding per
//! writer, so lines land in append order and a late write is never
//! duplicated.

use crate::recording::buffer::EventBuffer;
use crate::recording::event::EventRecord;
use crate::recording::sink::LogSink;
use crate::utils::errors::{JournalError, Result};
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, warn};

/// Outcome of a successful flush
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Records that reached the sink during this call
    pub records: usize,

    /// Bytes appended during this call
    pub bytes: usize,
}

impl FlushReport {
    fn absorb(&mut self, other: FlushReport) {
        self.records += other.records;
        self.bytes += other.bytes;
    }
}

/// A write handed to the blocking pool and not yet settled
struct InFlightWrite {
    handle: JoinHandle<io::Result<()>>,
    records: Vec<EventRecord>,
    bytes: usize,
}

#[derive(Default)]
struct WriterState {
    in_flight: Option<InFlightWrite>,
}

/// Result of waiting on the parked write
enum Parked {
    /// Nothing was parked
    Empty,

    /// The write finished and has been accounted for
    Settled(Result<FlushReport>),

    /// Still running after the wait; holds its record count
    Pending(usize),
}

/// Drains an [`EventBuffer`] into a [`LogSink`]
pub struct DurableWriter {
    buffer: Arc<EventBuffer>,
    sink: Arc<dyn LogSink>,
    write_timeout: Duration,
    state: Mutex<WriterState>,
    counters: WriterCounters,
}

impl DurableWriter {
    pub fn new(buffer: Arc<EventBuffer>, sink: Arc<dyn LogSink>, write_timeout: Duration) -> Self {
        Self {
            buffer,
            sink,
            write_timeout,
            state: Mutex::new(WriterState::default()),
            counters: WriterCounters::default(),
        }
    }

    /// Drain the buffer and append it to the sink.
    ///
    /// Flushes are serialised; a second caller waits for the first.
    pub async fn flush(&self) -> Result<FlushReport> {
        let mut state = self.state.lock().await;
        let result = self.flush_locked(&mut state).await;
        self.count(&result);
        result
    }

    /// Final flush at teardown.
    ///
    /// Waits up to the write timeout for a parked write before draining. If
    /// it is still running, no second write is started: the call fails with
    /// [`JournalError::WriteInFlight`] and newer records stay buffered.
    pub async fn shutdown_flush(&self) -> Result<FlushReport> {
        let mut state = self.state.lock().await;
        let mut report = FlushReport::default();

        match self.wait_parked(&mut state, self.write_timeout).await {
            Parked::Empty => {}
            Parked::Settled(Ok(late)) => {
                info!("Late write of {} records completed", late.records);
                report.absorb(late);
            }
            Parked::Settled(Err(e)) => warn!("Late write failed: {}, retrying", e),
            Parked::Pending(pending) => {
                error!(
                    "Write of {} records to {} still blocked at shutdown, {} newer records unsaved",
                    pending,
                    self.sink.location(),
                    self.buffer.len()
                );
                let result = Err(JournalError::WriteInFlight(pending));
                self.count(&result);
                return result;
            }
        }

        let result = self.flush_locked(&mut state).await.map(|flushed| {
            report.absorb(flushed);
            report
        });
        self.count(&result);
        result
    }

    async fn flush_locked(&self, state: &mut WriterState) -> Result<FlushReport> {
        let mut report = FlushReport::default();

        if let Some(in_flight) = state.in_flight.as_ref() {
            if !in_flight.handle.is_finished() {
                return Err(JournalError::WriteInFlight(in_flight.records.len()));
            }
        }
        match self.wait_parked(state, self.write_timeout).await {
            Parked::Empty => {}
            Parked::Settled(Ok(late)) => {
                info!("Late write of {} records completed", late.records);
                report.absorb(late);
            }
            Parked::Settled(Err(e)) => warn!("Late write failed: {}, retrying", e),
            Parked::Pending(pending) => return Err(JournalError::WriteInFlight(pending)),
        }

        let records = self.buffer.drain();
        if records.is_empty() {
            debug!("Nothing to flush");
            return Ok(report);
        }

        let payload = render_payload(&records);
        let bytes = payload.len();
        let count = records.len();
        debug!("Flushing {} records ({} bytes) to {}", count, bytes, self.sink.location());

        let start = Instant::now();
        let sink = Arc::clone(&self.sink);
        let handle = tokio::task::spawn_blocking(move || sink.append(&payload));
        state.in_flight = Some(InFlightWrite { handle, records, bytes });

        match self.wait_parked(state, self.write_timeout).await {
            Parked::Settled(Ok(written)) => {
                debug!("Flushed {} records in {:?}", written.records, start.elapsed());
                report.absorb(written);
                Ok(report)
            }
            Parked::Settled(Err(e)) => Err(e),
            Parked::Pending(pending) => {
                warn!(
                    "Write of {} records exceeded {:?}, parking until it reports",
                    pending, self.write_timeout
                );
                Err(JournalError::WriteTimedOut(self.write_timeout))
            }
            Parked::Empty => Ok(report),
        }
    }

    /// Wait up to `limit` for the parked write and settle it if it finished.
    ///
    /// The write stays parked while this future is pending, so dropping it
    /// loses nothing.
    async fn wait_parked(&self, state: &mut WriterState, limit: Duration) -> Parked {
        let outcome = match state.in_flight.as_mut() {
            None => return Parked::Empty,
            Some(in_flight) => tokio::time::timeout(limit, &mut in_flight.handle).await,
        };

        let Ok(outcome) = outcome else {
            let pending = state.in_flight.as_ref().map_or(0, |w| w.records.len());
            return Parked::Pending(pending);
        };

        match state.in_flight.take() {
            Some(InFlightWrite { records, bytes, .. }) => {
                Parked::Settled(self.resolve(records, bytes, outcome))
            }
            None => Parked::Empty,
        }
    }

    fn resolve(
        &self,
        records: Vec<EventRecord>,
        bytes: usize,
        outcome: std::result::Result<io::Result<()>, JoinError>,
    ) -> Result<FlushReport> {
        match outcome {
            Ok(Ok(())) => {
                let count = records.len();
                self.count_written(count, bytes);
                Ok(FlushReport { records: count, bytes })
            }
            Ok(Err(e)) => {
                self.buffer.restore(records);
                Err(JournalError::Io(e))
            }
            Err(e) => {
                self.buffer.restore(records);
                Err(JournalError::StorageFailed(format!("write task failed: {}", e)))
            }
        }
    }

    fn count_written(&self, records: usize, bytes: usize) {
        self.counters
            .records_written
            .fetch_add(records as u64, Ordering::Relaxed);
        self.counters
            .bytes_written
            .fetch_add(bytes as u64, Ordering::Relaxed);
        metrics::counter!("journal_bytes_written_total").increment(bytes as u64);
    }

    fn count(&self, result: &Result<FlushReport>) {
        let outcome = match result {
            Ok(_) => {
                self.counters.flushes_succeeded.fetch_add(1, Ordering::Relaxed);
                "ok"
            }
            Err(_) => {
                self.counters.flushes_failed.fetch_add(1, Ordering::Relaxed);
                "error"
            }
        };
        metrics::counter!("journal_flushes_total", "outcome" => outcome).increment(1);
    }

    /// Whether a write is parked awaiting settlement
    pub async fn has_write_in_flight(&self) -> bool {
        self.state.lock().await.in_flight.is_some()
    }

    pub fn sink_location(&self) -> String {
        self.sink.location()
    }

    /// Get writer statistics
    pub fn stats(&self) -> WriterStats {
        WriterStats {
            flushes_succeeded: self.counters.flushes_succeeded.load(Ordering::Relaxed),
            flushes_failed: self.counters.flushes_failed.load(Ordering::Relaxed),
            records_written: self.counters.records_written.load(Ordering::Relaxed),
            bytes_written: self.counters.bytes_written.load(Ordering::Relaxed),
        }
    }
}

/// One `"<label> at <timestamp>\n"` line per record, in buffer order
fn render_payload(records: &[EventRecord]) -> Vec<u8> {
    let mut payload = String::with_capacity(records.len() * 48);
    for record in records {
        payload.push_str(&record.render());
        payload.push('\n');
    }
    payload.into_bytes()
}

#[derive(Default)]
struct WriterCounters {
    flushes_succeeded: AtomicU64,
    flushes_failed: AtomicU64,
    records_written: AtomicU64,
    bytes_written: AtomicU64,
}

/// Writer statistics
#[derive(Debug, Clone, Default)]
pub struct WriterStats {
    pub flushes_succeeded: u64,
    pub flushes_failed: u64,
    pub records_written: u64,
    pub bytes_written: u64,
}
