// packages/journal/src/recording/buffer.rs
//! Ordered in-memory event buffer
//!
//! Append and drain take the same lock, so a drain always observes a
//! complete snapshot and an append is never lost to a concurrent drain.
//! A drained snapshot that could not be written is handed back with
//! [`EventBuffer::restore`], which puts it in front of anything appended
//! in the meantime.

use crate::recording::event::EventRecord;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Bounded, ordered event buffer
pub struct EventBuffer {
    records: Mutex<VecDeque<EventRecord>>,
    capacity: usize,
    push_count: AtomicU64,
    drain_count: AtomicU64,
    restore_count: AtomicU64,
    drop_count: AtomicU64,
}

impl EventBuffer {
    /// Create a buffer holding at most `capacity` records
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Mutex::new(VecDeque::new()),
            capacity,
            push_count: AtomicU64::new(0),
            drain_count: AtomicU64::new(0),
            restore_count: AtomicU64::new(0),
            drop_count: AtomicU64::new(0),
        }
    }

    /// Append a record. When full, the oldest record is evicted.
    pub fn push(&self, record: EventRecord) {
        let evicted = {
            let mut records = self.records.lock();
            let evicted = if records.len() >= self.capacity {
                records.pop_front()
            } else {
                None
            };
            records.push_back(record);
            evicted
        };

        self.push_count.fetch_add(1, Ordering::Relaxed);
        if let Some(old) = evicted {
            self.record_drops(1);
            warn!("Event buffer full ({}), evicted oldest: {}", self.capacity, old);
        }
    }

    /// Atomically take every buffered record, oldest first
    pub fn drain(&self) -> Vec<EventRecord> {
        let drained: Vec<EventRecord> = self.records.lock().drain(..).collect();
        self.drain_count
            .fetch_add(drained.len() as u64, Ordering::Relaxed);
        drained
    }

    /// Put a drained snapshot back ahead of newer records.
    ///
    /// If the combined length exceeds capacity the oldest records go first.
    pub fn restore(&self, snapshot: Vec<EventRecord>) {
        if snapshot.is_empty() {
            return;
        }
        let restored = snapshot.len();

        let dropped = {
            let mut records = self.records.lock();
            for record in snapshot.into_iter().rev() {
                records.push_front(record);
            }
            let overflow = records.len().saturating_sub(self.capacity);
            records.drain(..overflow);
            overflow
        };

        self.restore_count
            .fetch_add(restored as u64, Ordering::Relaxed);
        if dropped > 0 {
            self.record_drops(dropped);
            warn!(
                "Event buffer over capacity after restore, evicted {} oldest records",
                dropped
            );
        }
    }

    fn record_drops(&self, n: usize) {
        self.drop_count.fetch_add(n as u64, Ordering::Relaxed);
        metrics::counter!("journal_events_dropped_total").increment(n as u64);
    }

    /// Rendered lines currently buffered, oldest first
    pub fn snapshot_lines(&self) -> Vec<String> {
        self.records.lock().iter().map(EventRecord::render).collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get buffer statistics
    pub fn stats(&self) -> BufferStats {
        BufferStats {
            push_count: self.push_count.load(Ordering::Relaxed),
            drain_count: self.drain_count.load(Ordering::Relaxed),
            restore_count: self.restore_count.load(Ordering::Relaxed),
            drop_count: self.drop_count.load(Ordering::Relaxed),
            current_size: self.len(),
            capacity: self.capacity,
        }
    }
}

/// Buffer statistics
#[derive(Debug, Clone)]
pub struct BufferStats {
    /// Total records appended
    pub push_count: u64,

    /// Total records drained for writing (restored ones count again)
    pub drain_count: u64,

    /// Total records handed back after a failed write
    pub restore_count: u64,

    /// Total records evicted because the buffer was full
    pub drop_count: u64,

    /// Current buffer size
    pub current_size: usize,

    /// Buffer capacity
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::event::TimestampPrecision;
    use std::sync::Arc;

    fn record(label: &str) -> EventRecord {
        EventRecord::now(label, TimestampPrecision::Seconds)
    }

    fn labels(records: &[EventRecord]) -> Vec<String> {
        records.iter().map(|r| r.label().to_string()).collect()
    }

    #[test]
    fn test_buffer_creation() {
        let buffer = EventBuffer::new(10);
        assert_eq!(buffer.capacity(), 10);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let buffer = EventBuffer::new(10);
        buffer.push(record("a"));
        buffer.push(record("b"));
        buffer.push(record("c"));

        let drained = buffer.drain();
        assert_eq!(labels(&drained), ["a", "b", "c"]);
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_empty());
    }

    #[test]
    fn test_restore_goes_before_newer_records() {
        let buffer = EventBuffer::new(10);
        buffer.push(record("a"));
        buffer.push(record("b"));
        let snapshot = buffer.drain();

        buffer.push(record("c"));
        buffer.restore(snapshot);

        assert_eq!(labels(&buffer.drain()), ["a", "b", "c"]);
        assert_eq!(buffer.stats().restore_count, 2);
    }

    #[test]
    fn test_full_buffer_evicts_oldest() {
        let buffer = EventBuffer::new(2);
        buffer.push(record("a"));
        buffer.push(record("b"));
        buffer.push(record("c"));

        let stats = buffer.stats();
        assert_eq!(stats.drop_count, 1);
        assert_eq!(stats.push_count, 3);
        assert_eq!(labels(&buffer.drain()), ["b", "c"]);
    }

    #[test]
    fn test_restore_respects_capacity() {
        let buffer = EventBuffer::new(3);
        buffer.push(record("a"));
        buffer.push(record("b"));
        let snapshot = buffer.drain();
        buffer.push(record("c"));
        buffer.push(record("d"));

        buffer.restore(snapshot);

        assert_eq!(labels(&buffer.drain()), ["b", "c", "d"]);
        assert_eq!(buffer.stats().drop_count, 1);
    }

    #[test]
    fn test_concurrent_push_and_drain_loses_nothing() {
        use std::thread;

        let buffer = Arc::new(EventBuffer::new(100_000));
        let mut handles = vec![];

        for i in 0..8 {
            let b = Arc::clone(&buffer);
            handles.push(thread::spawn(move || {
                for j in 0..500 {
                    b.push(record(&format!("evt_{}_{}", i, j)));
                }
            }));
        }

        let drainer = {
            let b = Arc::clone(&buffer);
            thread::spawn(move || {
                let mut seen = Vec::new();
                for _ in 0..200 {
                    seen.extend(b.drain());
                    thread::yield_now();
                }
                seen
            })
        };

        for handle in handles {
            handle.join().unwrap();
        }
        let mut all = drainer.join().unwrap();
        all.extend(buffer.drain());

        assert_eq!(all.len(), 8 * 500);
        let mut unique: Vec<_> = labels(&all);
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 8 * 500);

        // Per-producer order survives interleaving
        for i in 0..8 {
            let prefix = format!("evt_{}_", i);
            let seq: Vec<usize> = all
                .iter()
                .filter_map(|r| r.label().strip_prefix(&prefix))
                .map(|n| n.parse().unwrap())
                .collect();
            assert!(seq.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
